use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use log::warn;
use unicode_width::UnicodeWidthStr;

use crate::entity::Pos;
use crate::maze::Tile;
use crate::state::GameState;

const CELL_W: usize = 2;

/// Receives one fully resolved state per tick.
pub trait FrameSink {
    fn render_frame(&mut self, state: &GameState) -> io::Result<()>;
}

impl<S: FrameSink + ?Sized> FrameSink for &mut S {
    fn render_frame(&mut self, state: &GameState) -> io::Result<()> {
        (**self).render_frame(state)
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
struct Cell {
    text: &'static str,
    color: Color,
}

const BLANK: Cell = Cell {
    text: "  ",
    color: Color::Reset,
};

/// Draws the maze centred in the terminal, touching only cells that changed
/// since the previous frame.
pub struct TerminalRenderer<W: Write> {
    out: W,
    last: Vec<Cell>,
    last_hud: String,
    needs_full: bool,
    too_small: bool,
    origin_x: u16,
    origin_y: u16,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, width: usize, height: usize) -> Self {
        Self {
            out,
            last: vec![BLANK; width * height],
            last_hud: String::new(),
            needs_full: true,
            too_small: false,
            origin_x: 0,
            origin_y: 1,
        }
    }

    fn draw_cell(&mut self, pos: Pos, cell: Cell) -> io::Result<()> {
        let x = self.origin_x + (pos.x * CELL_W) as u16;
        let y = self.origin_y + pos.y as u16;
        self.out.queue(MoveTo(x, y))?;
        self.out.queue(SetForegroundColor(cell.color))?;
        self.out.queue(Print(cell.text))?;
        let w = UnicodeWidthStr::width(cell.text);
        for _ in w..CELL_W {
            self.out.queue(Print(' '))?;
        }
        self.out.queue(ResetColor)?;
        Ok(())
    }
}

impl<W: Write> FrameSink for TerminalRenderer<W> {
    fn render_frame(&mut self, state: &GameState) -> io::Result<()> {
        let width = state.maze.width();
        let height = state.maze.height();
        let needed_w = (width * CELL_W) as u16;
        let needed_h = (height + 2) as u16;

        self.out.queue(MoveTo(0, 0))?;
        // Off a tty (tests, pipes) there is no size; assume the board fits.
        let (term_w, term_h) = terminal::size().unwrap_or((needed_w, needed_h));
        if term_w < needed_w || term_h < needed_h {
            if !self.too_small {
                warn!("terminal {term_w}x{term_h} smaller than {needed_w}x{needed_h}");
                self.too_small = true;
            }
            self.out.queue(Clear(ClearType::All))?;
            self.out.queue(Print(format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            )))?;
            self.out.flush()?;
            self.needs_full = true;
            return Ok(());
        }
        self.too_small = false;

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            self.out.queue(Clear(ClearType::All))?;
        }

        let hud = format!(
            "Score: {}  Dots: {}  (q to quit)",
            state.score,
            state.maze.pellets_left()
        );
        if self.needs_full || hud != self.last_hud {
            self.out.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
            self.out.queue(SetForegroundColor(Color::White))?;
            self.out.queue(Clear(ClearType::CurrentLine))?;
            self.out.queue(Print(&hud))?;
            self.out.queue(ResetColor)?;
            self.last_hud = hud;
        }

        for (pos, tile) in state.maze.cells() {
            let cell = cell_for(state, pos, tile);
            let idx = pos.y * width + pos.x;
            if self.needs_full || cell != self.last[idx] {
                self.last[idx] = cell;
                self.draw_cell(pos, cell)?;
            }
        }
        self.needs_full = false;

        self.out.flush()
    }
}

/// Player over ghosts over the maze tile.
fn cell_for(state: &GameState, pos: Pos, tile: Tile) -> Cell {
    if state.player.pos == pos {
        return Cell {
            text: state.player.glyph,
            color: state.player.color,
        };
    }
    if let Some(ghost) = state.ghosts.iter().find(|g| g.pos == pos) {
        return Cell {
            text: ghost.glyph,
            color: ghost.color,
        };
    }
    match tile {
        Tile::Wall => Cell {
            text: "██",
            color: Color::Blue,
        },
        Tile::Pellet => Cell {
            text: "· ",
            color: Color::White,
        },
        Tile::Empty => BLANK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn render_to_string(renderer: &mut TerminalRenderer<Vec<u8>>, state: &GameState) -> String {
        renderer.render_frame(state).unwrap();
        let bytes = std::mem::take(&mut renderer.out);
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn first_frame_draws_hud_and_entities() {
        let state = GameState::new(&GameConfig::default()).unwrap();
        let mut renderer = TerminalRenderer::new(Vec::new(), 19, 18);
        let frame = render_to_string(&mut renderer, &state);
        assert!(frame.contains("Score: 0"));
        assert!(frame.contains(state.player.glyph));
        assert!(frame.contains(state.ghosts[0].glyph));
        assert!(frame.contains("██"));
    }

    #[test]
    fn unchanged_state_redraws_nothing() {
        let state = GameState::new(&GameConfig::default()).unwrap();
        let mut renderer = TerminalRenderer::new(Vec::new(), 19, 18);
        render_to_string(&mut renderer, &state);
        let second = render_to_string(&mut renderer, &state);
        assert!(!second.contains("██"));
        assert!(!second.contains("Score"));
    }

    #[test]
    fn score_change_redraws_hud() {
        let mut state = GameState::new(&GameConfig::default()).unwrap();
        let mut renderer = TerminalRenderer::new(Vec::new(), 19, 18);
        render_to_string(&mut renderer, &state);
        state.score = 10;
        let second = render_to_string(&mut renderer, &state);
        assert!(second.contains("Score: 10"));
    }

    #[test]
    fn ghost_stacked_on_player_shows_player() {
        let mut state = GameState::new(&GameConfig::default()).unwrap();
        state.ghosts[0].pos = state.player.pos;
        let cell = cell_for(&state, state.player.pos, Tile::Empty);
        assert_eq!(cell.text, state.player.glyph);
    }
}
