use log::debug;
use thiserror::Error;

use crate::config::ConfigError;
use crate::entity::Pos;

pub const WALL_CHAR: char = '#';
pub const PELLET_CHAR: char = '.';
pub const EMPTY_CHAR: char = ' ';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Empty,
    Pellet,
}

impl Tile {
    fn from_char(ch: char) -> Option<Self> {
        match ch {
            WALL_CHAR => Some(Tile::Wall),
            PELLET_CHAR => Some(Tile::Pellet),
            EMPTY_CHAR => Some(Tile::Empty),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} maze")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

/// Result of trying to eat whatever sits on a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Consumption {
    pub consumed: bool,
    pub value: u32,
}

impl Consumption {
    pub const NOTHING: Consumption = Consumption {
        consumed: false,
        value: 0,
    };
}

/// Fixed wall layout plus the pellets still left on it.
///
/// The wall set never changes after construction; the only mutation is a
/// pellet turning into an empty cell.
#[derive(Clone, Debug)]
pub struct Maze {
    width: usize,
    height: usize,
    grid: Vec<Vec<Tile>>,
    dot_value: u32,
    pellets_left: usize,
}

impl Maze {
    /// Builds a maze from one string per row. Row count and every row's
    /// character count must match the dimensions exactly.
    pub fn from_rows<S: AsRef<str>>(
        rows: &[S],
        width: usize,
        height: usize,
        dot_value: u32,
    ) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroDimension { width, height });
        }
        if rows.len() != height {
            return Err(ConfigError::RowCount {
                expected: height,
                found: rows.len(),
            });
        }

        let mut grid = Vec::with_capacity(height);
        let mut pellets_left = 0;
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(ConfigError::RowWidth {
                    row: y,
                    expected: width,
                    found,
                });
            }
            let mut tiles = Vec::with_capacity(width);
            for (x, ch) in row.chars().enumerate() {
                let tile = Tile::from_char(ch).ok_or(ConfigError::UnknownTile { x, y, ch })?;
                if tile == Tile::Pellet {
                    pellets_left += 1;
                }
                tiles.push(tile);
            }
            grid.push(tiles);
        }

        Ok(Self {
            width,
            height,
            grid,
            dot_value,
            pellets_left,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dot_value(&self) -> u32 {
        self.dot_value
    }

    pub fn pellets_left(&self) -> usize {
        self.pellets_left
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn cell_at(&self, pos: Pos) -> Result<Tile, MazeError> {
        if !self.contains(pos) {
            return Err(MazeError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.grid[pos.y][pos.x])
    }

    /// Panics on an out-of-range position: callers only ever hold wrapped
    /// coordinates, so anything else is a bug in the movement rules.
    pub fn is_wall(&self, pos: Pos) -> bool {
        self.assert_contains(pos);
        self.grid[pos.y][pos.x] == Tile::Wall
    }

    /// Eats the pellet at `pos` if there is one. Repeated calls on the same
    /// cell report nothing after the first.
    pub fn consume_pellet(&mut self, pos: Pos) -> Consumption {
        self.assert_contains(pos);
        let tile = &mut self.grid[pos.y][pos.x];
        if *tile != Tile::Pellet {
            return Consumption::NOTHING;
        }
        *tile = Tile::Empty;
        self.pellets_left -= 1;
        debug!("pellet eaten at {pos}, {} left", self.pellets_left);
        Consumption {
            consumed: true,
            value: self.dot_value,
        }
    }

    /// Row-major iterator over every cell, used by renderers.
    pub fn cells(&self) -> impl Iterator<Item = (Pos, Tile)> + '_ {
        self.grid.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, tile)| (Pos { x, y }, *tile))
        })
    }

    fn assert_contains(&self, pos: Pos) {
        assert!(
            self.contains(pos),
            "position {pos} outside {}x{} maze",
            self.width,
            self.height
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DOT_VALUE, HEIGHT, REFERENCE_LAYOUT, WIDTH};

    fn reference() -> Maze {
        Maze::from_rows(&REFERENCE_LAYOUT, WIDTH, HEIGHT, DOT_VALUE).unwrap()
    }

    #[test]
    fn parses_reference_layout() {
        let maze = reference();
        assert_eq!(maze.width(), 19);
        assert_eq!(maze.height(), 18);
        assert_eq!(maze.cell_at(Pos::new(0, 0)), Ok(Tile::Wall));
        assert_eq!(maze.cell_at(Pos::new(1, 1)), Ok(Tile::Pellet));
        assert_eq!(maze.cell_at(Pos::new(9, 9)), Ok(Tile::Empty));
        assert_eq!(maze.cell_at(Pos::new(0, 8)), Ok(Tile::Pellet));
        assert!(maze.is_wall(Pos::new(9, 8)));
        let counted = REFERENCE_LAYOUT
            .iter()
            .flat_map(|row| row.chars())
            .filter(|&c| c == PELLET_CHAR)
            .count();
        assert_eq!(maze.pellets_left(), counted);
    }

    #[test]
    fn cell_at_rejects_out_of_bounds() {
        let maze = reference();
        assert_eq!(
            maze.cell_at(Pos::new(19, 0)),
            Err(MazeError::OutOfBounds {
                x: 19,
                y: 0,
                width: 19,
                height: 18
            })
        );
        assert!(maze.cell_at(Pos::new(0, 18)).is_err());
    }

    #[test]
    #[should_panic(expected = "outside 19x18 maze")]
    fn is_wall_asserts_bounds() {
        reference().is_wall(Pos::new(40, 2));
    }

    #[test]
    fn consuming_twice_is_idempotent() {
        let mut maze = reference();
        let before = maze.pellets_left();
        let pos = Pos::new(1, 1);
        assert_eq!(
            maze.consume_pellet(pos),
            Consumption {
                consumed: true,
                value: DOT_VALUE
            }
        );
        assert_eq!(maze.consume_pellet(pos), Consumption::NOTHING);
        assert_eq!(maze.cell_at(pos), Ok(Tile::Empty));
        assert_eq!(maze.pellets_left(), before - 1);
    }

    #[test]
    fn consuming_walls_and_empty_cells_yields_nothing() {
        let mut maze = reference();
        assert_eq!(maze.consume_pellet(Pos::new(0, 0)), Consumption::NOTHING);
        assert_eq!(maze.consume_pellet(Pos::new(9, 9)), Consumption::NOTHING);
        assert_eq!(maze.cell_at(Pos::new(0, 0)), Ok(Tile::Wall));
    }

    #[test]
    fn rejects_short_row() {
        let rows = ["###", "#.", "###"];
        let err = Maze::from_rows(&rows, 3, 3, 10).unwrap_err();
        assert_eq!(
            err,
            ConfigError::RowWidth {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn rejects_wrong_row_count() {
        let rows = ["###", "#.#"];
        let err = Maze::from_rows(&rows, 3, 3, 10).unwrap_err();
        assert_eq!(
            err,
            ConfigError::RowCount {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn rejects_unknown_characters() {
        let rows = ["###", "#o#", "###"];
        let err = Maze::from_rows(&rows, 3, 3, 10).unwrap_err();
        assert_eq!(err, ConfigError::UnknownTile { x: 1, y: 1, ch: 'o' });
    }

    #[test]
    fn cells_walks_row_major() {
        let rows = ["#.", " #"];
        let maze = Maze::from_rows(&rows, 2, 2, 10).unwrap();
        let cells: Vec<_> = maze.cells().collect();
        assert_eq!(
            cells,
            vec![
                (Pos::new(0, 0), Tile::Wall),
                (Pos::new(1, 0), Tile::Pellet),
                (Pos::new(0, 1), Tile::Empty),
                (Pos::new(1, 1), Tile::Wall),
            ]
        );
    }
}
