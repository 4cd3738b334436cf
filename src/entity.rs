use std::fmt;

use crossterm::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Player,
    Ghost,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Player => f.write_str("player"),
            Role::Ghost => f.write_str("ghost"),
        }
    }
}

pub const PLAYER_GLYPH: &str = "ᗧ";
pub const GHOST_GLYPH: &str = "ᗣ";

/// Ghost colours, assigned in spawn order and repeating past four.
pub const GHOST_COLORS: [Color; 4] = [Color::Red, Color::Magenta, Color::Cyan, Color::Green];

/// Anything that occupies a maze cell. Entities are created at spawn and
/// only ever have their position changed afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub role: Role,
    pub pos: Pos,
    pub glyph: &'static str,
    pub color: Color,
}

impl Entity {
    pub fn player(pos: Pos) -> Self {
        Self {
            role: Role::Player,
            pos,
            glyph: PLAYER_GLYPH,
            color: Color::Yellow,
        }
    }

    /// The `index`th ghost; `index` only picks the colour.
    pub fn ghost(index: usize, pos: Pos) -> Self {
        Self {
            role: Role::Ghost,
            pos,
            glyph: GHOST_GLYPH,
            color: GHOST_COLORS[index % GHOST_COLORS.len()],
        }
    }
}
