use std::time::Duration;

use thiserror::Error;

use crate::entity::{Pos, Role};
use crate::{
    DOT_VALUE, GHOST_COUNT, GHOST_SPAWN, HEIGHT, PLAYER_SPAWN, REFERENCE_LAYOUT, TICK_RATE, WIDTH,
};

pub const TICK_MS_ENV_VAR: &str = "MAZE_CHASE_TICK_MS";
pub const SEED_ENV_VAR: &str = "MAZE_CHASE_SEED";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("maze dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },
    #[error("layout has {found} rows, expected {expected}")]
    RowCount { expected: usize, found: usize },
    #[error("layout row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown layout character {ch:?} at ({x}, {y})")]
    UnknownTile { x: usize, y: usize, ch: char },
    #[error("{role} spawn ({x}, {y}) is outside the maze")]
    SpawnOutOfBounds { role: Role, x: usize, y: usize },
    #[error("{role} spawn ({x}, {y}) is a wall")]
    SpawnOnWall { role: Role, x: usize, y: usize },
}

/// Everything fixed for the lifetime of a session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub layout: Vec<String>,
    pub tick: Duration,
    pub dot_value: u32,
    pub ghost_count: usize,
    pub player_spawn: Pos,
    pub ghost_spawn: Pos,
    /// Ghost RNG seed; `None` draws a fresh one at startup.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            layout: REFERENCE_LAYOUT.iter().map(|row| row.to_string()).collect(),
            tick: TICK_RATE,
            dot_value: DOT_VALUE,
            ghost_count: GHOST_COUNT,
            player_spawn: PLAYER_SPAWN,
            ghost_spawn: GHOST_SPAWN,
            seed: None,
        }
    }
}

impl GameConfig {
    /// The reference game with tick length and seed optionally taken from
    /// the environment. Values that do not parse are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(tick_ms) = std::env::var(TICK_MS_ENV_VAR)
            .ok()
            .and_then(|v| parse_tick_ms(&v))
        {
            config.tick = Duration::from_millis(tick_ms);
        }
        config.seed = std::env::var(SEED_ENV_VAR)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok());
        config
    }
}

fn parse_tick_ms(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|v| *v > 0)
}
