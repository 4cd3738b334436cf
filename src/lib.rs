//! Terminal maze chase.
//!
//! The player walks a fixed toroidal maze eating pellets while randomly
//! wandering ghosts try to land on the same cell. Terminal I/O is confined
//! to `input` and `render`; the rest is plain data and rules.

pub mod config;
pub mod entity;
pub mod game;
pub mod input;
pub mod maze;
pub mod movement;
pub mod render;
pub mod state;
pub mod tick;

use std::time::Duration;

pub use config::{ConfigError, GameConfig};
pub use entity::{Entity, Pos, Role};
pub use game::{run, EndReason, FixedRate, GameError, Pacer, Phase, Summary};
pub use input::{KeyEvent, KeySource, TerminalKeys};
pub use maze::{Consumption, Maze, MazeError, Tile};
pub use movement::{Direction, DirectionSource, RandomWalk};
pub use render::{FrameSink, TerminalRenderer};
pub use state::GameState;
pub use tick::{tick, Command, TickOutcome};

pub const WIDTH: usize = 19;
pub const HEIGHT: usize = 18;
pub const TICK_RATE: Duration = Duration::from_millis(100);
pub const DOT_VALUE: u32 = 10;
pub const GHOST_COUNT: usize = 4;
pub const PLAYER_SPAWN: Pos = Pos { x: 9, y: 9 };
pub const GHOST_SPAWN: Pos = Pos { x: 9, y: 7 };

/// `#` wall, `.` pellet, space empty. The open ends of row 8 form the side tunnel.
pub const REFERENCE_LAYOUT: [&str; HEIGHT] = [
    "###################",
    "#........#........#",
    "#.##.###.#.###.##.#",
    "#.................#",
    "#.##.#.#####.#.##.#",
    "#....#...#...#....#",
    "####.###.#.###.####",
    "####.#.......#.####",
    ".......#####.......",
    "####.#       #.####",
    "#........#........#",
    "#.##.###.#.###.##.#",
    "#..#...........#..#",
    "##.#.#.#####.#.#.##",
    "#....#...#...#....#",
    "#.######.#.######.#",
    "#.................#",
    "###################",
];
