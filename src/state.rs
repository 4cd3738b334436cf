use log::debug;

use crate::config::{ConfigError, GameConfig};
use crate::entity::{Entity, Pos, Role};
use crate::maze::{Maze, Tile};
use crate::movement::{self, Direction, DirectionSource};

/// The whole session: maze, player, ghosts and score. Owned by the loop and
/// lent to the rules and the renderer.
#[derive(Clone, Debug)]
pub struct GameState {
    pub maze: Maze,
    pub player: Entity,
    pub ghosts: Vec<Entity>,
    pub score: u32,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        let maze = Maze::from_rows(
            config.layout.as_slice(),
            config.width,
            config.height,
            config.dot_value,
        )?;
        check_spawn(&maze, Role::Player, config.player_spawn)?;
        if config.ghost_count > 0 {
            check_spawn(&maze, Role::Ghost, config.ghost_spawn)?;
        }

        let ghosts = (0..config.ghost_count)
            .map(|i| Entity::ghost(i, config.ghost_spawn))
            .collect();
        Ok(Self {
            maze,
            player: Entity::player(config.player_spawn),
            ghosts,
            score: 0,
        })
    }

    /// Moves the player one step and eats the pellet it lands on. A move
    /// into a wall leaves the player where it was and eats nothing.
    pub fn move_player(&mut self, dir: Direction) {
        let from = self.player.pos;
        let to = movement::step(&self.maze, from, dir);
        if to == from {
            return;
        }
        self.player.pos = to;
        let eaten = self.maze.consume_pellet(to);
        if eaten.consumed {
            self.score += eaten.value;
            debug!("score {}", self.score);
        }
    }

    /// Moves every ghost one step in spawn order, each with its own draw
    /// from `dirs`.
    pub fn move_ghosts<D: DirectionSource>(&mut self, mut dirs: D) {
        for ghost in &mut self.ghosts {
            let dir = dirs.next_direction();
            ghost.pos = movement::step(&self.maze, ghost.pos, dir);
        }
    }

    pub fn player_caught(&self) -> bool {
        movement::any_ghost_overlaps_player(&self.player, &self.ghosts)
    }
}

fn check_spawn(maze: &Maze, role: Role, pos: Pos) -> Result<(), ConfigError> {
    match maze.cell_at(pos) {
        Ok(Tile::Wall) => Err(ConfigError::SpawnOnWall {
            role,
            x: pos.x,
            y: pos.y,
        }),
        Ok(_) => Ok(()),
        Err(_) => Err(ConfigError::SpawnOutOfBounds {
            role,
            x: pos.x,
            y: pos.y,
        }),
    }
}
