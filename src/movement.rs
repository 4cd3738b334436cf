//! Movement and collision rules shared by the player and the ghosts.
//!
//! A move is two steps: [`propose_move`] shifts one cell and wraps around
//! the maze edges, then [`resolve_move`] throws the move away if it lands
//! on a wall. There are no partial or diagonal moves.

use rand::Rng;

use crate::entity::{Entity, Pos};
use crate::maze::Maze;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    None,
}

/// The four directions a ghost may pick from.
pub const CARDINALS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

impl Direction {
    fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::None => (0, 0),
        }
    }
}

/// One step in `dir`, wrapped onto the `width` x `height` torus. The wrap
/// happens before any wall check.
pub fn propose_move(pos: Pos, dir: Direction, width: usize, height: usize) -> Pos {
    let (dx, dy) = dir.delta();
    Pos {
        x: wrap(pos.x, dx, width),
        y: wrap(pos.y, dy, height),
    }
}

fn wrap(coord: usize, delta: isize, len: usize) -> usize {
    let len = len as isize;
    (coord as isize + delta).rem_euclid(len) as usize
}

/// `candidate` unless it is a wall, in which case the entity stays at `pos`.
pub fn resolve_move(maze: &Maze, pos: Pos, candidate: Pos) -> Pos {
    if maze.is_wall(candidate) {
        pos
    } else {
        candidate
    }
}

/// Propose then resolve against `maze`.
pub fn step(maze: &Maze, pos: Pos, dir: Direction) -> Pos {
    let candidate = propose_move(pos, dir, maze.width(), maze.height());
    let resolved = resolve_move(maze, pos, candidate);
    assert!(
        maze.contains(resolved),
        "move {dir:?} from {pos} left the maze at {resolved}"
    );
    resolved
}

pub fn any_ghost_overlaps_player(player: &Entity, ghosts: &[Entity]) -> bool {
    ghosts.iter().any(|g| g.pos == player.pos)
}

/// Where ghosts get their next direction from.
pub trait DirectionSource {
    fn next_direction(&mut self) -> Direction;
}

/// Uniform pick from [`CARDINALS`] every call, with no memory of earlier picks.
#[derive(Debug, Clone)]
pub struct RandomWalk<R> {
    rng: R,
}

impl<R: Rng> RandomWalk<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DirectionSource for RandomWalk<R> {
    fn next_direction(&mut self) -> Direction {
        CARDINALS[self.rng.gen_range(0..CARDINALS.len())]
    }
}

impl<D: DirectionSource + ?Sized> DirectionSource for &mut D {
    fn next_direction(&mut self) -> Direction {
        (**self).next_direction()
    }
}
