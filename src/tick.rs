//! One simulation step.

use log::trace;

use crate::movement::{Direction, DirectionSource};
use crate::state::GameState;

/// The single input a tick acts on, after coalescing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
    Caught,
}

/// Advances `state` by one tick.
///
/// Order: player move, overlap check, ghost moves, overlap check. A ghost
/// that ends on the player in either check ends the session, so an
/// overlap that exists only between the two phases still counts.
pub fn tick<D: DirectionSource>(
    state: &mut GameState,
    command: Option<Command>,
    dirs: D,
) -> TickOutcome {
    let dir = match command {
        Some(Command::Quit) => return TickOutcome::Quit,
        Some(Command::Move(dir)) => dir,
        None => Direction::None,
    };

    state.move_player(dir);
    let mut caught = state.player_caught();
    state.move_ghosts(dirs);
    caught |= state.player_caught();

    trace!(
        "tick: player {} score {} caught {}",
        state.player.pos,
        state.score,
        caught
    );
    if caught {
        TickOutcome::Caught
    } else {
        TickOutcome::Continue
    }
}
