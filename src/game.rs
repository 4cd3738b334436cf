//! Fixed-rate session loop.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use log::info;
use thiserror::Error;

use crate::config::ConfigError;
use crate::input::{drain_latest, KeySource};
use crate::movement::DirectionSource;
use crate::render::FrameSink;
use crate::state::GameState;
use crate::tick::{tick, TickOutcome};

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid game configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    Quit,
    Caught,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Ended(EndReason),
}

impl From<TickOutcome> for Phase {
    fn from(outcome: TickOutcome) -> Self {
        match outcome {
            TickOutcome::Continue => Phase::Running,
            TickOutcome::Quit => Phase::Ended(EndReason::Quit),
            TickOutcome::Caught => Phase::Ended(EndReason::Caught),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    pub reason: EndReason,
    pub score: u32,
    pub ticks: u64,
    pub pellets_left: usize,
}

/// Blocks until the next tick is due.
pub trait Pacer {
    fn wait_next_tick(&mut self);
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    fn wait_next_tick(&mut self) {
        (**self).wait_next_tick()
    }
}

/// Sleeps to fixed deadlines on the monotonic clock. A tick that overruns
/// its slot moves the schedule forward instead of bunching up later ticks.
#[derive(Debug)]
pub struct FixedRate {
    interval: Duration,
    next: Instant,
}

impl FixedRate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: Instant::now() + interval,
        }
    }
}

impl Pacer for FixedRate {
    fn wait_next_tick(&mut self) {
        let now = Instant::now();
        if self.next > now {
            thread::sleep(self.next - now);
            self.next += self.interval;
        } else {
            self.next = now + self.interval;
        }
    }
}

/// Plays one session to its end.
///
/// Draws the starting board, then per tick: coalesce input, advance the
/// simulation, and render only if nobody got caught. Nothing is drawn after
/// the session ends.
pub fn run<K, S, D, P>(
    mut state: GameState,
    mut keys: K,
    mut sink: S,
    mut dirs: D,
    mut pacer: P,
) -> Result<Summary, GameError>
where
    K: KeySource,
    S: FrameSink,
    D: DirectionSource,
    P: Pacer,
{
    info!(
        "session start: {}x{} maze, {} ghosts, {} pellets",
        state.maze.width(),
        state.maze.height(),
        state.ghosts.len(),
        state.maze.pellets_left()
    );
    sink.render_frame(&state)?;
    pacer.wait_next_tick();

    let mut ticks: u64 = 0;
    let reason = loop {
        let command = drain_latest(&mut keys)?;
        ticks += 1;
        match Phase::from(tick(&mut state, command, &mut dirs)) {
            Phase::Ended(reason) => break reason,
            Phase::Running => {}
        }
        sink.render_frame(&state)?;
        pacer.wait_next_tick();
    };

    let summary = Summary {
        reason,
        score: state.score,
        ticks,
        pellets_left: state.maze.pellets_left(),
    };
    info!(
        "session ended ({:?}) after {} ticks, score {}",
        summary.reason, summary.ticks, summary.score
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_follows_tick_outcome() {
        assert_eq!(Phase::from(TickOutcome::Continue), Phase::Running);
        assert_eq!(
            Phase::from(TickOutcome::Quit),
            Phase::Ended(EndReason::Quit)
        );
        assert_eq!(
            Phase::from(TickOutcome::Caught),
            Phase::Ended(EndReason::Caught)
        );
    }

    #[test]
    fn fixed_rate_paces_ticks() {
        let interval = Duration::from_millis(5);
        let mut pacer = FixedRate::new(interval);
        let start = Instant::now();
        for _ in 0..4 {
            pacer.wait_next_tick();
        }
        assert!(start.elapsed() >= interval * 3);
    }

    #[test]
    fn fixed_rate_does_not_burst_after_overrun() {
        let interval = Duration::from_millis(5);
        let mut pacer = FixedRate::new(interval);
        thread::sleep(Duration::from_millis(30));
        pacer.wait_next_tick();
        let start = Instant::now();
        pacer.wait_next_tick();
        assert!(start.elapsed() >= Duration::from_millis(3));
    }
}
