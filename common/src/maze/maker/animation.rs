use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::{Frontier, MazeMaker};
use crate::maze::Maze;

/// How fast an animated generation advances.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Speed {
    Slow,
    #[default]
    Medium,
    Fast,
    Instantaneous, // Skip the animation and carve everything at once.
}

impl Speed {
    /// Delay between steps, or `None` for the synchronous fallback.
    pub fn delay(self) -> Option<Duration> {
        match self {
            Speed::Slow => Some(Duration::from_millis(100)),
            Speed::Medium => Some(Duration::from_millis(50)),
            Speed::Fast => Some(Duration::ZERO),
            Speed::Instantaneous => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// A newer generation has started; this animation will never act again.
    Stale,
    /// Not due yet.
    Waiting,
    /// One cell was carved.
    Stepped,
    /// The frontier ran dry on this tick and the maze is now ready.
    Finished,
    /// Already finished on an earlier tick.
    Idle,
}

/// An in-flight animated generation. It remembers the maze epoch it was
/// started under and refuses to touch the maze once that epoch has moved on.
#[derive(Clone, Debug)]
pub struct Animation {
    epoch: u64,
    frontier: Frontier,
    next_tick: Instant,
    finished: bool,
}

impl Animation {
    pub(super) fn new(epoch: u64, frontier: Frontier, now: Instant) -> Self {
        Animation {
            epoch,
            frontier,
            next_tick: now,
            finished: false,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_current(&self, maze: &Maze) -> bool {
        self.epoch == maze.epoch()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn pending(&self) -> usize {
        self.frontier.len()
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Advances the generation by at most one step. `speed` is read on every
    /// tick, so switching to [`Speed::Instantaneous`] mid-run finishes the
    /// remaining carving synchronously on the next tick.
    pub fn tick(
        &mut self,
        maker: &mut MazeMaker,
        maze: &mut Maze,
        speed: Speed,
        now: Instant,
    ) -> Tick {
        if !self.is_current(maze) {
            return Tick::Stale;
        }

        if self.finished {
            return Tick::Idle;
        }

        if now < self.next_tick {
            return Tick::Waiting;
        }

        let Some(delay) = speed.delay() else {
            maker.finish(maze, &mut self.frontier);
            self.finished = true;
            return Tick::Finished;
        };

        maker.step(maze, &mut self.frontier);

        if self.frontier.is_empty() {
            maze.mark_ready();
            self.finished = true;
            Tick::Finished
        } else {
            self.next_tick = now + delay;
            Tick::Stepped
        }
    }
}
