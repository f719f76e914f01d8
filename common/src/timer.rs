use std::time::Instant;

use crate::time::COUNTDOWN_TICK;

pub const DEFAULT_COUNTDOWN_SECS: u32 = 60;

/// Whole-second countdown for a play session.
///
/// The remaining time is allowed to go below zero; a session is lost once it
/// does. Restarting bumps `epoch`, so ticks scheduled by an earlier run are
/// simply dropped.
#[derive(Clone, Debug)]
pub struct Countdown {
    initial: i32,
    remaining: i32,
    running: bool,
    epoch: u64,
    next_tick: Option<(u64, Instant)>, // Epoch the tick was scheduled under, and when it's due.
}

impl Countdown {
    pub fn new(initial_secs: u32) -> Self {
        let initial = i32::try_from(initial_secs).unwrap_or(i32::MAX);
        Self {
            initial,
            remaining: initial,
            running: false,
            epoch: 0,
            next_tick: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.running = true;
        self.epoch += 1;
        self.next_tick = Some((self.epoch, now + COUNTDOWN_TICK));
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.remaining = self.initial;
    }

    /// Applies every decrement that has come due by `now`. Returns how many
    /// seconds were taken off.
    pub fn update(&mut self, now: Instant) -> u32 {
        let mut ticks = 0;

        while let Some((epoch, due)) = self.next_tick {
            if !self.running || epoch != self.epoch {
                self.next_tick = None;
                break;
            }
            if now < due {
                break;
            }

            self.remaining -= 1;
            ticks += 1;
            self.next_tick = Some((epoch, due + COUNTDOWN_TICK));
        }

        ticks
    }

    pub fn remaining(&self) -> i32 {
        self.remaining
    }

    pub fn initial(&self) -> i32 {
        self.initial
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn has_expired(&self) -> bool {
        self.remaining < 0
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTDOWN_SECS)
    }
}
