use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use strum::{EnumIter, IntoEnumIterator};

use crate::time::{MAZE_NOT_READY_NOTICE, TIMER_TIP_NOTICE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Notice {
    MazeNotReady,
    TimerTip,
    DefeatTip,
    Victory,
    Defeat,
}

impl Notice {
    pub fn text(self) -> &'static str {
        match self {
            Notice::MazeNotReady => "The maze is not ready yet. Wait for it to finish.",
            Notice::TimerTip => "Reach the exit before the countdown runs out.",
            Notice::DefeatTip => "Time is up.",
            Notice::Victory => "You found the exit!",
            Notice::Defeat => "Out of time. Better luck next maze.",
        }
    }

    /// How long the notice stays up on its own; `None` means until hidden.
    pub fn lifetime(self) -> Option<Duration> {
        match self {
            Notice::MazeNotReady => Some(MAZE_NOT_READY_NOTICE),
            Notice::TimerTip => Some(TIMER_TIP_NOTICE),
            Notice::DefeatTip | Notice::Victory | Notice::Defeat => None,
        }
    }

    pub fn is_popup(self) -> bool {
        matches!(self, Notice::Victory | Notice::Defeat)
    }
}

/// Currently visible notices and when each one dismisses itself.
#[derive(Debug, Default, Clone)]
pub struct Notices {
    visible: HashMap<Notice, Option<Instant>>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `notice`. Showing it again restarts its dismissal timer.
    pub fn show(&mut self, notice: Notice, now: Instant) {
        let dismiss_at = notice.lifetime().map(|lifetime| now + lifetime);
        self.visible.insert(notice, dismiss_at);
    }

    pub fn hide(&mut self, notice: Notice) {
        self.visible.remove(&notice);
    }

    pub fn update(&mut self, now: Instant) {
        self.visible
            .retain(|_, dismiss_at| dismiss_at.is_none_or(|at| now < at));
    }

    pub fn is_visible(&self, notice: Notice) -> bool {
        self.visible.contains_key(&notice)
    }

    /// Visible notices in a fixed order.
    pub fn visible(&self) -> Vec<Notice> {
        Notice::iter().filter(|n| self.is_visible(*n)).collect()
    }
}
