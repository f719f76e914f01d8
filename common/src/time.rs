use std::time::Duration;

pub const FRAME_MILLIS: u64 = 16; // Roughly one animation frame at 60Hz.
pub const FRAME: Duration = Duration::from_millis(FRAME_MILLIS);
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

pub const MAZE_NOT_READY_NOTICE: Duration = Duration::from_secs(3);
pub const TIMER_TIP_NOTICE: Duration = Duration::from_secs(5);
