use std::time::Duration;

/// How long a notice stays visible after it is presented.
pub const NOTICE_DISPLAY_MS: u64 = 3000;

/// Delay between a successful completion and the task list reload.
pub const RELOAD_DELAY_MS: u64 = 1500;

/// Time the notice takes to slide in after it is (re)presented.
pub const NOTICE_REVEAL_DURATION: Duration = Duration::from_millis(150);

pub const FRAME_DURATION: Duration = Duration::from_millis(1000 / 30); // 30 FPS

pub const GREETING: &str = "Quest Tracker initialized!";

pub const COMPLETE_TASK_ERROR: &str = "Error completing task";

pub const LOAD_TASKS_ERROR: &str = "Error loading tasks";

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000";

pub const LOG_FILE_PATH: &str = "/tmp/quest-tracker.log";

pub const NOTICE_WIDTH_PERCENT: u16 = 30; // 30% of the screen width
