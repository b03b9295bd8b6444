use std::time::Duration;

pub const RENDER_TICK: Duration = Duration::from_millis(250);
pub const LOOP_IDLE_SLEEP: Duration = Duration::from_millis(25);
pub const TOP_HOSTS: usize = 5;
pub const TOP_SECTIONS: usize = 5;
pub const RATE_HISTORY: usize = 10;
pub const ACTIVITY_LOG_CAPACITY: usize = 50;
