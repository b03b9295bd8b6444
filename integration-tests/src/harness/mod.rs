pub mod fixtures;
pub mod tracing;

pub use self::fixtures::{AccessLog, HEADER, log_line, wait_until};
pub use self::tracing::{CapturedEvent, capture_events};
