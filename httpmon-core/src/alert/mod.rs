//! Threshold alerting with hysteresis.
//!
//! An alert maps every metric it is evaluated against to an [`AlertState`].
//! A rule holding moves it from `Inactive` to `Pending`, and to `Active` once
//! the rule kept holding for the alert's period as measured by its [`Timer`].
//! A rule failing resets it to `Inactive` at once.
//!
//! The [`AlertManager`] evaluates every registered alert and publishes state
//! transitions only.

mod base;
mod error;
mod manager;
mod requests_per_second;
mod state;
mod timer;

#[cfg(test)]
mod tests;

pub use base::BaseAlert;
pub use error::AlertError;
pub use manager::{AlertManager, AlertStateTransition, AlertStream, TRANSITION_QUEUE_CAPACITY};
pub use requests_per_second::{REQUESTS_PER_SECOND_ALERT, RequestsPerSecondAlert};
pub use state::AlertState;
pub use timer::{MetricTimer, SystemTimer, Timer};

use crate::metrics::Metric;
use crate::record::UnixSeconds;
use std::fmt;

/// Predicate over a metric. `true` means the alert condition holds.
pub type AlertRule = Box<dyn Fn(&Metric<'_>) -> bool + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlertName(pub &'static str);

impl fmt::Display for AlertName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

pub trait Alert: Send {
    fn name(&self) -> AlertName;

    /// State reached by the last evaluation.
    fn state(&self) -> AlertState;

    fn eval(&mut self, metric: &Metric<'_>) -> AlertState;

    /// Time of the last evaluation, on the alert timer's clock.
    fn eval_time(&self) -> UnixSeconds;

    fn description(&self) -> String;

    /// Detached copy of what the alert looks like right now.
    fn snapshot(&self) -> AlertSnapshot {
        AlertSnapshot {
            name: self.name(),
            state: self.state(),
            eval_time: self.eval_time(),
            description: self.description(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertSnapshot {
    pub name: AlertName,
    pub state: AlertState,
    pub eval_time: UnixSeconds,
    pub description: String,
}
