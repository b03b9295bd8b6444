//! Metric aggregation.
//!
//! A [`Prober`] folds every [`CallRecord`] into its own state and hands out
//! [`Metric`] snapshots of it. The [`MetricsCollector`] owns the probers and
//! fans each record out to all of them.
//!
//! Probers keep their state behind a mutex. The pipeline loop is the only
//! writer, so the lock only matters when another thread asks for a
//! [`Prober::copy_snapshot`] at the same time.

mod collector;
mod error;
mod metric;
mod per_host;
mod per_second;
mod per_status;

#[cfg(test)]
mod tests;

pub use collector::MetricsCollector;
pub use error::MetricError;
pub use metric::{Counter, CounterVector, Metric, OwnedMetric, StatusCounter};
pub use per_host::RequestsPerHost;
pub use per_second::RequestsPerSecond;
pub use per_status::RoutesPerStatus;

use crate::record::CallRecord;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub const REQS_PER_HOST: &str = "ReqsPerHost";
pub const REQS_PER_SECOND: &str = "ReqsPerSecond";
pub const ROUTES_PER_STATUS: &str = "RoutesPerStatus";

pub trait Prober: Send + Sync {
    /// Name of the metric this prober produces.
    fn name(&self) -> &'static str;

    /// Folds one record into the live state. Never fails.
    fn update(&self, record: &CallRecord);

    /// Borrowed view over the live state, without copying.
    ///
    /// Requires exclusive access, so it is only usable by whoever owns the
    /// prober outright.
    fn live_snapshot(&mut self) -> Metric<'_>;

    /// Independent copy of the current state, taken under the lock.
    fn copy_snapshot(&self) -> OwnedMetric;
}

/// A panicking update leaves counters that are still internally consistent,
/// so poisoning is ignored.
pub(crate) fn lock<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn get_mut<T>(state: &mut Mutex<T>) -> &mut T {
    state.get_mut().unwrap_or_else(PoisonError::into_inner)
}
