use crate::metrics::Metric;
use crate::record::{UnixSeconds, window_end};
use std::time::{Duration, Instant};

/// Clock an alert measures its period with.
pub trait Timer: Send {
    /// Starts counting from the timer's current "now" and returns it.
    fn start(&mut self) -> UnixSeconds;

    /// Whether more than the period elapsed since [`Timer::start`].
    ///
    /// A timer that was never started is over.
    fn over(&self) -> bool;

    fn now(&self) -> UnixSeconds;

    /// Called with every metric before the alert rule runs.
    fn observe(&mut self, _metric: &Metric<'_>) {}
}

/// Wall-clock timer.
#[derive(Debug, Clone)]
pub struct SystemTimer {
    period: Duration,
    started: Option<Instant>,
}

impl SystemTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            started: None,
        }
    }
}

impl Timer for SystemTimer {
    fn start(&mut self) -> UnixSeconds {
        self.started = Some(Instant::now());
        self.now()
    }

    fn over(&self) -> bool {
        self.started
            .is_none_or(|started| started.elapsed() > self.period)
    }

    fn now(&self) -> UnixSeconds {
        chrono::Utc::now().timestamp()
    }
}

/// Timer running on the scrape time of observed metrics.
///
/// Evaluation then depends only on log timestamps, so replaying the same log
/// gives the same alerts however fast it is read. Until it has both observed
/// a metric and been started, the timer is over.
#[derive(Debug, Clone)]
pub struct MetricTimer {
    period: Duration,
    start: Option<UnixSeconds>,
    current: Option<UnixSeconds>,
}

impl MetricTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            start: None,
            current: None,
        }
    }
}

impl Timer for MetricTimer {
    fn start(&mut self) -> UnixSeconds {
        self.start = self.current;
        self.start.unwrap_or_default()
    }

    fn over(&self) -> bool {
        match (self.start, self.current) {
            // integer timestamps make the whole-second comparison exact
            (Some(start), Some(current)) => current > window_end(start, self.period),
            _ => true,
        }
    }

    fn now(&self) -> UnixSeconds {
        self.current.unwrap_or_default()
    }

    fn observe(&mut self, metric: &Metric<'_>) {
        self.current = Some(metric.scrape_time());
    }
}
