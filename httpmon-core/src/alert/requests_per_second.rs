use crate::alert::{Alert, AlertName, AlertState, BaseAlert, MetricTimer};
use crate::metrics::{Metric, REQS_PER_SECOND};
use crate::record::UnixSeconds;
use std::time::Duration;

pub const REQUESTS_PER_SECOND_ALERT: AlertName = AlertName("Requests Per Second Threshold");

/// Fires when the latest closed window of the requests/second metric stays at
/// or above `threshold` for `period`, on the metric's own clock.
pub struct RequestsPerSecondAlert {
    base: BaseAlert,
    threshold: f64,
}

impl RequestsPerSecondAlert {
    pub fn new(period: Duration, threshold: f64) -> Self {
        Self {
            base: BaseAlert::with_timer(
                period,
                Box::new(MetricTimer::new(period)),
                Box::new(move |metric| above_threshold(metric, threshold)),
            ),
            threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// # Panics
///
/// Panics if `metric` is not the requests/second series: the alert was wired
/// to the wrong metric and its state would be meaningless.
fn above_threshold(metric: &Metric<'_>, threshold: f64) -> bool {
    match metric {
        Metric::Vector(rates) if metric.name() == REQS_PER_SECOND => {
            rates.latest().is_some_and(|rate| rate >= threshold)
        }
        other => panic!(
            "'{REQUESTS_PER_SECOND_ALERT}' evaluated against {} '{}', expected '{REQS_PER_SECOND}'",
            other.kind(),
            other.name()
        ),
    }
}

impl Alert for RequestsPerSecondAlert {
    fn name(&self) -> AlertName {
        REQUESTS_PER_SECOND_ALERT
    }

    fn state(&self) -> AlertState {
        self.base.state()
    }

    fn eval(&mut self, metric: &Metric<'_>) -> AlertState {
        self.base.eval(metric)
    }

    fn eval_time(&self) -> UnixSeconds {
        self.base.eval_time()
    }

    fn description(&self) -> String {
        format!(
            "active if reqs/s >= {:.2} for {}",
            self.threshold,
            humantime::format_duration(self.base.period())
        )
    }
}
