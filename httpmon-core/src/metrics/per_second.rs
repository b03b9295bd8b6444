use crate::metrics::{CounterVector, Metric, OwnedMetric, Prober, REQS_PER_SECOND, get_mut, lock};
use crate::record::{CallRecord, UnixSeconds, window_end};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Average requests per second over consecutive fixed windows.
///
/// The first record opens a window at its own timestamp. A record landing
/// strictly after `start + period` closes it: the open count is divided by
/// the period in seconds, globally and for every section seen so far, and a
/// new window opens at that record's time. Records are assumed to arrive in
/// non-decreasing time order.
///
/// Snapshots only ever contain closed windows. Their scrape time is the start
/// of the most recently closed window, `0` before any window closed.
#[derive(Debug)]
pub struct RequestsPerSecond {
    state: Mutex<Windows>,
}

#[derive(Debug)]
struct Windows {
    period: Duration,
    start: Option<UnixSeconds>,
    last_capture: UnixSeconds,
    total: Vec<f64>,
    open_total: f64,
    // Every known section has an entry here, possibly still empty.
    per_section: HashMap<String, Vec<f64>>,
    open_per_section: HashMap<String, f64>,
}

impl Windows {
    fn record(&mut self, time: UnixSeconds, section: &str) {
        let start = *self.start.get_or_insert(time);

        if time > window_end(start, self.period) {
            self.roll_over(start, time);
        }

        self.open_total += 1.0;
        *self
            .open_per_section
            .entry(section.to_string())
            .or_insert(0.0) += 1.0;
        if !self.per_section.contains_key(section) {
            self.per_section.insert(section.to_string(), Vec::new());
        }
    }

    fn roll_over(&mut self, closing: UnixSeconds, opening: UnixSeconds) {
        let secs = self.period.as_secs_f64();

        let rate = self.open_total / secs;
        self.total.push(rate);
        self.open_total = 0.0;

        for (section, series) in self.per_section.iter_mut() {
            let count = self.open_per_section.remove(section).unwrap_or(0.0);
            series.push(count / secs);
        }

        self.last_capture = closing;
        self.start = Some(opening);

        debug!(
            event = "window_rollover",
            metric = REQS_PER_SECOND,
            window_start = closing,
            rate,
            windows = self.total.len()
        );
    }

    fn metric(&self) -> Metric<'_> {
        Metric::Vector(CounterVector {
            name: REQS_PER_SECOND,
            scrape_time: self.last_capture,
            total: Cow::Borrowed(&self.total),
            labels: Cow::Borrowed(&self.per_section),
        })
    }
}

impl RequestsPerSecond {
    /// # Panics
    ///
    /// Panics if `period` is shorter than one second. Configuration
    /// validation rejects such periods before any prober is built.
    pub fn new(period: Duration) -> Self {
        assert!(
            period >= Duration::from_secs(1),
            "rate window must be at least 1s, got {period:?}"
        );

        Self {
            state: Mutex::new(Windows {
                period,
                start: None,
                last_capture: 0,
                total: Vec::new(),
                open_total: 0.0,
                per_section: HashMap::new(),
                open_per_section: HashMap::new(),
            }),
        }
    }

    pub fn period(&self) -> Duration {
        lock(&self.state).period
    }
}

impl Prober for RequestsPerSecond {
    fn name(&self) -> &'static str {
        REQS_PER_SECOND
    }

    fn update(&self, record: &CallRecord) {
        lock(&self.state).record(record.time, &record.section);
    }

    fn live_snapshot(&mut self) -> Metric<'_> {
        get_mut(&mut self.state).metric()
    }

    fn copy_snapshot(&self) -> OwnedMetric {
        lock(&self.state).metric().into_owned()
    }
}
