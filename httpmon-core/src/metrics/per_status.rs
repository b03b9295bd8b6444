use crate::metrics::{Metric, OwnedMetric, Prober, ROUTES_PER_STATUS, StatusCounter, get_mut, lock};
use crate::record::{CallRecord, UnixSeconds};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Mutex;

/// Counts calls per status code and section.
#[derive(Debug, Default)]
pub struct RoutesPerStatus {
    state: Mutex<StatusCounts>,
}

#[derive(Debug, Default)]
struct StatusCounts {
    last_scrape: UnixSeconds,
    total: u64,
    per_status: HashMap<u16, HashMap<String, u64>>,
}

impl StatusCounts {
    fn metric(&self) -> Metric<'_> {
        Metric::Status(StatusCounter {
            name: ROUTES_PER_STATUS,
            scrape_time: self.last_scrape,
            total: self.total,
            labels: Cow::Borrowed(&self.per_status),
        })
    }
}

impl RoutesPerStatus {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Prober for RoutesPerStatus {
    fn name(&self) -> &'static str {
        ROUTES_PER_STATUS
    }

    fn update(&self, record: &CallRecord) {
        let mut state = lock(&self.state);
        state.last_scrape = record.time;
        state.total += 1;
        *state
            .per_status
            .entry(record.status)
            .or_default()
            .entry(record.section.clone())
            .or_insert(0) += 1;
    }

    fn live_snapshot(&mut self) -> Metric<'_> {
        get_mut(&mut self.state).metric()
    }

    fn copy_snapshot(&self) -> OwnedMetric {
        lock(&self.state).metric().into_owned()
    }
}
