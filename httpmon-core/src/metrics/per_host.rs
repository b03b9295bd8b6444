use crate::metrics::{Counter, Metric, OwnedMetric, Prober, REQS_PER_HOST, get_mut, lock};
use crate::record::{CallRecord, UnixSeconds};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Mutex;

/// Counts calls per remote host.
#[derive(Debug, Default)]
pub struct RequestsPerHost {
    state: Mutex<HostCounts>,
}

#[derive(Debug, Default)]
struct HostCounts {
    last_scrape: UnixSeconds,
    total: u64,
    per_host: HashMap<String, u64>,
}

impl HostCounts {
    fn metric(&self) -> Metric<'_> {
        Metric::Counter(Counter {
            name: REQS_PER_HOST,
            scrape_time: self.last_scrape,
            total: self.total,
            labels: Cow::Borrowed(&self.per_host),
        })
    }
}

impl RequestsPerHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Prober for RequestsPerHost {
    fn name(&self) -> &'static str {
        REQS_PER_HOST
    }

    fn update(&self, record: &CallRecord) {
        let mut state = lock(&self.state);
        state.last_scrape = record.time;
        state.total += 1;
        *state
            .per_host
            .entry(record.remote_host.clone())
            .or_insert(0) += 1;
    }

    fn live_snapshot(&mut self) -> Metric<'_> {
        get_mut(&mut self.state).metric()
    }

    fn copy_snapshot(&self) -> OwnedMetric {
        lock(&self.state).metric().into_owned()
    }
}
