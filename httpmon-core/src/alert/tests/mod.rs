mod base_tests;
mod timer_tests;

use crate::alert::Timer;
use crate::metrics::{Counter, CounterVector, Metric, OwnedMetric, REQS_PER_HOST, REQS_PER_SECOND};
use crate::record::UnixSeconds;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Requests/second metric whose closed windows are `rates`.
pub(super) fn rates(scrape_time: UnixSeconds, rates: &[f64]) -> OwnedMetric {
    Metric::Vector(CounterVector {
        name: REQS_PER_SECOND,
        scrape_time,
        total: Cow::Owned(rates.to_vec()),
        labels: Cow::Owned(HashMap::new()),
    })
}

pub(super) fn host_counter() -> OwnedMetric {
    Metric::Counter(Counter {
        name: REQS_PER_HOST,
        scrape_time: 0,
        total: 0,
        labels: Cow::Owned(HashMap::new()),
    })
}

/// Timer whose verdict is flipped from the test.
#[derive(Clone, Default)]
pub(super) struct ScriptedTimer {
    pub(super) over: Arc<AtomicBool>,
    pub(super) starts: Arc<AtomicUsize>,
}

impl ScriptedTimer {
    pub(super) fn set_over(&self, over: bool) {
        self.over.store(over, Ordering::SeqCst);
    }

    pub(super) fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }
}

impl Timer for ScriptedTimer {
    fn start(&mut self) -> UnixSeconds {
        self.starts.fetch_add(1, Ordering::SeqCst);
        0
    }

    fn over(&self) -> bool {
        self.over.load(Ordering::SeqCst)
    }

    fn now(&self) -> UnixSeconds {
        0
    }
}
