use crate::metrics::MetricError;
use crate::record::UnixSeconds;
use std::borrow::Cow;
use std::collections::HashMap;

/// Snapshot that owns all of its data and can cross threads freely.
pub type OwnedMetric = Metric<'static>;

/// A named, timestamped aggregate.
///
/// A `Metric<'a>` may borrow the prober's live maps. Call
/// [`Metric::into_owned`] to detach it.
#[derive(Debug, Clone, PartialEq)]
pub enum Metric<'a> {
    Counter(Counter<'a>),
    Vector(CounterVector<'a>),
    Status(StatusCounter<'a>),
}

impl Metric<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Counter(m) => m.name,
            Metric::Vector(m) => m.name,
            Metric::Status(m) => m.name,
        }
    }

    pub fn scrape_time(&self) -> UnixSeconds {
        match self {
            Metric::Counter(m) => m.scrape_time,
            Metric::Vector(m) => m.scrape_time,
            Metric::Status(m) => m.scrape_time,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Metric::Counter(_) => Counter::KIND,
            Metric::Vector(_) => CounterVector::KIND,
            Metric::Status(_) => StatusCounter::KIND,
        }
    }

    /// Deep-copies every borrowed map and series.
    pub fn into_owned(self) -> OwnedMetric {
        match self {
            Metric::Counter(m) => Metric::Counter(Counter {
                name: m.name,
                scrape_time: m.scrape_time,
                total: m.total,
                labels: Cow::Owned(m.labels.into_owned()),
            }),
            Metric::Vector(m) => Metric::Vector(CounterVector {
                name: m.name,
                scrape_time: m.scrape_time,
                total: Cow::Owned(m.total.into_owned()),
                labels: Cow::Owned(m.labels.into_owned()),
            }),
            Metric::Status(m) => Metric::Status(StatusCounter {
                name: m.name,
                scrape_time: m.scrape_time,
                total: m.total,
                labels: Cow::Owned(m.labels.into_owned()),
            }),
        }
    }

    fn mismatch(&self, expected: &'static str) -> MetricError {
        MetricError::ShapeMismatch {
            name: self.name().to_string(),
            expected,
            found: self.kind(),
        }
    }
}

/// Total count plus a count per label.
#[derive(Debug, Clone, PartialEq)]
pub struct Counter<'a> {
    pub(crate) name: &'static str,
    pub(crate) scrape_time: UnixSeconds,
    pub(crate) total: u64,
    pub(crate) labels: Cow<'a, HashMap<String, u64>>,
}

impl Counter<'_> {
    pub const KIND: &'static str = "counter";

    pub fn scrape_time(&self) -> UnixSeconds {
        self.scrape_time
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn labels(&self) -> &HashMap<String, u64> {
        &self.labels
    }
}

/// Series of closed-window rates, globally and per label.
///
/// Every series holds finalized values only, oldest first. A label first
/// seen after some windows closed has a shorter series, aligned on the most
/// recent window.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterVector<'a> {
    pub(crate) name: &'static str,
    pub(crate) scrape_time: UnixSeconds,
    pub(crate) total: Cow<'a, [f64]>,
    pub(crate) labels: Cow<'a, HashMap<String, Vec<f64>>>,
}

impl CounterVector<'_> {
    pub const KIND: &'static str = "counter vector";

    pub fn scrape_time(&self) -> UnixSeconds {
        self.scrape_time
    }

    pub fn total(&self) -> &[f64] {
        &self.total
    }

    /// Most recent closed window, if any closed yet.
    pub fn latest(&self) -> Option<f64> {
        self.total.last().copied()
    }

    pub fn labels(&self) -> &HashMap<String, Vec<f64>> {
        &self.labels
    }
}

/// Total count plus counts per status code, then per section.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusCounter<'a> {
    pub(crate) name: &'static str,
    pub(crate) scrape_time: UnixSeconds,
    pub(crate) total: u64,
    pub(crate) labels: Cow<'a, HashMap<u16, HashMap<String, u64>>>,
}

impl StatusCounter<'_> {
    pub const KIND: &'static str = "status counter";

    pub fn scrape_time(&self) -> UnixSeconds {
        self.scrape_time
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn labels(&self) -> &HashMap<u16, HashMap<String, u64>> {
        &self.labels
    }
}

impl<'a> TryFrom<Metric<'a>> for Counter<'a> {
    type Error = MetricError;

    fn try_from(metric: Metric<'a>) -> Result<Self, Self::Error> {
        match metric {
            Metric::Counter(m) => Ok(m),
            other => Err(other.mismatch(Counter::KIND)),
        }
    }
}

impl<'a> TryFrom<Metric<'a>> for CounterVector<'a> {
    type Error = MetricError;

    fn try_from(metric: Metric<'a>) -> Result<Self, Self::Error> {
        match metric {
            Metric::Vector(m) => Ok(m),
            other => Err(other.mismatch(CounterVector::KIND)),
        }
    }
}

impl<'a> TryFrom<Metric<'a>> for StatusCounter<'a> {
    type Error = MetricError;

    fn try_from(metric: Metric<'a>) -> Result<Self, Self::Error> {
        match metric {
            Metric::Status(m) => Ok(m),
            other => Err(other.mismatch(StatusCounter::KIND)),
        }
    }
}
