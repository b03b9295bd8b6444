use crate::metrics::{
    MetricError, Metric, OwnedMetric, Prober, RequestsPerHost, RequestsPerSecond, RoutesPerStatus,
};
use crate::record::CallRecord;
use std::collections::HashMap;
use std::time::Duration;

/// Owns every prober, keyed by the name of the metric it produces.
pub struct MetricsCollector {
    probers: HashMap<&'static str, Box<dyn Prober>>,
}

impl MetricsCollector {
    /// # Panics
    ///
    /// Panics if two probers produce the same metric name.
    pub fn new(probers: Vec<Box<dyn Prober>>) -> Self {
        let mut by_name = HashMap::with_capacity(probers.len());

        for prober in probers {
            let name = prober.name();
            let previous = by_name.insert(name, prober);
            assert!(previous.is_none(), "duplicate prober for metric '{name}'");
        }

        Self { probers: by_name }
    }

    /// Per-host, per-status and per-second probers, the latter windowed by `period`.
    pub fn with_defaults(period: Duration) -> Self {
        Self::new(vec![
            Box::new(RequestsPerHost::new()),
            Box::new(RequestsPerSecond::new(period)),
            Box::new(RoutesPerStatus::new()),
        ])
    }

    /// Hands `record` to every prober.
    pub fn collect(&self, record: &CallRecord) -> Result<(), MetricError> {
        for prober in self.probers.values() {
            prober.update(record);
        }
        Ok(())
    }

    /// Independent copy of the metric called `name`. Safe to call from any thread.
    pub fn snapshot(&self, name: &str) -> Result<OwnedMetric, MetricError> {
        self.probers
            .get(name)
            .map(|prober| prober.copy_snapshot())
            .ok_or_else(|| MetricError::NotFound {
                name: name.to_string(),
            })
    }

    pub fn live_snapshot(&mut self, name: &str) -> Result<Metric<'_>, MetricError> {
        match self.probers.get_mut(name) {
            Some(prober) => Ok(prober.live_snapshot()),
            None => Err(MetricError::NotFound {
                name: name.to_string(),
            }),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.probers.keys().copied()
    }
}
