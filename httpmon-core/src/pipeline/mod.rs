//! Wires ingestion, aggregation and alerting together.
//!
//! Two threads cooperate:
//! - the ingest thread reads and parses lines into the record queue until the
//!   source or the parser fails;
//! - the coordinator loop drains the queue, feeds every record to the metrics
//!   collector, then evaluates alerts against a copy of the requests/second
//!   metric.
//!
//! The first fatal error from either side is kept and reported. Errors caused
//! by an explicit stop are not failures.

mod error;
mod handle;

#[cfg(test)]
mod tests;

pub use error::PipelineError;
pub use handle::PipelineHandle;

use crate::alert::{Alert, AlertManager, AlertStream, RequestsPerSecondAlert};
use crate::conf::MonitorConfig;
use crate::ingest::{Feed, Ingestor, RecordQueue};
use crate::metrics::{MetricsCollector, REQS_PER_SECOND};
use crate::parse::CsvParser;
use crate::source::{StopSignal, new_source};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use tracing::{debug, error, info};

pub struct Pipeline {
    ingestor: Ingestor,
    metrics: Arc<MetricsCollector>,
    alerts: AlertManager,
    stop: StopSignal,
}

impl Pipeline {
    /// Builds every component from a validated config.
    pub fn new(config: &MonitorConfig) -> Self {
        let stop = StopSignal::new();
        let source = new_source(&config.source, config.read_buffer, stop.clone());
        let ingestor = Ingestor::new(
            config.source.clone(),
            source,
            Box::new(CsvParser::new()),
            config.read_buffer,
        );

        let mut alerts: Vec<Box<dyn Alert>> = Vec::new();
        let rps = &config.alert.requests_per_second;
        if rps.enabled {
            alerts.push(Box::new(RequestsPerSecondAlert::new(
                rps.period,
                rps.threshold,
            )));
        }

        Self::from_parts(
            ingestor,
            MetricsCollector::with_defaults(config.period),
            AlertManager::new(alerts),
            stop,
        )
    }

    /// `stop` must be the signal the ingestor's source watches.
    pub fn from_parts(
        ingestor: Ingestor,
        metrics: MetricsCollector,
        alerts: AlertManager,
        stop: StopSignal,
    ) -> Self {
        Self {
            ingestor,
            metrics: Arc::new(metrics),
            alerts,
            stop,
        }
    }

    /// Opens the line source.
    pub fn init(&mut self) -> Result<(), PipelineError> {
        self.ingestor.init()?;
        Ok(())
    }

    pub fn subscribe(&mut self) -> Option<AlertStream> {
        self.alerts.subscribe()
    }

    /// Shared read access to the metrics, for consumers on other threads.
    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.metrics.clone()
    }

    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Runs until the input fails or the stop signal is raised.
    ///
    /// Returns the first fatal error, or `Ok` after a requested stop.
    pub fn run(self) -> Result<(), PipelineError> {
        let failure = FirstFailure::default();
        self.coordinate(&failure);

        match failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Runs the pipeline on a background thread.
    pub fn spawn(mut self) -> PipelineHandle {
        let alerts = self.subscribe();
        let metrics = self.metrics();
        let stop = self.stop_signal();
        let failure = FirstFailure::default();

        let coordinator = {
            let failure = failure.clone();
            thread::spawn(move || self.coordinate(&failure))
        };

        PipelineHandle::new(metrics, alerts, failure, stop, coordinator)
    }

    fn coordinate(self, failure: &FirstFailure) {
        let Pipeline {
            ingestor,
            metrics,
            mut alerts,
            stop,
        } = self;
        let (feed, queue) = ingestor.split();

        let ingest = {
            let stop = stop.clone();
            let failure = failure.clone();
            thread::spawn(move || run_ingest(feed, &stop, &failure))
        };

        if let Err(err) = aggregate(&queue, &metrics, &mut alerts) {
            failure.record(err, &stop);
        }

        // unblocks the ingest thread if it waits on a full queue
        stop.raise();
        drop(queue);
        if ingest.join().is_err() {
            debug!(event = "ingest_panicked");
        }

        info!(event = "pipeline_stopped", failed = failure.is_set());
    }
}

fn run_ingest(mut feed: Feed, stop: &StopSignal, failure: &FirstFailure) {
    let err = loop {
        if let Err(err) = feed.ingest_once() {
            break err;
        }
    };

    failure.record(err.into(), stop);
    stop.raise();

    if let Err(err) = feed.close() {
        debug!(event = "source_close_failed", error = %err);
    }
    info!(event = "ingest_stopped", source = %feed.source_id());
}

/// Drains the record queue until the ingest side goes away.
fn aggregate(
    queue: &RecordQueue,
    metrics: &MetricsCollector,
    alerts: &mut AlertManager,
) -> Result<(), PipelineError> {
    // `Err` here only means the feed was dropped, its own error is recorded
    while let Ok(record) = queue.poll_one() {
        metrics.collect(&record)?;
        let rates = metrics.snapshot(REQS_PER_SECOND)?;
        alerts.evaluate(&rates)?;
    }
    Ok(())
}

/// First fatal error reported by any pipeline thread.
#[derive(Clone, Default)]
pub(crate) struct FirstFailure(Arc<Mutex<Option<PipelineError>>>);

impl FirstFailure {
    /// Keeps `err` unless an error is already kept or a stop was requested
    /// before it happened.
    pub(crate) fn record(&self, err: PipelineError, stop: &StopSignal) {
        if stop.is_raised() {
            debug!(event = "error_after_stop", error = %err);
            return;
        }

        let mut slot = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            error!(event = "pipeline_failed", error = %err);
            *slot = Some(err);
        }
    }

    pub(crate) fn is_set(&self) -> bool {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub(crate) fn take(&self) -> Option<PipelineError> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}
