use crate::alert::AlertStream;
use crate::metrics::{MetricError, MetricsCollector, OwnedMetric};
use crate::pipeline::{FirstFailure, PipelineError};
use crate::source::StopSignal;
use std::sync::Arc;
use std::thread::JoinHandle;

/// Control surface of a pipeline running in the background.
pub struct PipelineHandle {
    metrics: Arc<MetricsCollector>,
    alerts: Option<AlertStream>,
    failure: FirstFailure,
    stop: StopSignal,
    coordinator: Option<JoinHandle<()>>,
}

impl PipelineHandle {
    pub(crate) fn new(
        metrics: Arc<MetricsCollector>,
        alerts: Option<AlertStream>,
        failure: FirstFailure,
        stop: StopSignal,
        coordinator: JoinHandle<()>,
    ) -> Self {
        Self {
            metrics,
            alerts,
            failure,
            stop,
            coordinator: Some(coordinator),
        }
    }

    /// Copy of the metric called `name`.
    pub fn metric(&self, name: &str) -> Result<OwnedMetric, MetricError> {
        self.metrics.snapshot(name)
    }

    /// Alert transitions, unless the stream was taken before spawning.
    pub fn alerts(&self) -> Option<&AlertStream> {
        self.alerts.as_ref()
    }

    /// Removes and returns the fatal error, if one happened.
    pub fn take_error(&self) -> Option<PipelineError> {
        self.failure.take()
    }

    pub fn has_failed(&self) -> bool {
        self.failure.is_set()
    }

    pub fn is_running(&self) -> bool {
        self.coordinator
            .as_ref()
            .is_some_and(|coordinator| !coordinator.is_finished())
    }

    /// Stops the pipeline and waits for it.
    ///
    /// Returns the fatal error that happened before the stop, if any.
    pub fn close(mut self) -> Result<(), PipelineError> {
        self.shutdown();

        match self.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn shutdown(&mut self) {
        self.stop.raise();
        // a coordinator blocked on a full transition queue gets unblocked
        self.alerts = None;

        if let Some(coordinator) = self.coordinator.take() {
            let _ = coordinator.join();
        }
    }
}

impl Drop for PipelineHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
