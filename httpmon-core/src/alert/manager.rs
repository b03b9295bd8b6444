use crate::alert::{Alert, AlertError, AlertName, AlertSnapshot, AlertState};
use crate::metrics::Metric;
use crate::record::UnixSeconds;
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::time::Duration;
use tracing::info;

/// Transitions that can wait for a reader before evaluation blocks.
pub const TRANSITION_QUEUE_CAPACITY: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertStateTransition {
    /// Last published state, `Inactive` for the first publication.
    pub previous: AlertState,
    pub alert: AlertSnapshot,
    pub time: UnixSeconds,
    /// Whether the alert had been published before this transition.
    pub published_once: bool,
}

/// Evaluates alerts and publishes their state changes.
///
/// Each alert is published on its first evaluation, whatever its state, and
/// afterwards only when its state differs from the last published one. The
/// queue is bounded: when nobody drains it, [`AlertManager::evaluate`] blocks.
pub struct AlertManager {
    alerts: Vec<Box<dyn Alert>>,
    published: HashMap<AlertName, AlertState>,
    transitions: SyncSender<AlertStateTransition>,
    subscriber: Option<Receiver<AlertStateTransition>>,
}

impl AlertManager {
    pub fn new(alerts: Vec<Box<dyn Alert>>) -> Self {
        Self::with_capacity(alerts, TRANSITION_QUEUE_CAPACITY)
    }

    /// # Panics
    ///
    /// Panics if two alerts share a name.
    pub fn with_capacity(alerts: Vec<Box<dyn Alert>>, capacity: usize) -> Self {
        for (i, alert) in alerts.iter().enumerate() {
            assert!(
                alerts[..i].iter().all(|other| other.name() != alert.name()),
                "duplicate alert '{}'",
                alert.name()
            );
        }

        let (tx, rx) = mpsc::sync_channel(capacity);

        Self {
            alerts,
            published: HashMap::new(),
            transitions: tx,
            subscriber: Some(rx),
        }
    }

    pub fn evaluate(&mut self, metric: &Metric<'_>) -> Result<(), AlertError> {
        for alert in self.alerts.iter_mut() {
            let state = alert.eval(metric);
            let name = alert.name();
            let previous = self.published.insert(name, state);

            if previous == Some(state) {
                continue;
            }

            let transition = AlertStateTransition {
                previous: previous.unwrap_or_default(),
                alert: alert.snapshot(),
                time: alert.eval_time(),
                published_once: previous.is_some(),
            };

            info!(
                event = "alert_transition",
                alert = %name,
                from = %transition.previous,
                to = %state,
                eval_time = transition.time,
                first = !transition.published_once
            );

            self.transitions
                .send(transition)
                .map_err(|_| AlertError::Disconnected)?;
        }

        Ok(())
    }

    /// Hands out the transition stream. There is a single stream, so only the
    /// first call returns it.
    pub fn subscribe(&mut self) -> Option<AlertStream> {
        self.subscriber.take().map(|rx| AlertStream { rx })
    }

    pub fn alerts(&self) -> impl Iterator<Item = &dyn Alert> {
        self.alerts.iter().map(|alert| alert.as_ref())
    }
}

/// Read side of the transition queue, in publication order.
pub struct AlertStream {
    rx: Receiver<AlertStateTransition>,
}

impl AlertStream {
    /// Next transition if one is waiting, without blocking.
    pub fn try_next(&self) -> Option<AlertStateTransition> {
        self.rx.try_recv().ok()
    }

    /// Every transition waiting right now.
    pub fn drain(&self) -> impl Iterator<Item = AlertStateTransition> + '_ {
        self.rx.try_iter()
    }

    /// Waits up to `timeout`. `Err` means the manager is gone.
    pub fn recv_timeout(
        &self,
        timeout: Duration,
    ) -> Result<Option<AlertStateTransition>, AlertError> {
        match self.rx.recv_timeout(timeout) {
            Ok(transition) => Ok(Some(transition)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(AlertError::Disconnected),
        }
    }
}
