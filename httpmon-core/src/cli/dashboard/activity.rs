use crate::alert::{AlertName, AlertSnapshot, AlertState, AlertStateTransition};
use crate::cli::dashboard::constants::ACTIVITY_LOG_CAPACITY;
use crate::record::UnixSeconds;
use std::collections::{BTreeMap, VecDeque};

/// Latest known state of every alert, plus a log of firings and recoveries.
///
/// Owned by the dashboard: created when it starts and dropped with it.
#[derive(Debug, Default)]
pub struct AlertActivity {
    board: BTreeMap<&'static str, AlertSnapshot>,
    log: VecDeque<ActivityEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub time: UnixSeconds,
    pub name: AlertName,
    pub state: AlertState,
}

impl AlertActivity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only `Active` and recoveries from `Active` are logged; `Pending` is
    /// shown on the board but never logged.
    pub fn record(&mut self, transition: AlertStateTransition) {
        let state = transition.alert.state;
        let name = transition.alert.name;

        let logged = match state {
            AlertState::Active => true,
            AlertState::Inactive => transition.previous == AlertState::Active,
            AlertState::Pending => false,
        };
        if logged {
            if self.log.len() == ACTIVITY_LOG_CAPACITY {
                self.log.pop_front();
            }
            self.log.push_back(ActivityEntry {
                time: transition.time,
                name,
                state,
            });
        }

        self.board.insert(name.0, transition.alert);
    }

    /// Alerts currently in `state`, by name.
    pub fn in_state(&self, state: AlertState) -> impl Iterator<Item = &AlertSnapshot> {
        self.board.values().filter(move |alert| alert.state == state)
    }

    pub fn enabled(&self) -> usize {
        self.board.len()
    }

    /// Oldest first.
    pub fn log(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.log.iter()
    }
}
