use crate::alert::{Alert, AlertName, AlertRule, AlertState, SystemTimer, Timer};
use crate::metrics::Metric;
use crate::record::UnixSeconds;
use std::time::Duration;

/// Hysteresis state machine shared by every alert.
pub struct BaseAlert {
    timer: Box<dyn Timer>,
    period: Duration,
    rule: AlertRule,
    eval_time: UnixSeconds,
    state: AlertState,
}

impl BaseAlert {
    /// Alert timed on the wall clock.
    pub fn new(period: Duration, rule: AlertRule) -> Self {
        Self::with_timer(period, Box::new(SystemTimer::new(period)), rule)
    }

    pub fn with_timer(period: Duration, timer: Box<dyn Timer>, rule: AlertRule) -> Self {
        Self {
            timer,
            period,
            rule,
            eval_time: 0,
            state: AlertState::Inactive,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn state(&self) -> AlertState {
        self.state
    }

    pub fn eval_time(&self) -> UnixSeconds {
        self.eval_time
    }

    /// Runs the rule against `metric` and moves to the next state.
    ///
    /// Entering `Pending` always starts the timer, so `Active` is only
    /// reached once the timer is over on a later evaluation.
    pub fn eval(&mut self, metric: &Metric<'_>) -> AlertState {
        self.timer.observe(metric);

        self.state = if (self.rule)(metric) {
            match self.state {
                AlertState::Inactive => {
                    self.timer.start();
                    AlertState::Pending
                }
                AlertState::Pending if self.timer.over() => AlertState::Active,
                held => held,
            }
        } else {
            AlertState::Inactive
        };

        self.eval_time = self.timer.now();
        self.state
    }
}

impl Alert for BaseAlert {
    fn name(&self) -> AlertName {
        AlertName("BaseAlert")
    }

    fn state(&self) -> AlertState {
        self.state
    }

    fn eval(&mut self, metric: &Metric<'_>) -> AlertState {
        BaseAlert::eval(self, metric)
    }

    fn eval_time(&self) -> UnixSeconds {
        self.eval_time
    }

    fn description(&self) -> String {
        "BaseAlert".to_string()
    }
}
