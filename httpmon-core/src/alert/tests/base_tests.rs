use crate::alert::tests::{ScriptedTimer, rates};
use crate::alert::{AlertState, BaseAlert, MetricTimer};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

//-----------------------------------------------------------------------------
// Test helpers
//-----------------------------------------------------------------------------

fn alert_with(rule: bool, timer: &ScriptedTimer) -> BaseAlert {
    BaseAlert::with_timer(
        Duration::from_secs(1),
        Box::new(timer.clone()),
        Box::new(move |_| rule),
    )
}

//-----------------------------------------------------------------------------
// Tests
//-----------------------------------------------------------------------------

#[test]
fn false_rule_is_always_inactive() {
    // Arrange
    let timer = ScriptedTimer::default();
    let mut alert = alert_with(false, &timer);
    let metric = rates(0, &[]);

    // Act
    let states = [alert.eval(&metric), alert.eval(&metric), alert.eval(&metric)];

    // Assert
    assert_eq!(states, [AlertState::Inactive; 3]);
    assert_eq!(timer.starts(), 0);
}

#[test]
fn true_rule_goes_pending_then_active_once_timer_is_over() {
    // Arrange
    let timer = ScriptedTimer::default();
    let mut alert = alert_with(true, &timer);
    let metric = rates(0, &[]);

    // Act
    let first = alert.eval(&metric);
    let second = alert.eval(&metric);
    timer.set_over(true);
    let third = alert.eval(&metric);
    let fourth = alert.eval(&metric);

    // Assert
    assert_eq!(first, AlertState::Pending);
    assert_eq!(second, AlertState::Pending);
    assert_eq!(third, AlertState::Active);
    assert_eq!(fourth, AlertState::Active);
    assert_eq!(timer.starts(), 1);
}

#[test]
fn failing_rule_resets_immediately() {
    // Arrange
    let holds = Arc::new(AtomicBool::new(true));
    let timer = ScriptedTimer::default();
    timer.set_over(true);
    let rule_holds = holds.clone();
    let mut alert = BaseAlert::with_timer(
        Duration::from_secs(1),
        Box::new(timer.clone()),
        Box::new(move |_| rule_holds.load(Ordering::SeqCst)),
    );
    let metric = rates(0, &[]);
    alert.eval(&metric);
    alert.eval(&metric);

    // Act
    holds.store(false, Ordering::SeqCst);
    let reset = alert.eval(&metric);
    holds.store(true, Ordering::SeqCst);
    let rearmed = alert.eval(&metric);

    // Assert
    assert_eq!(reset, AlertState::Inactive);
    assert_eq!(rearmed, AlertState::Pending);
    assert_eq!(timer.starts(), 2);
}

#[test]
fn over_timer_still_passes_through_pending() {
    // Arrange
    let timer = ScriptedTimer::default();
    timer.set_over(true);
    let mut alert = alert_with(true, &timer);
    let metric = rates(0, &[]);

    // Act
    let first = alert.eval(&metric);
    let second = alert.eval(&metric);

    // Assert
    assert_eq!(first, AlertState::Pending);
    assert_eq!(second, AlertState::Active);
}

#[test]
fn eval_time_comes_from_the_timer() {
    // Arrange
    let mut alert = BaseAlert::with_timer(
        Duration::from_secs(10),
        Box::new(MetricTimer::new(Duration::from_secs(10))),
        Box::new(|_| true),
    );

    // Act
    alert.eval(&rates(500, &[1.0]));
    let first = alert.eval_time();
    alert.eval(&rates(520, &[1.0]));

    // Assert
    assert_eq!(first, 500);
    assert_eq!(alert.eval_time(), 520);
    assert_eq!(alert.state(), AlertState::Active);
}

#[test]
fn fresh_metric_timed_alert_waits_a_full_period() {
    // Arrange
    let mut alert = BaseAlert::with_timer(
        Duration::from_secs(10),
        Box::new(MetricTimer::new(Duration::from_secs(10))),
        Box::new(|_| true),
    );

    // Act
    let states: Vec<AlertState> = [100, 105, 110, 111]
        .into_iter()
        .map(|time| alert.eval(&rates(time, &[1.0])))
        .collect();

    // Assert
    assert_eq!(
        states,
        vec![
            AlertState::Pending,
            AlertState::Pending,
            AlertState::Pending,
            AlertState::Active
        ]
    );
}
