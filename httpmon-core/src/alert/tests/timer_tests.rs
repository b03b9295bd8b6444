use crate::alert::tests::rates;
use crate::alert::{MetricTimer, SystemTimer, Timer};
use pretty_assertions::assert_eq;
use std::thread::sleep;
use std::time::Duration;

//-----------------------------------------------------------------------------
// SystemTimer
//-----------------------------------------------------------------------------

#[test]
fn system_timer_is_not_over_within_its_period() {
    // Arrange
    let mut timer = SystemTimer::new(Duration::from_secs(3600));

    // Act
    timer.start();
    let first = timer.over();
    sleep(Duration::from_millis(100));
    let second = timer.over();

    // Assert
    assert!(!first);
    assert!(!second);
}

#[test]
fn system_timer_is_over_after_its_period() {
    // Arrange
    let mut timer = SystemTimer::new(Duration::from_millis(100));

    // Act
    timer.start();
    sleep(Duration::from_millis(250));

    // Assert
    assert!(timer.over());
}

#[test]
fn unstarted_system_timer_is_over() {
    // Arrange
    let timer = SystemTimer::new(Duration::from_secs(3600));

    // Act
    let over = timer.over();

    // Assert
    assert!(over);
}

#[test]
fn system_timer_now_is_wall_clock() {
    // Arrange
    let timer = SystemTimer::new(Duration::from_secs(1));
    let before = chrono::Utc::now().timestamp();

    // Act
    let now = timer.now();

    // Assert
    assert!(now >= before && now <= before + 1);
}

//-----------------------------------------------------------------------------
// MetricTimer
//-----------------------------------------------------------------------------

#[test]
fn metric_timer_starts_at_the_observed_scrape_time() {
    // Arrange
    let mut timer = MetricTimer::new(Duration::from_secs(60));
    timer.observe(&rates(1_000, &[1.0]));

    // Act
    let started = timer.start();

    // Assert
    assert_eq!(started, 1_000);
    assert_eq!(timer.now(), 1_000);
}

#[test]
fn metric_timer_is_over_strictly_after_its_period() {
    // Arrange
    let mut timer = MetricTimer::new(Duration::from_secs(60));
    timer.observe(&rates(1_000, &[1.0]));
    timer.start();

    // Act
    timer.observe(&rates(1_060, &[1.0]));
    let at_period = timer.over();
    timer.observe(&rates(1_061, &[1.0]));
    let past_period = timer.over();

    // Assert
    assert!(!at_period);
    assert!(past_period);
    assert_eq!(timer.now(), 1_061);
}

#[test]
fn metric_timer_ignores_the_wall_clock() {
    // Arrange
    let mut timer = MetricTimer::new(Duration::from_secs(1));
    timer.observe(&rates(50, &[1.0]));
    timer.start();

    // Act
    sleep(Duration::from_millis(1_100));

    // Assert
    assert!(!timer.over());
}

#[test]
fn unstarted_metric_timer_is_over() {
    // Arrange
    let mut timer = MetricTimer::new(Duration::from_secs(3600));

    // Act
    timer.observe(&rates(10, &[1.0]));

    // Assert
    assert!(timer.over());
}

#[test]
fn metric_timer_without_metric_is_over() {
    // Arrange
    let mut timer = MetricTimer::new(Duration::from_secs(3600));

    // Act
    let started = timer.start();

    // Assert
    assert_eq!(started, 0);
    assert_eq!(timer.now(), 0);
    assert!(timer.over());
}

#[test]
fn metric_timer_near_the_end_of_the_timeline_is_not_over() {
    // Arrange
    let mut timer = MetricTimer::new(Duration::from_secs(10));
    timer.observe(&rates(i64::MAX - 5, &[1.0]));
    timer.start();

    // Act
    timer.observe(&rates(i64::MAX, &[1.0]));

    // Assert
    assert!(!timer.over());
    assert_eq!(timer.now(), i64::MAX);
}

#[test]
fn metric_timer_with_an_unbounded_period_is_never_over() {
    // Arrange
    let mut timer = MetricTimer::new(Duration::from_secs(u64::MAX));
    timer.observe(&rates(0, &[1.0]));
    timer.start();

    // Act
    timer.observe(&rates(i64::MAX, &[1.0]));

    // Assert
    assert!(!timer.over());
}
