use crate::metrics::tests::record;
use crate::metrics::{Counter, Metric, Prober, REQS_PER_HOST, RequestsPerHost};
use pretty_assertions::assert_eq;
use std::collections::HashMap;

#[test]
fn counts_per_host_and_total() {
    // Arrange
    let prober = RequestsPerHost::new();

    // Act
    prober.update(&record(10, "10.0.0.1", "/api", 200));
    prober.update(&record(11, "10.0.0.2", "/api", 200));
    prober.update(&record(12, "10.0.0.1", "/report", 500));
    let counter = Counter::try_from(prober.copy_snapshot()).unwrap();

    // Assert
    assert_eq!(counter.total(), 3);
    assert_eq!(
        counter.labels(),
        &HashMap::from([("10.0.0.1".to_string(), 2), ("10.0.0.2".to_string(), 1)])
    );
}

#[test]
fn scrape_time_follows_the_last_record() {
    // Arrange
    let prober = RequestsPerHost::new();
    prober.update(&record(10, "a", "/", 200));
    prober.update(&record(42, "a", "/", 200));

    // Act
    let metric = prober.copy_snapshot();

    // Assert
    assert_eq!(metric.name(), REQS_PER_HOST);
    assert_eq!(metric.scrape_time(), 42);
}

#[test]
fn empty_prober_reports_nothing() {
    // Arrange
    let mut prober = RequestsPerHost::new();

    // Act
    let metric = prober.live_snapshot();

    // Assert
    let Metric::Counter(counter) = metric else {
        panic!("expected a counter, got {metric:?}");
    };
    assert_eq!(counter.total(), 0);
    assert!(counter.labels().is_empty());
    assert_eq!(counter.scrape_time, 0);
}

#[test]
fn copy_is_detached_from_later_updates() {
    // Arrange
    let prober = RequestsPerHost::new();
    prober.update(&record(1, "a", "/", 200));
    let before = prober.copy_snapshot();

    // Act
    prober.update(&record(2, "a", "/", 200));
    prober.update(&record(3, "b", "/", 200));

    // Assert
    let counter = Counter::try_from(before).unwrap();
    assert_eq!(counter.total(), 1);
    assert_eq!(counter.labels(), &HashMap::from([("a".to_string(), 1)]));
    assert_eq!(counter.scrape_time, 1);
}
