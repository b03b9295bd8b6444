mod report;

pub use report::{Severity, ValidationIssue, ValidationReport};

use crate::conf::{ConfigError, MonitorConfig};
use crate::source::SourceId;
use std::time::Duration;

const MIN_PERIOD: Duration = Duration::from_secs(1);

/// Checks `config` before any pipeline component is built.
///
/// Every violation is collected. Returns the report (warnings only) when no
/// error was found.
pub fn validate(config: &MonitorConfig) -> Result<ValidationReport, ConfigError> {
    let mut report = ValidationReport::default();

    validate_source(&config.source, &mut report);
    validate_period("period", config.period, &mut report);
    if config.read_buffer < 1 {
        report.read_buffer_too_small(config.read_buffer);
    }

    validate_period("alert.period", config.alert.period, &mut report);

    let rps = &config.alert.requests_per_second;
    validate_period("alert.requests_per_second.period", rps.period, &mut report);
    if !rps.threshold.is_finite() || rps.threshold < 0.0 {
        report.invalid_threshold("alert.requests_per_second.threshold", rps.threshold);
    }
    if rps.enabled
        && rps.period >= MIN_PERIOD
        && config.period >= MIN_PERIOD
        && rps.period < config.period
    {
        report.alert_period_below_window(rps.period, config.period);
    }

    if report.errors.is_empty() {
        Ok(report)
    } else {
        Err(ConfigError::Validation { report })
    }
}

fn validate_source(source: &SourceId, report: &mut ValidationReport) {
    if let SourceId::File(path) = source {
        if path.as_os_str().is_empty() {
            report.empty_source_path();
        }
    }
}

fn validate_period(key: &'static str, period: Duration, report: &mut ValidationReport) {
    if period < MIN_PERIOD {
        report.period_too_short(key, period);
    }
}
