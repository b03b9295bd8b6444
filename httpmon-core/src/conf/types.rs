use crate::source::SourceId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Everything needed to build a pipeline.
///
/// Every field has a default, so an empty TOML document is a valid config.
/// Durations are written in humantime form (`"10s"`, `"1m"`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonitorConfig {
    /// `stdin` or the path of a log file to follow.
    pub source: SourceId,

    /// Width of a requests/second window.
    #[serde(with = "humantime_serde")]
    pub period: Duration,

    /// Capacity of the line buffer and of the record queue.
    pub read_buffer: usize,

    pub alert: AlertConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            source: SourceId::Stdin,
            period: Duration::from_secs(10),
            read_buffer: 100,
            alert: AlertConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlertConfig {
    /// How often consumers look for new alert transitions.
    #[serde(with = "humantime_serde")]
    pub period: Duration,

    pub requests_per_second: RequestsPerSecondConfig,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
            requests_per_second: RequestsPerSecondConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RequestsPerSecondConfig {
    pub enabled: bool,

    /// How long the rate must stay at or above `threshold` before the alert fires.
    #[serde(with = "humantime_serde")]
    pub period: Duration,

    /// Requests per second.
    pub threshold: f64,
}

impl Default for RequestsPerSecondConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            period: Duration::from_secs(60),
            threshold: 10.0,
        }
    }
}
