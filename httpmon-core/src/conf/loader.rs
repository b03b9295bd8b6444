use crate::conf::{ConfigError, MonitorConfig, validate};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Reads and validates `path`. Validation warnings are logged.
pub fn load_config(path: &Path) -> Result<MonitorConfig, ConfigError> {
    let config = read_config(path)?;
    let report = validate(&config)?;

    for issue in &report.warnings {
        warn!(event = "config_warning", key = issue.key, message = %issue.message);
    }

    Ok(config)
}

/// Reads `path` without validating it, so CLI overrides can still apply.
pub fn read_config(path: &Path) -> Result<MonitorConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    parse_config(path, &raw)
}

pub fn parse_config(path: &Path, raw: &str) -> Result<MonitorConfig, ConfigError> {
    toml::from_str(raw).map_err(|e| ConfigError::parse(path, e))
}
