mod error;
mod loader;
mod types;
pub mod validation;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use loader::{load_config, parse_config, read_config};
pub use types::{AlertConfig, MonitorConfig, RequestsPerSecondConfig};
pub use validation::{ValidationReport, validate};
