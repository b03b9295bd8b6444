use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricError {
    #[error("no metric named '{name}'")]
    NotFound { name: String },

    #[error("metric '{name}' is a {found}, expected a {expected}")]
    ShapeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}
