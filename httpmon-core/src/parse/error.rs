use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    //-------------------------------------------------------------------------
    // Line shape
    //-------------------------------------------------------------------------
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid header field at position {position}: expected '{expected}', found '{found}'")]
    HeaderField {
        position: usize,
        expected: &'static str,
        found: String,
    },

    //-------------------------------------------------------------------------
    // Fields
    //-------------------------------------------------------------------------
    #[error("invalid date '{value}': expected unix epoch seconds")]
    InvalidDate { value: String },

    #[error("malformed request '{value}': expected 'METHOD /path PROTOCOL/VERSION'")]
    MalformedRequest { value: String },

    #[error("unknown http method '{value}'")]
    UnknownMethod { value: String },

    #[error("empty url path")]
    EmptyPath,

    #[error("url path '{path}' has no section")]
    MissingSection { path: String },

    #[error("malformed http version '{value}'")]
    MalformedVersion { value: String },

    #[error("invalid status code '{value}'")]
    InvalidStatus { value: String },

    #[error("status code {status} is out of range [100, 599]")]
    StatusOutOfRange { status: i64 },

    #[error("invalid bytes count '{value}'")]
    InvalidBytes { value: String },
}

impl ParseError {
    /// Name of the log field that failed, if the failure is field-level.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::FieldCount { .. } | Self::HeaderField { .. } => None,
            Self::InvalidDate { .. } => Some("date"),
            Self::MalformedRequest { .. }
            | Self::UnknownMethod { .. }
            | Self::EmptyPath
            | Self::MissingSection { .. }
            | Self::MalformedVersion { .. } => Some("request"),
            Self::InvalidStatus { .. } | Self::StatusOutOfRange { .. } => Some("status"),
            Self::InvalidBytes { .. } => Some("bytes"),
        }
    }
}
