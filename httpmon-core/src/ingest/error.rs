use crate::parse::ParseError;
use crate::source::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("line source failed: {0}")]
    Source(#[from] SourceError),

    #[error("malformed log line: {0}")]
    Parse(#[from] ParseError),

    #[error("record queue is disconnected")]
    Disconnected,
}
