use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read line: {0}")]
    Read(#[from] std::io::Error),

    #[error("source '{source_id}' is not supported by this reader")]
    Unsupported { source_id: String },

    #[error("line source is not open")]
    NotOpen,

    #[error("line source is already open")]
    AlreadyOpen,

    #[error("line source is closed")]
    Closed,
}
