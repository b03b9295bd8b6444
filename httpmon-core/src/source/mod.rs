//! Line sources feeding the ingestor.
//!
//! A source delivers raw log lines in order, one per [`LineSource::read`].
//! Both concrete sources read on a background thread into a bounded buffer so
//! a slow pipeline pushes back on the underlying reader. Blank lines mean
//! "no data yet" and are never delivered.

mod buffer;
mod error;
mod stream;
mod tail;

#[cfg(test)]
mod tests;

pub use buffer::StopSignal;
pub use error::SourceError;
pub use stream::StreamSource;
pub use tail::TailSource;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// How long background readers wait before looking for new data.
pub(crate) const IDLE_POLL: Duration = Duration::from_millis(100);

/// Identifies where lines come from: standard input or a file to follow.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(from = "String", into = "String")]
pub enum SourceId {
    #[default]
    Stdin,
    File(PathBuf),
}

impl SourceId {
    pub const STDIN: &'static str = "stdin";
}

impl From<String> for SourceId {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case(Self::STDIN) {
            SourceId::Stdin
        } else {
            SourceId::File(PathBuf::from(value))
        }
    }
}

impl From<&str> for SourceId {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<SourceId> for String {
    fn from(value: SourceId) -> Self {
        value.to_string()
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceId::Stdin => f.write_str(SourceId::STDIN),
            SourceId::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub trait LineSource: Send {
    /// Starts delivering lines from `source`.
    fn open(&mut self, source: &SourceId) -> Result<(), SourceError>;

    /// Blocks until the next non-empty line is available.
    fn read(&mut self) -> Result<String, SourceError>;

    /// Stops the background reader and releases its resources.
    fn close(&mut self) -> Result<(), SourceError>;
}

/// Builds the source matching `source`, buffering at most `capacity` lines.
pub fn new_source(source: &SourceId, capacity: usize, stop: StopSignal) -> Box<dyn LineSource> {
    match source {
        SourceId::Stdin => Box::new(StreamSource::stdin(capacity, stop)),
        SourceId::File(_) => Box::new(TailSource::new(capacity, stop)),
    }
}
