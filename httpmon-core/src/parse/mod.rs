//! Access-log line parsing.
//!
//! A parser is fed one raw line at a time. Formats that start with a header
//! (like the CSV access log) answer [`ParseOutcome::Header`] while that header
//! is being consumed: callers skip the line and keep going, it is neither a
//! record nor a fault.

mod csv;
mod error;


pub use csv::CsvParser;
pub use error::ParseError;

use crate::record::CallRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Record(CallRecord),
    Header,
}

pub trait RecordParser: Send {
    fn parse(&mut self, raw: &str) -> Result<ParseOutcome, ParseError>;
}
