//! Drives a [`LineSource`] through a [`RecordParser`] into a bounded record queue.
//!
//! The queue is the hand-off between the ingest thread and the aggregation
//! loop. Its capacity is the configured read buffer: when it is full the
//! ingest side blocks, which in turn stops pulling lines from the source.

mod error;


pub use error::IngestError;

use crate::parse::{ParseOutcome, RecordParser};
use crate::record::CallRecord;
use crate::source::{LineSource, SourceId};
use std::sync::mpsc::{self, Receiver, SyncSender};
use tracing::info;

pub struct Ingestor {
    feed: Feed,
    queue: RecordQueue,
}

impl Ingestor {
    pub fn new(
        source_id: SourceId,
        source: Box<dyn LineSource>,
        parser: Box<dyn RecordParser>,
        capacity: usize,
    ) -> Self {
        let (tx, rx) = mpsc::sync_channel(capacity);

        Self {
            feed: Feed {
                source_id,
                source,
                parser,
                records: tx,
            },
            queue: RecordQueue { records: rx },
        }
    }

    pub fn init(&mut self) -> Result<(), IngestError> {
        self.feed.init()
    }

    /// See [`Feed::ingest_once`]. Blocks forever if the queue is full, since
    /// nothing else drains it on this thread.
    pub fn ingest_once(&mut self) -> Result<(), IngestError> {
        self.feed.ingest_once()
    }

    pub fn poll_one(&self) -> Result<CallRecord, IngestError> {
        self.queue.poll_one()
    }

    pub fn close(&mut self) -> Result<(), IngestError> {
        self.feed.close()
    }

    /// Separates the producing half from the consuming half so each can live
    /// on its own thread.
    pub fn split(self) -> (Feed, RecordQueue) {
        (self.feed, self.queue)
    }
}

/// Producing half: owns the source and the parser.
pub struct Feed {
    source_id: SourceId,
    source: Box<dyn LineSource>,
    parser: Box<dyn RecordParser>,
    records: SyncSender<CallRecord>,
}

impl Feed {
    pub fn source_id(&self) -> &SourceId {
        &self.source_id
    }

    pub fn init(&mut self) -> Result<(), IngestError> {
        self.source.open(&self.source_id)?;
        info!(event = "ingest_started", source = %self.source_id);
        Ok(())
    }

    /// Reads and parses exactly one line.
    ///
    /// A header line is consumed without producing anything. Any other parse
    /// failure is returned and the stream must be considered broken: calling
    /// again would silently desynchronize counts from the log.
    pub fn ingest_once(&mut self) -> Result<(), IngestError> {
        let raw = self.source.read()?;

        match self.parser.parse(&raw)? {
            ParseOutcome::Header => Ok(()),
            ParseOutcome::Record(record) => self
                .records
                .send(record)
                .map_err(|_| IngestError::Disconnected),
        }
    }

    pub fn close(&mut self) -> Result<(), IngestError> {
        self.source.close()?;
        Ok(())
    }
}

/// Consuming half of the record queue.
pub struct RecordQueue {
    records: Receiver<CallRecord>,
}

impl RecordQueue {
    /// Blocks until a record is available, in FIFO order.
    pub fn poll_one(&self) -> Result<CallRecord, IngestError> {
        self.records.recv().map_err(|_| IngestError::Disconnected)
    }
}
