use crate::source::{IDLE_POLL, SourceError};
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::thread::{self, JoinHandle};

/// Shared flag asking background readers (and the ingest loop) to stop.
///
/// Raising it is sticky: a source never reopens after being stopped.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Turns the raw bytes of one line into text, without its line terminator.
/// Bytes that are not valid UTF-8 become U+FFFD.
pub(crate) fn decode_line(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    text.trim_end_matches(['\r', '\n']).to_string()
}

/// Producer side handed to a background reader.
pub(crate) struct LineSink {
    lines: SyncSender<io::Result<String>>,
    stop: StopSignal,
}

impl LineSink {
    /// Blocks while the buffer is full. Returns `false` once nobody listens anymore.
    pub(crate) fn push(&self, line: io::Result<String>) -> bool {
        !self.stop.is_raised() && self.lines.send(line).is_ok()
    }

    pub(crate) fn stopped(&self) -> bool {
        self.stop.is_raised()
    }
}

/// Consumer side of a bounded line buffer filled by a background thread.
pub(crate) struct LineBuffer {
    lines: Option<Receiver<io::Result<String>>>,
    stop: StopSignal,
    worker: Option<JoinHandle<()>>,
    join_on_close: bool,
}

impl LineBuffer {
    pub(crate) fn spawn<F>(
        name: &str,
        capacity: usize,
        stop: StopSignal,
        join_on_close: bool,
        reader: F,
    ) -> io::Result<Self>
    where
        F: FnOnce(LineSink) + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel(capacity);
        let sink = LineSink {
            lines: tx,
            stop: stop.clone(),
        };

        let worker = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || reader(sink))?;

        Ok(Self {
            lines: Some(rx),
            stop,
            worker: Some(worker),
            join_on_close,
        })
    }

    /// Waits for the next line, checking the stop signal between polls so a
    /// stopped source unblocks its reader even if the producer is stuck.
    pub(crate) fn recv(&self) -> Result<String, SourceError> {
        let lines = self.lines.as_ref().ok_or(SourceError::Closed)?;

        loop {
            if self.stop.is_raised() {
                return Err(SourceError::Closed);
            }

            match lines.recv_timeout(IDLE_POLL) {
                Ok(Ok(line)) => return Ok(line),
                Ok(Err(e)) => return Err(SourceError::Read(e)),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return Err(SourceError::Closed),
            }
        }
    }

    pub(crate) fn shutdown(&mut self) {
        self.stop.raise();

        // Dropping the receiver fails any send the worker is blocked on.
        self.lines = None;

        if let Some(worker) = self.worker.take() {
            if self.join_on_close {
                let _ = worker.join();
            }
        }
    }
}

impl Drop for LineBuffer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
