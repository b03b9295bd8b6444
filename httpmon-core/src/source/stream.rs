use crate::source::buffer::{LineBuffer, LineSink, decode_line};
use crate::source::{IDLE_POLL, LineSource, SourceError, SourceId, StopSignal};
use std::io::{self, BufRead};
use std::thread;
use tracing::{debug, info};

type BoxedReader = Box<dyn BufRead + Send>;

/// Reads a byte stream (standard input by default) line by line.
///
/// End of stream is not the end of the source: like an idle terminal, the
/// reader keeps waiting for more data until the source is closed.
pub struct StreamSource {
    capacity: usize,
    stop: StopSignal,
    reader: Option<BoxedReader>,
    buffer: Option<LineBuffer>,
}

impl StreamSource {
    pub fn stdin(capacity: usize, stop: StopSignal) -> Self {
        Self::from_reader(io::BufReader::new(io::stdin()), capacity, stop)
    }

    /// Any buffered reader can stand in for standard input.
    pub fn from_reader(
        reader: impl BufRead + Send + 'static,
        capacity: usize,
        stop: StopSignal,
    ) -> Self {
        Self {
            capacity,
            stop,
            reader: Some(Box::new(reader)),
            buffer: None,
        }
    }
}

impl LineSource for StreamSource {
    fn open(&mut self, source: &SourceId) -> Result<(), SourceError> {
        if !matches!(source, SourceId::Stdin) {
            return Err(SourceError::Unsupported {
                source_id: source.to_string(),
            });
        }

        let reader = self.reader.take().ok_or(SourceError::AlreadyOpen)?;

        // Never joined: a thread blocked on a read from a terminal cannot be
        // interrupted, it exits after its next line.
        let buffer = LineBuffer::spawn(
            "httpmon-stdin",
            self.capacity,
            self.stop.clone(),
            false,
            move |sink| pump(reader, sink),
        )?;

        self.buffer = Some(buffer);
        info!(event = "source_opened", source = %source);

        Ok(())
    }

    fn read(&mut self) -> Result<String, SourceError> {
        self.buffer.as_ref().ok_or(SourceError::NotOpen)?.recv()
    }

    fn close(&mut self) -> Result<(), SourceError> {
        let mut buffer = self.buffer.take().ok_or(SourceError::NotOpen)?;
        buffer.shutdown();
        info!(event = "source_closed", source = SourceId::STDIN);

        Ok(())
    }
}

fn pump(mut reader: BoxedReader, sink: LineSink) {
    let mut line = Vec::new();

    while !sink.stopped() {
        line.clear();

        match reader.read_until(b'\n', &mut line) {
            Ok(0) => {
                // Nothing is going on, check again later.
                thread::sleep(IDLE_POLL);
            }
            Ok(_) => {
                let decoded = decode_line(&line);
                if decoded.is_empty() {
                    continue;
                }
                if !sink.push(Ok(decoded)) {
                    break;
                }
            }
            Err(e) => {
                sink.push(Err(e));
                break;
            }
        }
    }

    debug!(event = "stream_reader_stopped");
}
