use crate::source::buffer::{LineBuffer, LineSink, decode_line};
use crate::source::{IDLE_POLL, LineSource, SourceError, SourceId, StopSignal};
use std::fs::{self, File, Metadata};
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::thread;
use tracing::{debug, info};

/// Follows a file from its beginning, like `tail -F`.
///
/// Appended lines are delivered as they are written. When the file is
/// truncated it is read again from the start; when the path is replaced
/// (log rotation) the new file is opened.
pub struct TailSource {
    capacity: usize,
    stop: StopSignal,
    path: Option<PathBuf>,
    buffer: Option<LineBuffer>,
}

impl TailSource {
    pub fn new(capacity: usize, stop: StopSignal) -> Self {
        Self {
            capacity,
            stop,
            path: None,
            buffer: None,
        }
    }
}

impl LineSource for TailSource {
    fn open(&mut self, source: &SourceId) -> Result<(), SourceError> {
        let SourceId::File(path) = source else {
            return Err(SourceError::Unsupported {
                source_id: source.to_string(),
            });
        };
        if self.buffer.is_some() {
            return Err(SourceError::AlreadyOpen);
        }

        let follower = Follower::open(path).map_err(|e| SourceError::Open {
            path: path.clone(),
            source: e,
        })?;

        let buffer = LineBuffer::spawn(
            "httpmon-tail",
            self.capacity,
            self.stop.clone(),
            true,
            move |sink| follower.run(sink),
        )?;

        self.path = Some(path.clone());
        self.buffer = Some(buffer);
        info!(event = "source_opened", source = %path.display());

        Ok(())
    }

    fn read(&mut self) -> Result<String, SourceError> {
        self.buffer.as_ref().ok_or(SourceError::NotOpen)?.recv()
    }

    fn close(&mut self) -> Result<(), SourceError> {
        let mut buffer = self.buffer.take().ok_or(SourceError::NotOpen)?;
        buffer.shutdown();

        if let Some(path) = self.path.take() {
            info!(event = "source_closed", source = %path.display());
        }

        Ok(())
    }
}

//-----------------------------------------------------------------------------
// Background follower
//-----------------------------------------------------------------------------

/// Identity of the file behind a path, used to detect rotation.
type FileIdentity = Option<(u64, u64)>;

#[cfg(unix)]
fn file_identity(meta: &Metadata) -> FileIdentity {
    use std::os::unix::fs::MetadataExt;
    Some((meta.dev(), meta.ino()))
}

#[cfg(not(unix))]
fn file_identity(_meta: &Metadata) -> FileIdentity {
    None
}

enum FileChange {
    Unchanged,
    Truncated,
    Replaced,
}

struct Follower {
    path: PathBuf,
    reader: BufReader<File>,
    identity: FileIdentity,
    position: u64,
    // Bytes of a line whose end has not been written yet.
    partial: Vec<u8>,
}

impl Follower {
    fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        let identity = file_identity(&file.metadata()?);

        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            identity,
            position: 0,
            partial: Vec::new(),
        })
    }

    fn run(mut self, sink: LineSink) {
        let mut chunk = Vec::new();

        while !sink.stopped() {
            chunk.clear();

            match self.reader.read_until(b'\n', &mut chunk) {
                Ok(0) => {
                    if let Err(e) = self.on_eof() {
                        sink.push(Err(e));
                        break;
                    }
                }
                Ok(n) => {
                    self.position += n as u64;
                    self.partial.extend_from_slice(&chunk);

                    if !self.partial.ends_with(b"\n") {
                        continue;
                    }

                    let line = decode_line(&self.partial);
                    self.partial.clear();

                    if !line.is_empty() && !sink.push(Ok(line)) {
                        break;
                    }
                }
                Err(e) => {
                    sink.push(Err(e));
                    break;
                }
            }
        }

        debug!(event = "tail_reader_stopped", path = %self.path.display());
    }

    fn on_eof(&mut self) -> io::Result<()> {
        match self.detect_change() {
            FileChange::Unchanged => thread::sleep(IDLE_POLL),
            FileChange::Truncated => {
                self.reader.seek(SeekFrom::Start(0))?;
                self.position = 0;
                self.partial.clear();
                info!(event = "source_reopened", path = %self.path.display(), reason = "truncated");
            }
            FileChange::Replaced => {
                let file = File::open(&self.path)?;
                self.identity = file_identity(&file.metadata()?);
                self.reader = BufReader::new(file);
                self.position = 0;
                self.partial.clear();
                info!(event = "source_reopened", path = %self.path.display(), reason = "replaced");
            }
        }

        Ok(())
    }

    fn detect_change(&self) -> FileChange {
        // A missing path is a rotation in progress: keep waiting.
        let Ok(meta) = fs::metadata(&self.path) else {
            return FileChange::Unchanged;
        };

        if file_identity(&meta) != self.identity {
            FileChange::Replaced
        } else if meta.len() < self.position {
            FileChange::Truncated
        } else {
            FileChange::Unchanged
        }
    }
}
