use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;

pub const HEADER: &str = "\"remotehost\",\"rfc931\",\"authuser\",\"date\",\"request\",\"status\",\"bytes\"";

/// One access-log data line, quoted the way the log producer writes it.
pub fn log_line(host: &str, time: i64, request: &str, status: u16, bytes: u64) -> String {
    format!("\"{host}\",\"-\",\"apache\",{time},\"{request}\",{status},{bytes}")
}

/// CSV access log in a private temp directory, header already written.
pub struct AccessLog {
    _dir: TempDir,
    path: PathBuf,
    file: File,
}

impl AccessLog {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("access.csv");
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .expect("failed to create access log");
        writeln!(file, "{HEADER}").expect("failed to write header");

        Self {
            _dir: dir,
            path,
            file,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            writeln!(self.file, "{}", line.as_ref()).expect("failed to append line");
        }
        self.file.flush().expect("failed to flush access log");
    }
}

impl Default for AccessLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Polls `condition` until it holds, panicking after `timeout`.
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + timeout;
    while !condition() {
        assert!(Instant::now() < deadline, "condition not met within {timeout:?}");
        std::thread::sleep(Duration::from_millis(20));
    }
}
