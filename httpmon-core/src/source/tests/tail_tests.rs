use crate::source::{LineSource, SourceError, SourceId, StopSignal, TailSource};
use pretty_assertions::assert_eq;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

//-----------------------------------------------------------------------------
// Test helpers
//-----------------------------------------------------------------------------

fn append(path: &Path, text: &str) {
    append_bytes(path, text.as_bytes());
}

fn append_bytes(path: &Path, bytes: &[u8]) {
    let mut file = OpenOptions::new().append(true).open(path).unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
}

/// Reads on a helper thread so a hung source fails the test instead of hanging it.
fn read_with_timeout(mut source: TailSource, count: usize) -> (TailSource, Vec<String>) {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let lines: Vec<String> = (0..count).map(|_| source.read().unwrap()).collect();
        tx.send((source, lines)).unwrap();
    });
    rx.recv_timeout(Duration::from_secs(5))
        .expect("tail source did not deliver lines in time")
}

//-----------------------------------------------------------------------------
// Tests
//-----------------------------------------------------------------------------

#[test]
fn reads_existing_content_from_the_start() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("access.csv");
    fs::write(&path, "a\nb\n").unwrap();
    let mut source = TailSource::new(8, StopSignal::new());
    source.open(&SourceId::File(path)).unwrap();

    // Act
    let (mut source, lines) = read_with_timeout(source, 2);

    // Assert
    assert_eq!(lines, vec!["a", "b"]);
    source.close().unwrap();
}

#[test]
fn follows_appended_lines_and_holds_back_partial_ones() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("access.csv");
    fs::write(&path, "a\n").unwrap();
    let mut source = TailSource::new(8, StopSignal::new());
    source.open(&SourceId::File(path.clone())).unwrap();

    // Act
    append(&path, "par");
    thread::sleep(Duration::from_millis(250));
    append(&path, "tial\n\nc\n");
    let (mut source, lines) = read_with_timeout(source, 3);

    // Assert
    assert_eq!(lines, vec!["a", "partial", "c"]);
    source.close().unwrap();
}

#[test]
fn character_split_across_writes_is_joined() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("access.csv");
    fs::write(&path, "").unwrap();
    let mut source = TailSource::new(8, StopSignal::new());
    source.open(&SourceId::File(path.clone())).unwrap();

    // Act
    append_bytes(&path, b"jos\xc3");
    thread::sleep(Duration::from_millis(400));
    append_bytes(&path, b"\xa9\n");
    let (mut source, lines) = read_with_timeout(source, 1);

    // Assert
    assert_eq!(lines, vec!["jos\u{e9}"]);
    source.close().unwrap();
}

#[test]
fn invalid_utf8_is_replaced_and_following_lines_still_arrive() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("access.csv");
    fs::write(&path, b"bad\xff\ngood\n").unwrap();
    let mut source = TailSource::new(8, StopSignal::new());
    source.open(&SourceId::File(path)).unwrap();

    // Act
    let (mut source, lines) = read_with_timeout(source, 2);

    // Assert
    assert_eq!(lines, vec!["bad\u{fffd}", "good"]);
    source.close().unwrap();
}

#[test]
fn rereads_a_truncated_file_from_the_start() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("access.csv");
    fs::write(&path, "old line one\nold line two\n").unwrap();
    let mut source = TailSource::new(8, StopSignal::new());
    source.open(&SourceId::File(path.clone())).unwrap();
    let (source, _) = read_with_timeout(source, 2);

    // Act
    fs::write(&path, "new\n").unwrap();
    let (mut source, lines) = read_with_timeout(source, 1);

    // Assert
    assert_eq!(lines, vec!["new"]);
    source.close().unwrap();
}

#[cfg(unix)]
#[test]
fn follows_the_new_file_when_the_path_is_replaced() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("access.csv");
    fs::write(&path, "before rotation\n").unwrap();
    let mut source = TailSource::new(8, StopSignal::new());
    source.open(&SourceId::File(path.clone())).unwrap();
    let (source, _) = read_with_timeout(source, 1);

    // Act
    let rotated = dir.path().join("access.csv.next");
    fs::write(&rotated, "after rotation\n").unwrap();
    fs::rename(&rotated, &path).unwrap();
    thread::sleep(Duration::from_millis(250));
    append(&path, "appended to the new file\n");
    let (mut source, lines) = read_with_timeout(source, 2);

    // Assert
    assert_eq!(lines, vec!["after rotation", "appended to the new file"]);
    source.close().unwrap();
}

#[test]
fn missing_file_fails_to_open() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut source = TailSource::new(8, StopSignal::new());

    // Act
    let result = source.open(&SourceId::File(dir.path().join("missing.csv")));

    // Assert
    assert!(matches!(result, Err(SourceError::Open { .. })));
}

#[test]
fn read_after_close_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("access.csv");
    fs::write(&path, "").unwrap();
    let mut source = TailSource::new(8, StopSignal::new());
    source.open(&SourceId::File(path)).unwrap();

    // Act
    source.close().unwrap();
    let result = source.read();

    // Assert
    assert!(matches!(result, Err(SourceError::NotOpen)));
}

#[test]
fn rejects_stdin() {
    // Arrange
    let mut source = TailSource::new(8, StopSignal::new());

    // Act
    let result = source.open(&SourceId::Stdin);

    // Assert
    assert!(matches!(result, Err(SourceError::Unsupported { .. })));
}
