use crate::conf::{ConfigError, MonitorConfig, load_config, parse_config, read_config};
use crate::source::SourceId;
use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn empty_document_yields_defaults() {
    // Arrange
    let raw = "";

    // Act
    let config = parse_config(Path::new("httpmon.toml"), raw).unwrap();

    // Assert
    assert_eq!(config, MonitorConfig::default());
    assert_eq!(config.source, SourceId::Stdin);
    assert_eq!(config.period, Duration::from_secs(10));
    assert_eq!(config.read_buffer, 100);
    assert_eq!(config.alert.period, Duration::from_secs(1));
    assert_eq!(config.alert.requests_per_second.period, Duration::from_secs(60));
    assert_eq!(config.alert.requests_per_second.threshold, 10.0);
    assert!(config.alert.requests_per_second.enabled);
}

#[test]
fn reads_humantime_durations_and_file_source() {
    // Arrange
    let file = write_config(
        r#"
source = "/var/log/access.csv"
period = "5s"
read_buffer = 250

[alert]
period = "500ms"

[alert.requests_per_second]
period = "2m"
threshold = 12.5
"#,
    );

    // Act
    let config = read_config(file.path()).unwrap();

    // Assert
    assert_eq!(
        config.source,
        SourceId::File(PathBuf::from("/var/log/access.csv"))
    );
    assert_eq!(config.period, Duration::from_secs(5));
    assert_eq!(config.read_buffer, 250);
    assert_eq!(config.alert.period, Duration::from_millis(500));
    assert_eq!(config.alert.requests_per_second.period, Duration::from_secs(120));
    assert_eq!(config.alert.requests_per_second.threshold, 12.5);
}

#[test]
fn stdin_source_is_case_insensitive() {
    // Arrange
    let raw = r#"source = "STDIN""#;

    // Act
    let config = parse_config(Path::new("httpmon.toml"), raw).unwrap();

    // Assert
    assert_eq!(config.source, SourceId::Stdin);
}

#[test]
fn unknown_keys_are_rejected() {
    // Arrange
    let raw = "periode = \"5s\"";

    // Act
    let result = parse_config(Path::new("httpmon.toml"), raw);

    // Assert
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn malformed_duration_is_a_parse_error() {
    // Arrange
    let raw = "period = \"ten seconds\"";

    // Act
    let result = parse_config(Path::new("httpmon.toml"), raw);

    // Assert
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn missing_file_is_a_read_error() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");

    // Act
    let result = read_config(&path);

    // Assert
    match result {
        Err(ConfigError::ReadFile { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected a read error, got {other:?}"),
    }
}

#[test]
fn load_rejects_invalid_values() {
    // Arrange
    let file = write_config("read_buffer = 0\n");

    // Act
    let result = load_config(file.path());

    // Assert
    match result {
        Err(ConfigError::Validation { report }) => {
            assert_eq!(report.errors.len(), 1);
            assert_eq!(report.errors[0].key, "read_buffer");
        }
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[test]
fn load_accepts_a_valid_file() {
    // Arrange
    let file = write_config("period = \"1s\"\n[alert.requests_per_second]\nperiod = \"1s\"\n");

    // Act
    let config = load_config(file.path()).unwrap();

    // Assert
    assert_eq!(config.period, Duration::from_secs(1));
}
