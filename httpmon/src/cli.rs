use clap::{Args, Parser, Subcommand};
use httpmon_core::conf::MonitorConfig;
use httpmon_core::source::SourceId;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "httpmon",
    version,
    about = "httpmon: live HTTP access-log monitor with threshold alerting"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a config file and print every issue found
    Check {
        /// Path to the httpmon config file
        #[arg(long)]
        config: PathBuf,
    },
}

/// Settings for a monitoring run. Flags override values from `--config`.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// CSV access log to follow
    #[arg(long, conflicts_with = "stdin")]
    pub file: Option<PathBuf>,

    /// Read the access log from standard input (default)
    #[arg(long)]
    pub stdin: bool,

    /// Width of a requests/second window, e.g. "10s"
    #[arg(long, value_parser = humantime::parse_duration)]
    pub period: Option<Duration>,

    /// Lines buffered between reading and aggregation
    #[arg(long)]
    pub lines: Option<usize>,

    /// How long the request rate must stay above the threshold, e.g. "2m"
    #[arg(long, value_parser = humantime::parse_duration)]
    pub alert_duration: Option<Duration>,

    /// Requests per second that trigger the alert
    #[arg(long)]
    pub alert_threshold: Option<f64>,

    /// How often alert transitions are shown, e.g. "1s"
    #[arg(long, value_parser = humantime::parse_duration)]
    pub alert_period: Option<Duration>,

    /// Write structured logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl RunArgs {
    pub fn apply(&self, config: &mut MonitorConfig) {
        if let Some(path) = &self.file {
            config.source = SourceId::File(path.clone());
        }
        if self.stdin {
            config.source = SourceId::Stdin;
        }
        if let Some(period) = self.period {
            config.period = period;
        }
        if let Some(lines) = self.lines {
            config.read_buffer = lines;
        }
        if let Some(duration) = self.alert_duration {
            config.alert.requests_per_second.period = duration;
        }
        if let Some(threshold) = self.alert_threshold {
            config.alert.requests_per_second.threshold = threshold;
        }
        if let Some(period) = self.alert_period {
            config.alert.period = period;
        }
    }
}
