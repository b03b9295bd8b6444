mod cli;

use crate::cli::{Cli, Command, RunArgs};
use anyhow::{Context, Result, bail};
use clap::Parser;
use httpmon_core::cli::dashboard::{DashboardOptions, run_dashboard};
use httpmon_core::conf::{ConfigError, MonitorConfig, ValidationReport, read_config, validate};
use httpmon_core::logging::{LogTarget, init_logging};
use httpmon_core::pipeline::Pipeline;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Check { config }) => check(&config),
        None => run(cli.run),
    };

    if let Err(e) = result {
        eprintln!("httpmon error: {e:#}");
        std::process::exit(1);
    }
}

fn check(path: &Path) -> Result<()> {
    let config = read_config(path)?;
    let report = validated(&config)?;

    if report.has_violations() {
        print_report(&report);
    } else {
        println!("{}: ok", path.display());
    }
    Ok(())
}

fn run(args: RunArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => MonitorConfig::default(),
    };
    args.apply(&mut config);
    let report = validated(&config)?;

    let target = args.log_file.clone().map(LogTarget::File).unwrap_or_default();
    let _log_guard = init_logging(&target)?;

    for issue in &report.warnings {
        warn!(event = "config_warning", key = issue.key, message = %issue.message);
    }

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        ctrlc::set_handler(move || {
            running.store(false, Ordering::SeqCst);
        })
        .context("failed to install Ctrl-C handler")?;
    }

    let mut pipeline = Pipeline::new(&config);
    pipeline
        .init()
        .with_context(|| format!("failed to open {}", config.source))?;
    info!(event = "monitor_started", source = %config.source, period = ?config.period);

    let handle = pipeline.spawn();
    let options = DashboardOptions::new(
        config.source.to_string(),
        config.period,
        config.alert.period,
    );
    run_dashboard(&handle, options, &running);

    handle.close().context("monitoring stopped")?;
    Ok(())
}

/// Prints the report and fails when `config` has errors.
fn validated(config: &MonitorConfig) -> Result<ValidationReport> {
    match validate(config) {
        Ok(report) => Ok(report),
        Err(ConfigError::Validation { report }) => {
            print_report(&report);
            bail!("invalid configuration");
        }
        Err(e) => Err(e.into()),
    }
}

fn print_report(report: &ValidationReport) {
    if io::stdout().is_terminal() {
        report.render_pretty();
    } else {
        print!("{}", report.plain());
    }
}
