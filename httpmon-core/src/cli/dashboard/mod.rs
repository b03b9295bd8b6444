//! Terminal dashboard over a running pipeline.
//!
//! Redraws every [`RENDER_TICK`]: request rates, busiest hosts, status codes
//! by section and alert activity. A frame whose metrics cannot be looked up
//! is skipped.

mod activity;
mod constants;
mod render;


pub use activity::{ActivityEntry, AlertActivity};
pub use constants::RENDER_TICK;

use crate::cli::dashboard::constants::LOOP_IDLE_SLEEP;
use crate::cli::dashboard::render::{
    redraw, render_alerts, render_header, render_hosts, render_rates, render_statuses,
};
use crate::metrics::{
    Counter, CounterVector, MetricError, REQS_PER_HOST, REQS_PER_SECOND, ROUTES_PER_STATUS,
    StatusCounter,
};
use crate::pipeline::PipelineHandle;
use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DashboardOptions {
    /// Shown in the header.
    pub source: String,
    pub window: Duration,
    /// How often alert transitions are drained.
    pub alert_period: Duration,
    /// Clear the screen and color states. Off when stdout is not a terminal.
    pub interactive: bool,
}

impl DashboardOptions {
    pub fn new(source: impl Into<String>, window: Duration, alert_period: Duration) -> Self {
        Self {
            source: source.into(),
            window,
            alert_period,
            interactive: io::stdout().is_terminal(),
        }
    }
}

pub struct Dashboard {
    options: DashboardOptions,
    activity: AlertActivity,
}

impl Dashboard {
    pub fn new(options: DashboardOptions) -> Self {
        Self {
            options,
            activity: AlertActivity::new(),
        }
    }

    pub fn activity(&self) -> &AlertActivity {
        &self.activity
    }

    /// Takes every transition waiting on the pipeline, without blocking.
    pub fn drain_alerts(&mut self, handle: &PipelineHandle) {
        if let Some(stream) = handle.alerts() {
            for transition in stream.drain() {
                self.activity.record(transition);
            }
        }
    }

    /// Renders one frame from fresh metric copies.
    pub fn frame(&self, handle: &PipelineHandle) -> Result<String, MetricError> {
        let hosts = Counter::try_from(handle.metric(REQS_PER_HOST)?)?;
        let rates = CounterVector::try_from(handle.metric(REQS_PER_SECOND)?)?;
        let statuses = StatusCounter::try_from(handle.metric(ROUTES_PER_STATUS)?)?;

        let mut out = render_header(&self.options.source, self.options.window);
        out.push_str(&render_rates(&rates));
        out.push_str(&render_hosts(&hosts));
        out.push_str(&render_statuses(&statuses));
        out.push_str(&render_alerts(&self.activity, self.options.interactive));
        Ok(out)
    }

    /// Redraws until `running` is cleared or the pipeline stops.
    pub fn run(&mut self, handle: &PipelineHandle, running: &AtomicBool) {
        let interactive = self.options.interactive;
        if interactive {
            print!("\x1b[?25l");
            let _ = io::stdout().flush();
        }

        let mut last_render: Option<Instant> = None;
        let mut last_drain: Option<Instant> = None;

        while running.load(Ordering::SeqCst) && handle.is_running() {
            if last_drain.is_none_or(|at| at.elapsed() >= self.options.alert_period) {
                self.drain_alerts(handle);
                last_drain = Some(Instant::now());
            }

            if last_render.is_none_or(|at| at.elapsed() >= RENDER_TICK) {
                match self.frame(handle) {
                    Ok(frame) => redraw(&frame, interactive),
                    Err(err) => debug!(event = "frame_skipped", error = %err),
                }
                last_render = Some(Instant::now());
            }

            thread::sleep(LOOP_IDLE_SLEEP);
        }

        if interactive {
            print!("\x1b[?25h");
            let _ = io::stdout().flush();
        }
    }
}

/// Runs a dashboard over `handle` until `running` is cleared or the pipeline
/// stops. The alert activity lives as long as this call.
pub fn run_dashboard(handle: &PipelineHandle, options: DashboardOptions, running: &AtomicBool) {
    Dashboard::new(options).run(handle, running);
}
