use crate::alert::AlertState;
use crate::cli::dashboard::activity::AlertActivity;
use crate::cli::dashboard::constants::{RATE_HISTORY, TOP_HOSTS, TOP_SECTIONS};
use crate::metrics::{Counter, CounterVector, StatusCounter};
use crate::record::UnixSeconds;
use owo_colors::OwoColorize;
use std::fmt::Write as _;
use std::io::{self, Write};
use std::time::Duration;

pub fn render_header(source: &str, window: Duration) -> String {
    format!(
        "httpmon: {} ({} windows)\n\
         ==========================\n\n",
        source,
        humantime::format_duration(window)
    )
}

pub fn render_hosts(hosts: &Counter<'_>) -> String {
    let mut out = format!("Requests per host (total: {})\n", hosts.total());

    let mut sorted: Vec<(&String, &u64)> = hosts.labels().iter().collect();
    // ties broken by name so frames are stable
    sorted.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    for (host, count) in sorted.into_iter().take(TOP_HOSTS) {
        let pct = percent(*count, hosts.total());
        let _ = writeln!(out, "  {:<20} {:>8} {:>5.1}%", host, count, pct);
    }
    out.push('\n');
    out
}

pub fn render_rates(rates: &CounterVector<'_>) -> String {
    let mut out = String::from("Requests per second\n");

    match rates.latest() {
        Some(latest) => {
            let _ = writeln!(
                out,
                "  last: {:.2} (window starting {})",
                latest,
                format_time(rates.scrape_time())
            );
            let history = rates.total();
            let recent = &history[history.len().saturating_sub(RATE_HISTORY)..];
            let _ = writeln!(out, "  history: {}", sparkline(recent));
        }
        None => out.push_str("  <no closed window yet>\n"),
    }

    let mut sections: Vec<(&String, f64)> = rates
        .labels()
        .iter()
        .map(|(section, series)| (section, series.last().copied().unwrap_or(0.0)))
        .collect();
    sections.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    if !sections.is_empty() {
        out.push_str("  per section:\n");
        for (section, rate) in sections.into_iter().take(TOP_SECTIONS) {
            let _ = writeln!(out, "    {:<18} {:>8.2}", section, rate);
        }
    }
    out.push('\n');
    out
}

/// Status classes first, then sections grouped by code, highest code first.
pub fn render_statuses(statuses: &StatusCounter<'_>) -> String {
    let mut classes = [0u64; 4];
    for (status, sections) in statuses.labels() {
        let class = match *status {
            500.. => 3,
            400..=499 => 2,
            300..=399 => 1,
            _ => 0,
        };
        classes[class] += sections.values().sum::<u64>();
    }

    let total = statuses.total();
    let mut out = format!(
        "Status codes: 2xx={:.1}% 3xx={:.1}% 4xx={:.1}% 5xx={:.1}%\n",
        percent(classes[0], total),
        percent(classes[1], total),
        percent(classes[2], total),
        percent(classes[3], total)
    );

    let mut codes: Vec<&u16> = statuses.labels().keys().collect();
    codes.sort_unstable_by(|a, b| b.cmp(a));

    for code in codes {
        let _ = writeln!(out, "  {code}:");
        let mut sections: Vec<(&String, &u64)> = statuses.labels()[code].iter().collect();
        sections.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (section, count) in sections {
            let _ = writeln!(out, "    {:<18} {:>8}", section, count);
        }
    }
    out.push('\n');
    out
}

pub fn render_alerts(activity: &AlertActivity, color: bool) -> String {
    let mut out = format!("Alerts ({} enabled)\n", activity.enabled());

    for state in [AlertState::Active, AlertState::Pending] {
        for alert in activity.in_state(state) {
            let _ = writeln!(
                out,
                "  [{}] {}: {}",
                state_label(state, color),
                alert.name,
                alert.description
            );
        }
    }

    let mut log = activity.log().peekable();
    if log.peek().is_some() {
        out.push_str("\nAlert log:\n");
        for entry in log {
            let verb = match entry.state {
                AlertState::Active => "fired",
                _ => "recovered",
            };
            let _ = writeln!(
                out,
                "  {} {} {} ({})",
                format_time(entry.time),
                entry.name,
                verb,
                state_label(entry.state, color)
            );
        }
    }

    out
}

pub fn state_label(state: AlertState, color: bool) -> String {
    if !color {
        return state.to_string();
    }

    match state {
        AlertState::Active => state.as_str().red().bold().to_string(),
        AlertState::Pending => state.as_str().yellow().to_string(),
        AlertState::Inactive => state.as_str().green().to_string(),
    }
}

pub fn format_time(time: UnixSeconds) -> String {
    match chrono::DateTime::from_timestamp(time, 0) {
        Some(at) => at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => time.to_string(),
    }
}

fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

fn sparkline(values: &[f64]) -> String {
    const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

    let max = values.iter().copied().fold(0.0_f64, f64::max);
    values
        .iter()
        .map(|value| {
            if max <= 0.0 {
                BARS[0]
            } else {
                let idx = (value / max * (BARS.len() - 1) as f64).round() as usize;
                BARS[idx.min(BARS.len() - 1)]
            }
        })
        .collect()
}

pub fn redraw(output: &str, clear: bool) {
    if clear {
        print!("\x1b[2J\x1b[H");
    }
    println!("{output}");
    let _ = io::stdout().flush();
}
