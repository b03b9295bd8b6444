use owo_colors::OwoColorize;
use std::fmt::Write;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Dotted path of the offending setting, as written in the config file.
    pub key: &'static str,
    pub message: String,
    pub help: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn has_violations(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    fn error(&mut self, key: &'static str, message: String, help: Option<String>) {
        self.errors.push(ValidationIssue {
            severity: Severity::Error,
            key,
            message,
            help,
        });
    }

    fn warning(&mut self, key: &'static str, message: String, help: Option<String>) {
        self.warnings.push(ValidationIssue {
            severity: Severity::Warning,
            key,
            message,
            help,
        });
    }

    fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().chain(self.warnings.iter())
    }

    /// One `key:severity: message` line per issue.
    pub fn plain(&self) -> String {
        let mut out = String::new();

        for issue in self.issues() {
            let severity = match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };

            let _ = writeln!(out, "{}:{}: {}", issue.key, severity, issue.message);
            if let Some(help) = &issue.help {
                let _ = writeln!(out, "  help: {}", help);
            }
        }

        out
    }

    /// Colored summary for terminals.
    pub fn pretty(&self) -> String {
        let mut out = String::new();

        if self.has_violations() {
            let _ = writeln!(
                out,
                "configuration validation failed ({} errors, {} warnings)\n",
                self.errors.len(),
                self.warnings.len()
            );
        }

        for issue in self.issues() {
            let _ = writeln!(out, "{}", issue.key.bold());
            match issue.severity {
                Severity::Error => {
                    let _ = writeln!(out, "  {}: {}", "error".red().bold(), issue.message);
                }
                Severity::Warning => {
                    let _ = writeln!(out, "  {}: {}", "warning".yellow().bold(), issue.message);
                }
            }
            if let Some(help) = &issue.help {
                let _ = writeln!(out, "  {}: {}", "help".cyan(), help);
            }
            out.push('\n');
        }

        out
    }

    pub fn render_pretty(&self) {
        print!("{}", self.pretty());
    }
}

/// Monitor Config Validation
impl ValidationReport {
    pub fn period_too_short(&mut self, key: &'static str, period: Duration) {
        self.error(
            key,
            format!(
                "period must be at least 1s, got {}",
                humantime::format_duration(period)
            ),
            None,
        )
    }

    pub fn read_buffer_too_small(&mut self, read_buffer: usize) {
        self.error(
            "read_buffer",
            format!("read buffer must hold at least 1 line, got {}", read_buffer),
            None,
        )
    }

    pub fn empty_source_path(&mut self) {
        self.error(
            "source",
            "source file path is empty".to_string(),
            Some("use \"stdin\" to read from standard input".to_string()),
        )
    }

    pub fn invalid_threshold(&mut self, key: &'static str, threshold: f64) {
        self.error(
            key,
            format!("threshold must be a finite number >= 0, got {}", threshold),
            None,
        )
    }

    pub fn alert_period_below_window(&mut self, alert_period: Duration, window: Duration) {
        self.warning(
            "alert.requests_per_second.period",
            format!(
                "alert period {} is shorter than the {} aggregation window",
                humantime::format_duration(alert_period),
                humantime::format_duration(window)
            ),
            Some("the alert can only go active once a further window closes".to_string()),
        )
    }
}
