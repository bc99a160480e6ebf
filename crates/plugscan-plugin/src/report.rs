//! Host message reporting for discovery failures.

use std::sync::Mutex;

use serde::Serialize;
use tracing::{error, warn};

/// Whether expected-but-uninteresting load failures are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadFailureMode {
    /// Swallow load failures; used when probing directories that may
    /// legitimately hold modules for other hosts.
    Silent,
    /// Report every load failure as a non-fatal warning or error.
    #[default]
    Report,
}

impl LoadFailureMode {
    /// Verbose when `true`, silent otherwise.
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose { Self::Report } else { Self::Silent }
    }

    /// Returns whether failures are forwarded to the reporter.
    pub fn is_verbose(self) -> bool {
        matches!(self, Self::Report)
    }
}

/// Severity of a reported message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Something odd but harmless happened.
    Warning,
    /// Something was excluded because it failed a check.
    Failure,
}

/// A reported message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Severity.
    pub severity: Severity,
    /// Message text.
    pub message: String,
}

/// Sink for user-facing discovery messages.
pub trait Reporter: Send + Sync {
    /// Reports a warning.
    fn warning(&self, message: &str);

    /// Reports a failure.
    fn failure(&self, message: &str);
}

/// Forwards reports to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn warning(&self, message: &str) {
        warn!(target: "plugscan::report", "{message}");
    }

    fn failure(&self, message: &str) {
        error!(target: "plugscan::report", "{message}");
    }
}

/// Collects reports in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    reports: Mutex<Vec<Report>>,
}

impl MemoryReporter {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every report so far, in order.
    pub fn reports(&self) -> Vec<Report> {
        self.reports
            .lock()
            .map(|reports| reports.clone())
            .unwrap_or_default()
    }

    /// Returns reports of the given severity.
    pub fn with_severity(&self, severity: Severity) -> Vec<Report> {
        self.reports()
            .into_iter()
            .filter(|r| r.severity == severity)
            .collect()
    }

    /// Returns whether nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.reports().is_empty()
    }

    fn push(&self, severity: Severity, message: &str) {
        if let Ok(mut reports) = self.reports.lock() {
            reports.push(Report {
                severity,
                message: message.to_string(),
            });
        }
    }
}

impl Reporter for MemoryReporter {
    fn warning(&self, message: &str) {
        self.push(Severity::Warning, message);
    }

    fn failure(&self, message: &str) {
        self.push(Severity::Failure, message);
    }
}
