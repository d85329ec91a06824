//! Console formatting for audit events
//!
//! The audit log file always receives plain text. Only the console echo is
//! coloured, keyed off the leading marker of each message.

use colored::{ColoredString, Colorize};

/// Check if quiet mode is enabled via environment variable
pub fn is_quiet() -> bool {
    std::env::var("INTAKE_QUIET")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Kind of audit event, derived from the message marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// `--- ... ---` banners
    Banner,
    /// `SUCCESS:` lines
    Success,
    /// `FAILURE:` lines
    Failure,
    /// `CRITICAL ERROR:` lines
    Critical,
    /// `Summary:` line
    Summary,
    /// Anything else
    Plain,
}

impl EventKind {
    pub fn of(message: &str) -> Self {
        if message.starts_with("---") {
            EventKind::Banner
        } else if message.starts_with("SUCCESS:") {
            EventKind::Success
        } else if message.starts_with("FAILURE:") {
            EventKind::Failure
        } else if message.starts_with("CRITICAL ERROR:") {
            EventKind::Critical
        } else if message.starts_with("Summary:") {
            EventKind::Summary
        } else {
            EventKind::Plain
        }
    }
}

/// Color scheme for console output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Green for accepted files
    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    /// Red for quarantined files
    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    /// Cyan for counters
    pub fn info(text: &str) -> ColoredString {
        text.cyan()
    }

    /// Dimmed for timestamps
    pub fn secondary(text: &str) -> ColoredString {
        text.dimmed()
    }

    /// Bold for banners
    pub fn heading(text: &str) -> ColoredString {
        text.bold()
    }
}

/// Apply the console style for a message.
pub fn style_event(message: &str) -> ColoredString {
    match EventKind::of(message) {
        EventKind::Banner => colors::heading(message),
        EventKind::Success => colors::success(message),
        EventKind::Failure => colors::error(message),
        EventKind::Critical => message.red().bold(),
        EventKind::Summary => colors::info(message),
        EventKind::Plain => message.normal(),
    }
}

/// Render a full console line: dimmed `[timestamp]` followed by the styled message.
pub fn console_line(timestamp: &str, message: &str) -> String {
    format!(
        "{} {}",
        colors::secondary(&format!("[{}]", timestamp)),
        style_event(message)
    )
}
