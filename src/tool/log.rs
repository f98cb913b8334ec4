//! Capture of the tool's diagnostic output

use super::traits::ToolLog;
use std::sync::Mutex;

/// Severity of a captured tool message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolLogLevel {
    /// Informational output
    Debug,
    /// Non-fatal problem
    Warning,
    /// Fatal problem
    Error,
}

/// [`ToolLog`] that forwards to `tracing` and keeps every message for the request
///
/// Captured messages enrich the service's own log lines; they are never sent to
/// the caller.
#[derive(Debug, Default)]
pub struct CapturingLog {
    messages: Mutex<Vec<(ToolLogLevel, String)>>,
}

impl CapturingLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: ToolLogLevel, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((level, message.to_string()));
        }
    }

    /// All captured messages in arrival order
    pub fn messages(&self) -> Vec<(ToolLogLevel, String)> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    /// Captured messages at or above `level`
    pub fn at_least(&self, level: ToolLogLevel) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(l, _)| rank(*l) >= rank(level))
            .map(|(_, message)| message)
            .collect()
    }
}

fn rank(level: ToolLogLevel) -> u8 {
    match level {
        ToolLogLevel::Debug => 0,
        ToolLogLevel::Warning => 1,
        ToolLogLevel::Error => 2,
    }
}

impl ToolLog for CapturingLog {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "yt_dlp", "{}", message);
        self.push(ToolLogLevel::Debug, message);
    }

    fn warning(&self, message: &str) {
        tracing::warn!(target: "yt_dlp", "{}", message);
        self.push(ToolLogLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "yt_dlp", "{}", message);
        self.push(ToolLogLevel::Error, message);
    }
}

/// Route one line of tool stderr to the matching sink method
pub(crate) fn dispatch_line(log: &dyn ToolLog, line: &str) {
    let line = line.trim_end();
    if line.is_empty() {
        return;
    }

    if line.starts_with("ERROR:") {
        log.error(line);
    } else if line.starts_with("WARNING:") {
        log.warning(line);
    } else {
        log.debug(line);
    }
}
