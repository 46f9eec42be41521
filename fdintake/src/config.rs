//! Event log location.

use std::path::PathBuf;

/// Directory used when the caller does not choose one.
pub const DEFAULT_LOG_DIR: &str = "./logs";

/// Where the JSONL streams live. Resolved once by the caller and handed to
/// [`crate::JsonlEventLog::new`]; nothing here reads the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLogConfig {
    pub dir: PathBuf,
}

impl EventLogConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}
