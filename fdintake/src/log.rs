//! Durable append-only event log backends.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::{EventLogConfig, EventLogError, EventRecord, EventStream};

pub trait EventLog: Send + Sync {
    fn append(&self, record: &EventRecord) -> Result<(), EventLogError>;
}

/// One JSON object per line, one file per stream.
///
/// Every record goes out as a single `write_all` on a handle opened in append
/// mode, so concurrent writers interleave whole lines.
#[derive(Debug)]
pub struct JsonlEventLog {
    config: EventLogConfig,
    lock: Mutex<()>,
}

impl JsonlEventLog {
    pub fn new(config: EventLogConfig) -> Self {
        Self {
            config,
            lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.config.dir
    }

    pub fn stream_path(&self, stream: EventStream) -> PathBuf {
        self.config.dir.join(stream.file_name())
    }
}

impl EventLog for JsonlEventLog {
    fn append(&self, record: &EventRecord) -> Result<(), EventLogError> {
        let mut line = serde_json::to_vec(record).map_err(|error| {
            EventLogError::serialization(format!("failed to serialize event record: {error}"))
        })?;
        line.push(b'\n');

        let _guard = self
            .lock
            .lock()
            .map_err(|_| EventLogError::storage("event log lock poisoned"))?;

        fs::create_dir_all(&self.config.dir).map_err(|error| {
            EventLogError::storage(format!("failed to create log directory: {error}"))
        })?;

        let path = self.stream_path(record.stream());
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|error| {
                EventLogError::storage(format!("failed to open {}: {error}", path.display()))
            })?;

        file.write_all(&line).map_err(|error| {
            EventLogError::storage(format!("failed to append to {}: {error}", path.display()))
        })?;
        file.flush().map_err(|error| {
            EventLogError::storage(format!("failed to flush {}: {error}", path.display()))
        })
    }
}

#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    records: Mutex<Vec<EventRecord>>,
}

impl InMemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<EventRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn count(&self, stream: EventStream) -> usize {
        self.records()
            .iter()
            .filter(|record| record.stream() == stream)
            .count()
    }
}

impl EventLog for InMemoryEventLog {
    fn append(&self, record: &EventRecord) -> Result<(), EventLogError> {
        self.records
            .lock()
            .map_err(|_| EventLogError::storage("in-memory event log lock poisoned"))?
            .push(record.clone());
        Ok(())
    }
}
