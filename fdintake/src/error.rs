//! Event log errors for durable append operations.

use std::error::Error;
use std::fmt::{Display, Formatter};

use fdtooling::ToolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventLogErrorKind {
    Storage,
    Serialization,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLogError {
    pub kind: EventLogErrorKind,
    pub message: String,
}

impl EventLogError {
    pub fn new(kind: EventLogErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(EventLogErrorKind::Storage, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(EventLogErrorKind::Serialization, message)
    }
}

impl Display for EventLogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for EventLogError {}

impl From<EventLogError> for ToolError {
    fn from(error: EventLogError) -> Self {
        match error.kind {
            EventLogErrorKind::Storage => ToolError::storage(error.message),
            EventLogErrorKind::Serialization => ToolError::execution(error.message),
        }
    }
}
