//! Intake tools: customer lead capture and unanswered-question feedback,
//! persisted to an append-only JSONL event log.

mod config;
mod desk;
mod error;
mod events;
mod log;
mod tools;

pub mod prelude {
    pub use crate::{
        EventLog, EventLogConfig, InMemoryEventLog, IntakeCall, IntakeDesk, IntakeTool,
        JsonlEventLog, intake_registry,
    };
}

pub use config::{DEFAULT_LOG_DIR, EventLogConfig};
pub use desk::{IntakeDesk, utc_timestamp};
pub use error::{EventLogError, EventLogErrorKind};
pub use events::{EventRecord, EventStream, FeedbackEvent, LeadEvent};
pub use log::{EventLog, InMemoryEventLog, JsonlEventLog};
pub use tools::{CustomerInterest, FeedbackQuestion, IntakeCall, IntakeTool, intake_registry};
