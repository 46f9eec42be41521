//! Lead capture and feedback handlers.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use fdintake::{CustomerInterest, EventStream, InMemoryEventLog, IntakeDesk};
//!
//! let log = Arc::new(InMemoryEventLog::new());
//! let desk = IntakeDesk::new(log.clone());
//!
//! let payload = desk
//!     .record_customer_interest(CustomerInterest {
//!         email: "not-an-email".to_string(),
//!         name: "Jane".to_string(),
//!         message: "chapbook".to_string(),
//!     })
//!     .expect("validation failures are payloads, not errors");
//!
//! assert_eq!(payload["ok"], false);
//! assert_eq!(payload["error"], "invalid_email");
//! assert_eq!(log.count(EventStream::Leads), 0);
//! ```

use std::sync::{Arc, LazyLock};

use chrono::{SecondsFormat, Utc};
use fdtooling::ToolError;
use regex::Regex;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    CustomerInterest, EventLog, EventRecord, FeedbackEvent, FeedbackQuestion, IntakeCall,
    LeadEvent,
};

const LEAD_PREVIEW_CHARS: usize = 120;
const FEEDBACK_PREVIEW_CHARS: usize = 140;

static EMAIL_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$"));

#[derive(Clone)]
pub struct IntakeDesk {
    log: Arc<dyn EventLog>,
}

impl IntakeDesk {
    pub fn new(log: Arc<dyn EventLog>) -> Self {
        Self { log }
    }

    pub fn dispatch(&self, call: IntakeCall) -> Result<Value, ToolError> {
        match call {
            IntakeCall::RecordCustomerInterest(args) => self.record_customer_interest(args),
            IntakeCall::RecordFeedback(args) => self.record_feedback(args),
        }
    }

    /// Records a lead when the email is well formed.
    ///
    /// The email is matched exactly as received, so surrounding whitespace is
    /// malformed too. A malformed email is reported back as
    /// `{ok: false, error: "invalid_email"}` and leaves the log untouched.
    pub fn record_customer_interest(&self, args: CustomerInterest) -> Result<Value, ToolError> {
        let lead_id = Uuid::new_v4().to_string();
        let ts = utc_timestamp();

        if !is_valid_email(&args.email)? {
            tracing::warn!(
                event = "lead.invalid",
                lead_id = %lead_id,
                ts = %ts,
                email = ?args.email,
                "rejected lead with malformed email"
            );
            return Ok(json!({
                "ok": false,
                "error": "invalid_email",
                "lead_id": lead_id,
                "ts": ts,
            }));
        }

        let event = LeadEvent {
            ts: ts.clone(),
            lead_id: lead_id.clone(),
            email: args.email.trim().to_string(),
            name: args.name.trim().to_string(),
            message: args.message.trim().to_string(),
        };

        tracing::info!(
            event = "lead.recorded",
            lead_id = %lead_id,
            ts = %ts,
            email = %event.email,
            name = %event.name,
            preview = %preview(&event.message, LEAD_PREVIEW_CHARS),
            "recorded customer interest"
        );
        self.log.append(&EventRecord::Lead(event))?;

        Ok(json!({ "ok": true, "lead_id": lead_id, "ts": ts }))
    }

    /// Records an unanswered question. Blank questions are kept.
    pub fn record_feedback(&self, args: FeedbackQuestion) -> Result<Value, ToolError> {
        let feedback_id = Uuid::new_v4().to_string();
        let ts = utc_timestamp();
        let question = args.question.trim().to_string();

        tracing::info!(
            event = "feedback.recorded",
            feedback_id = %feedback_id,
            ts = %ts,
            preview = %preview(&question, FEEDBACK_PREVIEW_CHARS),
            "recorded unanswered question"
        );
        self.log.append(&EventRecord::Feedback(FeedbackEvent {
            ts: ts.clone(),
            feedback_id: feedback_id.clone(),
            question,
        }))?;

        Ok(json!({ "ok": true, "feedback_id": feedback_id, "ts": ts }))
    }
}

fn is_valid_email(email: &str) -> Result<bool, ToolError> {
    EMAIL_PATTERN
        .as_ref()
        .map(|pattern| pattern.is_match(email))
        .map_err(|error| ToolError::other(format!("email pattern failed to compile: {error}")))
}

/// ISO-8601 UTC with microseconds, e.g. `2026-03-01T09:30:00.000001+00:00`.
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}

fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::{EventStream, InMemoryEventLog};

    fn desk() -> (IntakeDesk, Arc<InMemoryEventLog>) {
        let log = Arc::new(InMemoryEventLog::new());
        (IntakeDesk::new(log.clone()), log)
    }

    fn interest(email: &str) -> CustomerInterest {
        CustomerInterest {
            email: email.to_string(),
            name: "  Jane  ".to_string(),
            message: " poetry chapbook edit ".to_string(),
        }
    }

    #[test]
    fn email_pattern_accepts_and_rejects() {
        for valid in ["a@b.com", "first.last+tag@mail.example.org", "x@y.z"] {
            assert!(is_valid_email(valid).expect("pattern"), "{valid} should pass");
        }
        for invalid in ["", "plain", "a@bcom", "a@@b.com", "a b@c.com", "@b.com", "a@b."] {
            assert!(!is_valid_email(invalid).expect("pattern"), "{invalid} should fail");
        }
    }

    #[test]
    fn valid_lead_is_trimmed_and_logged_once() {
        let (desk, log) = desk();
        let payload = desk
            .record_customer_interest(interest("a@b.com"))
            .expect("lead should be recorded");

        assert_eq!(payload["ok"], true);
        let records = log.records();
        assert_eq!(records.len(), 1);
        let EventRecord::Lead(event) = &records[0] else {
            panic!("expected a lead record");
        };
        assert_eq!(event.email, "a@b.com");
        assert_eq!(event.name, "Jane");
        assert_eq!(event.message, "poetry chapbook edit");
        assert_eq!(payload["lead_id"], event.lead_id.as_str());
        assert_eq!(payload["ts"], event.ts.as_str());
    }

    #[test]
    fn email_with_surrounding_whitespace_is_rejected() {
        let (desk, log) = desk();
        for email in [" a@b.com ", "a@b.com\n", "\ta@b.com"] {
            let payload = desk
                .record_customer_interest(interest(email))
                .expect("payload");
            assert_eq!(payload["ok"], false, "{email:?} should be rejected");
            assert_eq!(payload["error"], "invalid_email");
        }
        assert_eq!(log.count(EventStream::Leads), 0);
    }

    #[test]
    fn invalid_email_twice_yields_two_failures_and_no_records() {
        let (desk, log) = desk();
        let first = desk
            .record_customer_interest(interest("jane.example.com"))
            .expect("payload");
        let second = desk
            .record_customer_interest(interest("jane.example.com"))
            .expect("payload");

        assert_eq!(first["error"], "invalid_email");
        assert_eq!(second["error"], "invalid_email");
        assert_ne!(first["lead_id"], second["lead_id"]);
        assert_eq!(log.count(EventStream::Leads), 0);
    }

    #[test]
    fn empty_feedback_question_is_still_recorded() {
        let (desk, log) = desk();
        let payload = desk
            .dispatch(IntakeCall::RecordFeedback(FeedbackQuestion {
                question: "   ".to_string(),
            }))
            .expect("feedback should be recorded");

        assert_eq!(payload["ok"], true);
        assert!(payload["feedback_id"].is_string());
        assert_eq!(log.count(EventStream::Feedback), 1);
    }

    #[test]
    fn repeated_identical_feedback_is_not_deduplicated() {
        let (desk, log) = desk();
        for _ in 0..2 {
            desk.record_feedback(FeedbackQuestion {
                question: "Do you translate into Armenian?".to_string(),
            })
            .expect("feedback");
        }

        assert_eq!(log.count(EventStream::Feedback), 2);
    }

    #[test]
    fn timestamp_is_utc_with_offset() {
        let ts = utc_timestamp();
        assert!(ts.ends_with("+00:00"));
        assert!(DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        assert_eq!(preview("short", 120), "short");
        let long = "é".repeat(130);
        let cut = preview(&long, 120);
        assert_eq!(cut.chars().count(), 121);
        assert!(cut.ends_with('…'));
    }
}
