//! Append-only audit records written by the intake tools.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadEvent {
    pub ts: String,
    pub lead_id: String,
    pub email: String,
    pub name: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    pub ts: String,
    pub feedback_id: String,
    pub question: String,
}

/// One line of a JSONL stream, tagged by its `event` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum EventRecord {
    #[serde(rename = "lead_recorded")]
    Lead(LeadEvent),
    #[serde(rename = "feedback_recorded")]
    Feedback(FeedbackEvent),
}

impl EventRecord {
    pub fn stream(&self) -> EventStream {
        match self {
            Self::Lead(_) => EventStream::Leads,
            Self::Feedback(_) => EventStream::Feedback,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventStream {
    Leads,
    Feedback,
}

impl EventStream {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Leads => "leads.jsonl",
            Self::Feedback => "feedback.jsonl",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_record_serializes_with_event_tag() {
        let record = EventRecord::Lead(LeadEvent {
            ts: "2026-01-01T00:00:00.000000+00:00".to_string(),
            lead_id: "lead-1".to_string(),
            email: "a@b.com".to_string(),
            name: "Jane".to_string(),
            message: "poetry chapbook edit".to_string(),
        });

        let value = serde_json::to_value(&record).expect("record should serialize");
        assert_eq!(value["event"], "lead_recorded");
        assert_eq!(value["lead_id"], "lead-1");
        assert_eq!(value["email"], "a@b.com");
        assert_eq!(record.stream().file_name(), "leads.jsonl");
    }

    #[test]
    fn feedback_record_round_trips_through_a_line() {
        let line = r#"{"ts":"t","event":"feedback_recorded","feedback_id":"f","question":"q"}"#;
        let record: EventRecord = serde_json::from_str(line).expect("line should parse");

        assert_eq!(record.stream(), EventStream::Feedback);
        assert!(matches!(record, EventRecord::Feedback(ref event) if event.question == "q"));
    }
}
