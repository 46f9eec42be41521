//! Chat session, policy, and turn result types.

use fdprovider::{Message, StopReason, TokenUsage, ToolResult};
use uuid::Uuid;

/// One conversation's ordered, append-only history.
///
/// History only grows through [`crate::ChatService`]. [`ChatSession::reset`]
/// consumes the session, so a stale handle cannot be sent again.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    id: String,
    model: String,
    system_prompt: Option<String>,
    messages: Vec<Message>,
}

impl ChatSession {
    pub fn start(model: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            model: model.into(),
            system_prompt: None,
            messages: Vec::new(),
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    /// Discards the history and returns a fresh session with the same model
    /// and system prompt under a new id.
    pub fn reset(self) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            model: self.model,
            system_prompt: self.system_prompt,
            messages: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub(crate) fn append(&mut self, message: Message) {
        self.messages.push(message);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatPolicy {
    /// `None` lets the model request tools indefinitely.
    pub max_tool_round_trips: Option<usize>,
}

impl ChatPolicy {
    pub const DEFAULT_MAX_TOOL_ROUND_TRIPS: usize = 10;

    pub fn bounded(max_tool_round_trips: usize) -> Self {
        Self {
            max_tool_round_trips: Some(max_tool_round_trips),
        }
    }

    pub fn unbounded() -> Self {
        Self {
            max_tool_round_trips: None,
        }
    }

    pub(crate) fn allows_round_trip(&self, completed: usize) -> bool {
        self.max_tool_round_trips
            .is_none_or(|max_tool_round_trips| completed < max_tool_round_trips)
    }
}

impl Default for ChatPolicy {
    fn default() -> Self {
        Self::bounded(Self::DEFAULT_MAX_TOOL_ROUND_TRIPS)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurnResult {
    pub session_id: String,
    pub assistant_message: String,
    pub tool_results: Vec<ToolResult>,
    pub tool_round_trips: usize,
    pub tool_round_limit_reached: bool,
    pub stop_reason: StopReason,
    pub usage: TokenUsage,
}
