//! Tool runtime context and execution result types.

use fdprovider::{ToolCall, ToolResult};
use serde_json::Value;

/// Who asked for a tool call: the chat session and, when set, the user turn
/// the call belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolExecutionContext {
    pub session_id: String,
    pub trace_id: Option<String>,
}

impl ToolExecutionContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            trace_id: None,
        }
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolExecutionResult {
    pub tool_call_id: String,
    pub tool_name: String,
    pub output: Value,
}

impl ToolExecutionResult {
    pub fn new(tool_call_id: impl Into<String>, tool_name: impl Into<String>, output: Value) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            tool_name: tool_name.into(),
            output,
        }
    }

    pub fn from_call(call: &ToolCall, output: Value) -> Self {
        Self::new(call.id.clone(), call.name.clone(), output)
    }

    pub fn into_tool_result(self) -> ToolResult {
        ToolResult::new(self.tool_call_id, self.tool_name, self.output)
    }
}
