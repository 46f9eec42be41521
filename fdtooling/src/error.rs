//! Tool execution errors, classifications, and their wire rendering.

use std::error::Error;
use std::fmt::{Display, Formatter};

use fdprovider::ToolArguments;
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorKind {
    NotFound,
    InvalidArguments,
    Execution,
    Storage,
    Other,
}

impl ToolErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InvalidArguments => "invalid_arguments",
            Self::Execution => "execution",
            Self::Storage => "storage",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub message: String,
    pub tool_name: Option<String>,
    pub tool_call_id: Option<String>,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            tool_name: None,
            tool_call_id: None,
        }
    }

    pub fn unknown_tool(tool_name: impl Into<String>) -> Self {
        let tool_name = tool_name.into();
        Self::new(
            ToolErrorKind::NotFound,
            format!("tool '{tool_name}' is not registered"),
        )
        .with_tool_name(tool_name)
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidArguments, message)
    }

    pub fn execution(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Execution, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Storage, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Other, message)
    }

    pub fn with_tool_name(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = Some(tool_name.into());
        self
    }

    pub fn with_tool_call_id(mut self, tool_call_id: impl Into<String>) -> Self {
        self.tool_call_id = Some(tool_call_id.into());
        self
    }

    /// Dispatch problems the model can correct by calling differently.
    pub fn is_dispatch_error(&self) -> bool {
        matches!(
            self.kind,
            ToolErrorKind::NotFound | ToolErrorKind::InvalidArguments
        )
    }

    /// Error code surfaced to the model, e.g. `unknown_tool:lookup`,
    /// `bad_arguments:<details>` or `runtime:storage:<details>`.
    pub fn wire_code(&self) -> String {
        match self.kind {
            ToolErrorKind::NotFound => format!(
                "unknown_tool:{}",
                self.tool_name.as_deref().unwrap_or_default()
            ),
            ToolErrorKind::InvalidArguments => format!("bad_arguments:{}", self.message),
            kind => format!("runtime:{}:{}", kind.as_str(), self.message),
        }
    }

    /// Structured failure payload; dispatch errors echo the received arguments.
    pub fn to_payload(&self, received_args: &ToolArguments) -> Value {
        if self.is_dispatch_error() {
            json!({
                "ok": false,
                "error": self.wire_code(),
                "received_args": received_args,
            })
        } else {
            json!({
                "ok": false,
                "error": self.wire_code(),
            })
        }
    }
}

impl Display for ToolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.tool_name, &self.tool_call_id) {
            (Some(tool_name), Some(tool_call_id)) => write!(
                f,
                "{:?} [tool={}, call_id={}]: {}",
                self.kind, tool_name, tool_call_id, self.message
            ),
            (Some(tool_name), None) => {
                write!(f, "{:?} [tool={}]: {}", self.kind, tool_name, self.message)
            }
            _ => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for ToolError {}
