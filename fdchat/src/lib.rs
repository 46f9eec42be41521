//! Conversation sessions and the tool-calling orchestration loop.
//!
//! ```rust
//! use fdchat::{ChatPolicy, ChatSession};
//!
//! let session = ChatSession::start("gemini-2.5-flash").with_system_prompt("Be concise.");
//! assert!(session.is_empty());
//! assert_eq!(ChatPolicy::default().max_tool_round_trips, Some(10));
//! ```

mod error;
mod service;
mod types;

pub mod prelude {
    pub use crate::{
        ChatError, ChatErrorKind, ChatPolicy, ChatService, ChatServiceBuilder, ChatSession,
        ChatTurnResult,
    };
    pub use fdtooling::{
        DefaultToolRuntime, Tool, ToolError, ToolErrorKind, ToolExecutionContext,
        ToolExecutionResult, ToolRegistry, ToolRuntime,
    };
}

pub use error::{APOLOGY_MESSAGE, ChatError, ChatErrorKind};
pub use service::{ChatService, ChatServiceBuilder, MAX_TOOL_ITERATIONS_EXCEEDED};
pub use types::{ChatPolicy, ChatSession, ChatTurnResult};
pub use fdtooling::{
    DefaultToolRuntime, Tool, ToolError, ToolErrorKind, ToolExecutionContext, ToolExecutionResult,
    ToolRegistry, ToolRuntime,
};
