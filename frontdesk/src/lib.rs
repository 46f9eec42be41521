//! Conversational front desk agent.
//!
//! Re-exports the workspace crates and wires them into a runnable agent:
//! a Gemini-backed chat loop that can record customer leads and unanswered
//! questions to an append-only JSONL log.

pub mod config;
pub mod prompt;
pub mod repl;
pub mod runtime;

pub use fdchat;
pub use fdintake;
pub use fdobserve;
pub use fdprovider;
pub use fdtooling;

pub use config::{AgentArgs, AgentConfig, ConfigError, ConfigErrorKind, DEFAULT_MODEL};
pub use fdchat::{
    APOLOGY_MESSAGE, ChatError, ChatErrorKind, ChatPolicy, ChatService, ChatServiceBuilder,
    ChatSession, ChatTurnResult,
};
pub use fdintake::{
    EventLog, EventLogConfig, InMemoryEventLog, IntakeCall, IntakeDesk, IntakeTool,
    JsonlEventLog,
};
pub use fdprovider::{
    Message, ModelProvider, ModelRequest, ModelResponse, OutputItem, ProviderError,
    ProviderErrorKind, ProviderFuture, ProviderId, Role, StopReason, TokenUsage, ToolCall,
    ToolDefinition, ToolResult,
};
pub use repl::{NO_ANSWER_MESSAGE, RESET_COMMAND, run_repl};
#[cfg(feature = "provider-gemini")]
pub use runtime::build_frontdesk;
pub use runtime::{FrontDesk, build_frontdesk_with, default_tool_hooks, intake_tool_runtime};
