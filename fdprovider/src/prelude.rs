//! Common `fdprovider` imports for downstream crates.

pub use crate::{
    Message, MessagePart, ModelProvider, ModelRequest, ModelRequestBuilder, ModelResponse,
    OutputItem, ParameterKind, ProviderError, ProviderErrorKind, ProviderFuture, ProviderId, Role,
    SecretString, StopReason, TokenUsage, ToolArguments, ToolCall, ToolDefinition, ToolParameter,
    ToolResult,
};
