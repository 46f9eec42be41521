//! Provider-agnostic model types and remote model adapters.

pub mod adapters;
mod credentials;
mod error;
mod model;
pub mod prelude;
mod provider;

pub use credentials::SecretString;
pub use error::{ProviderError, ProviderErrorKind};
pub use model::{
    Message, MessagePart, ModelRequest, ModelRequestBuilder, ModelResponse, OutputItem,
    ParameterKind, ProviderId, Role, StopReason, TokenUsage, ToolArguments, ToolCall,
    ToolDefinition, ToolParameter, ToolResult,
};
pub use provider::{ModelProvider, ProviderFuture};
