//! Tool trait contract for registry-managed capabilities.
//!
//! ```rust
//! use fdprovider::ToolDefinition;
//! use fdtooling::{FunctionTool, Tool};
//! use serde_json::json;
//!
//! let tool = FunctionTool::new(
//!     ToolDefinition::new("ping", "Answers with pong"),
//!     |_args, _ctx| async move { Ok(json!({ "ok": true, "reply": "pong" })) },
//! );
//!
//! assert_eq!(tool.definition().name, "ping");
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use fdprovider::{ToolArguments, ToolDefinition};
use serde_json::Value;

use crate::{ToolError, ToolExecutionContext};

pub type ToolFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A capability the model may invoke by name.
///
/// Successful invocations return the JSON object handed back to the model.
pub trait Tool: Send + Sync {
    fn definition(&self) -> ToolDefinition;

    fn invoke<'a>(
        &'a self,
        arguments: &'a ToolArguments,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<Value, ToolError>>;
}

type ToolHandler = dyn Fn(ToolArguments, ToolExecutionContext) -> ToolFuture<'static, Result<Value, ToolError>>
    + Send
    + Sync;

pub struct FunctionTool {
    definition: ToolDefinition,
    handler: Arc<ToolHandler>,
}

impl FunctionTool {
    pub fn new<F, Fut>(definition: ToolDefinition, handler: F) -> Self
    where
        F: Fn(ToolArguments, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ToolError>> + Send + 'static,
    {
        let handler: Arc<ToolHandler> =
            Arc::new(move |arguments, context| Box::pin(handler(arguments, context)));

        Self {
            definition,
            handler,
        }
    }
}

impl Tool for FunctionTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    fn invoke<'a>(
        &'a self,
        arguments: &'a ToolArguments,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<Value, ToolError>> {
        (self.handler)(arguments.clone(), context.clone())
    }
}
