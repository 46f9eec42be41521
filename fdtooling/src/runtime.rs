//! Tool runtime trait and default registry-backed executor.

use std::sync::Arc;
use std::time::Instant;

use fdprovider::{ToolCall, ToolDefinition, ToolResult};

use crate::{
    NoopToolRuntimeHooks, ToolError, ToolExecutionContext, ToolExecutionResult, ToolFuture,
    ToolRegistry, ToolRuntimeHooks,
};

pub trait ToolRuntime: Send + Sync {
    /// Schemas advertised to the model on every request.
    fn definitions(&self) -> Vec<ToolDefinition>;

    fn execute<'a>(
        &'a self,
        tool_call: ToolCall,
        context: ToolExecutionContext,
    ) -> ToolFuture<'a, Result<ToolExecutionResult, ToolError>>;
}

#[derive(Clone)]
pub struct DefaultToolRuntime {
    registry: Arc<ToolRegistry>,
    hooks: Arc<dyn ToolRuntimeHooks>,
}

impl DefaultToolRuntime {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            hooks: Arc::new(NoopToolRuntimeHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ToolRuntimeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn registry(&self) -> Arc<ToolRegistry> {
        Arc::clone(&self.registry)
    }
}

impl ToolRuntime for DefaultToolRuntime {
    fn definitions(&self) -> Vec<ToolDefinition> {
        self.registry.definitions()
    }

    fn execute<'a>(
        &'a self,
        tool_call: ToolCall,
        context: ToolExecutionContext,
    ) -> ToolFuture<'a, Result<ToolExecutionResult, ToolError>> {
        Box::pin(async move {
            self.hooks.on_execution_start(&tool_call, &context);
            let started = Instant::now();

            let outcome = match self.registry.lookup(&tool_call.name) {
                Ok(tool) => tool
                    .invoke(&tool_call.arguments, &context)
                    .await
                    .map(|output| ToolExecutionResult::from_call(&tool_call, output)),
                Err(error) => Err(error),
            };

            match outcome {
                Ok(result) => {
                    self.hooks
                        .on_execution_success(&tool_call, &context, &result, started.elapsed());
                    Ok(result)
                }
                Err(error) => {
                    let error = error
                        .with_tool_name(tool_call.name.clone())
                        .with_tool_call_id(tool_call.id.clone());
                    if error.is_dispatch_error() {
                        self.hooks.on_dispatch_rejected(&tool_call, &context, &error);
                    } else {
                        self.hooks.on_execution_failure(
                            &tool_call,
                            &context,
                            &error,
                            started.elapsed(),
                        );
                    }
                    Err(error)
                }
            }
        })
    }
}

/// Converts a failed execution into the result the model sees for `call`.
pub fn failure_result(call: &ToolCall, error: &ToolError) -> ToolResult {
    ToolResult::for_call(call, error.to_payload(&call.arguments))
}
