use std::sync::Arc;
use std::time::Duration;

use fdprovider::ToolCall;
use fdtooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

/// Forwards every callback to each registered hook in order.
#[derive(Default, Clone)]
pub struct CompositeToolHooks {
    hooks: Vec<Arc<dyn ToolRuntimeHooks>>,
}

impl CompositeToolHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, hooks: Arc<dyn ToolRuntimeHooks>) -> Self {
        self.hooks.push(hooks);
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl ToolRuntimeHooks for CompositeToolHooks {
    fn on_execution_start(&self, tool_call: &ToolCall, context: &ToolExecutionContext) {
        for hooks in &self.hooks {
            hooks.on_execution_start(tool_call, context);
        }
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        for hooks in &self.hooks {
            hooks.on_execution_success(tool_call, context, result, elapsed);
        }
    }

    fn on_dispatch_rejected(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        error: &ToolError,
    ) {
        for hooks in &self.hooks {
            hooks.on_dispatch_rejected(tool_call, context, error);
        }
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        for hooks in &self.hooks {
            hooks.on_execution_failure(tool_call, context, error, elapsed);
        }
    }
}
