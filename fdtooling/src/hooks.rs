//! Lifecycle callbacks around a single tool call.
//!
//! Every call reported to [`ToolRuntimeHooks::on_execution_start`] ends in
//! exactly one of three callbacks:
//!
//! - `on_execution_success` when the tool produced a payload, including
//!   payloads that report `ok: false` such as a rejected email;
//! - `on_dispatch_rejected` when the call never reached a tool because the
//!   name was unknown or the arguments did not match its schema;
//! - `on_execution_failure` when the tool itself failed.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use fdtooling::{NoopToolRuntimeHooks, ToolRuntimeHooks};
//!
//! fn accepts_hooks(_hooks: &dyn ToolRuntimeHooks) {}
//!
//! let shared = Arc::new(NoopToolRuntimeHooks);
//! accepts_hooks(&shared);
//! ```

use std::sync::Arc;
use std::time::Duration;

use fdprovider::ToolCall;

use crate::{ToolError, ToolExecutionContext, ToolExecutionResult};

pub trait ToolRuntimeHooks: Send + Sync {
    fn on_execution_start(&self, _tool_call: &ToolCall, _context: &ToolExecutionContext) {}

    fn on_execution_success(
        &self,
        _tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _result: &ToolExecutionResult,
        _elapsed: Duration,
    ) {
    }

    /// `error` is an `unknown_tool` or `bad_arguments` error.
    fn on_dispatch_rejected(
        &self,
        _tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _error: &ToolError,
    ) {
    }

    fn on_execution_failure(
        &self,
        _tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _error: &ToolError,
        _elapsed: Duration,
    ) {
    }
}

impl<H> ToolRuntimeHooks for Arc<H>
where
    H: ToolRuntimeHooks + ?Sized,
{
    fn on_execution_start(&self, tool_call: &ToolCall, context: &ToolExecutionContext) {
        (**self).on_execution_start(tool_call, context);
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        (**self).on_execution_success(tool_call, context, result, elapsed);
    }

    fn on_dispatch_rejected(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        error: &ToolError,
    ) {
        (**self).on_dispatch_rejected(tool_call, context, error);
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        (**self).on_execution_failure(tool_call, context, error, elapsed);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopToolRuntimeHooks;

impl ToolRuntimeHooks for NoopToolRuntimeHooks {}
