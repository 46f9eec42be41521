//! Metrics-based observability hooks for the tool runtime.
//!
//! ```rust
//! use fdobserve::MetricsObservabilityHooks;
//! use fdtooling::ToolRuntimeHooks;
//!
//! fn accepts_tool_hooks(_hooks: &dyn ToolRuntimeHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_tool_hooks(&hooks);
//! ```

use std::time::Duration;

use fdprovider::ToolCall;
use fdtooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ToolRuntimeHooks for MetricsObservabilityHooks {
    fn on_execution_start(&self, tool_call: &ToolCall, _context: &ToolExecutionContext) {
        metrics::counter!(
            "frontdesk_tool_execution_start_total",
            "tool_name" => tool_call.name.clone()
        )
        .increment(1);
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        let outcome = match result.output.get("ok").and_then(|ok| ok.as_bool()) {
            Some(true) => "ok",
            _ => "rejected",
        };

        metrics::counter!(
            "frontdesk_tool_execution_success_total",
            "tool_name" => tool_call.name.clone(),
            "outcome" => outcome
        )
        .increment(1);
        metrics::histogram!(
            "frontdesk_tool_execution_duration_seconds",
            "tool_name" => tool_call.name.clone(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_dispatch_rejected(
        &self,
        tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        error: &ToolError,
    ) {
        metrics::counter!(
            "frontdesk_tool_dispatch_rejected_total",
            "tool_name" => tool_call.name.clone(),
            "error_kind" => error.kind.as_str()
        )
        .increment(1);
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "frontdesk_tool_execution_failure_total",
            "tool_name" => tool_call.name.clone(),
            "error_kind" => error.kind.as_str()
        )
        .increment(1);
        metrics::histogram!(
            "frontdesk_tool_execution_duration_seconds",
            "tool_name" => tool_call.name.clone(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}
