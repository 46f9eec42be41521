//! Observability hooks for the tool execution runtime.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use fdobserve::{
//!     CompositeToolHooks, MetricsObservabilityHooks, SafeToolHooks, TracingObservabilityHooks,
//! };
//!
//! let _hooks = CompositeToolHooks::new()
//!     .with(Arc::new(SafeToolHooks::new(TracingObservabilityHooks)))
//!     .with(Arc::new(SafeToolHooks::new(MetricsObservabilityHooks)));
//! ```

mod composite;
mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use composite::CompositeToolHooks;
pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::SafeToolHooks;
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        CompositeToolHooks, MetricsObservabilityHooks, SafeToolHooks, TracingObservabilityHooks,
    };
}
