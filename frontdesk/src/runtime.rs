//! Runtime wiring: provider, event log, intake tools, hooks, and chat service.

use std::sync::Arc;

use fdchat::{ChatPolicy, ChatService, ChatSession};
use fdintake::{EventLog, IntakeDesk, intake_registry};
use fdobserve::{
    CompositeToolHooks, MetricsObservabilityHooks, SafeToolHooks, TracingObservabilityHooks,
};
use fdprovider::ModelProvider;
use fdtooling::{DefaultToolRuntime, ToolRuntime};

#[derive(Clone)]
pub struct FrontDesk {
    pub chat: ChatService,
    pub tool_runtime: Arc<dyn ToolRuntime>,
    model: String,
    system_prompt: String,
}

impl FrontDesk {
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn start_session(&self) -> ChatSession {
        self.chat
            .start_session(self.model.clone())
            .with_system_prompt(self.system_prompt.clone())
    }
}

pub fn default_tool_hooks() -> CompositeToolHooks {
    CompositeToolHooks::new()
        .with(Arc::new(SafeToolHooks::new(TracingObservabilityHooks)))
        .with(Arc::new(SafeToolHooks::new(MetricsObservabilityHooks)))
}

pub fn intake_tool_runtime(log: Arc<dyn EventLog>) -> Arc<dyn ToolRuntime> {
    let desk = IntakeDesk::new(log);
    Arc::new(
        DefaultToolRuntime::new(Arc::new(intake_registry(&desk)))
            .with_hooks(Arc::new(default_tool_hooks())),
    )
}

/// Wires a front desk around any provider and event log.
pub fn build_frontdesk_with(
    provider: Arc<dyn ModelProvider>,
    log: Arc<dyn EventLog>,
    policy: ChatPolicy,
    model: impl Into<String>,
    system_prompt: impl Into<String>,
) -> FrontDesk {
    let tool_runtime = intake_tool_runtime(log);
    let chat = ChatService::builder(provider)
        .tool_runtime(Arc::clone(&tool_runtime))
        .policy(policy)
        .build();

    FrontDesk {
        chat,
        tool_runtime,
        model: model.into(),
        system_prompt: system_prompt.into(),
    }
}

/// Builds the production front desk: Gemini over HTTP and a JSONL event log.
#[cfg(feature = "provider-gemini")]
pub fn build_frontdesk(
    config: &crate::AgentConfig,
) -> Result<FrontDesk, fdprovider::ProviderError> {
    use fdintake::JsonlEventLog;
    use fdprovider::ProviderError;
    use fdprovider::adapters::gemini::{GeminiHttpTransport, GeminiProvider};

    let http = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .map_err(|err| ProviderError::transport(err.to_string()))?;
    let provider = GeminiProvider::new(
        config.api_key.expose(),
        Arc::new(GeminiHttpTransport::new(http)),
    )?;

    tracing::info!(
        phase = "startup",
        event = "frontdesk_ready",
        provider = %provider.id(),
        model = config.model,
        log_dir = %config.event_log.dir.display(),
        max_tool_round_trips = config.policy.max_tool_round_trips
    );

    Ok(build_frontdesk_with(
        Arc::new(provider),
        Arc::new(JsonlEventLog::new(config.event_log.clone())),
        config.policy,
        config.model.clone(),
        config.system_prompt.clone(),
    ))
}
