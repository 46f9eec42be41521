//! Turn orchestration: send history, run requested tools, repeat until the
//! model answers in plain text.

use std::collections::VecDeque;
use std::sync::Arc;

use fdprovider::{
    Message, ModelProvider, ModelRequest, ModelResponse, Role, TokenUsage, ToolCall, ToolResult,
};
use fdtooling::{ToolError, ToolExecutionContext, ToolRuntime, failure_result};
use serde_json::json;
use uuid::Uuid;

use crate::{ChatError, ChatPolicy, ChatSession, ChatTurnResult};

pub const MAX_TOOL_ITERATIONS_EXCEEDED: &str = "max_tool_iterations_exceeded";

#[derive(Clone)]
pub struct ChatService {
    provider: Arc<dyn ModelProvider>,
    tool_runtime: Option<Arc<dyn ToolRuntime>>,
    policy: ChatPolicy,
}

pub struct ChatServiceBuilder {
    provider: Arc<dyn ModelProvider>,
    tool_runtime: Option<Arc<dyn ToolRuntime>>,
    policy: ChatPolicy,
}

impl ChatServiceBuilder {
    pub fn tool_runtime(mut self, tool_runtime: Arc<dyn ToolRuntime>) -> Self {
        self.tool_runtime = Some(tool_runtime);
        self
    }

    pub fn policy(mut self, policy: ChatPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn max_tool_round_trips(mut self, max_tool_round_trips: usize) -> Self {
        self.policy.max_tool_round_trips = Some(max_tool_round_trips);
        self
    }

    pub fn build(self) -> ChatService {
        ChatService {
            provider: self.provider,
            tool_runtime: self.tool_runtime,
            policy: self.policy,
        }
    }
}

impl ChatService {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self::builder(provider).build()
    }

    pub fn builder(provider: Arc<dyn ModelProvider>) -> ChatServiceBuilder {
        ChatServiceBuilder {
            provider,
            tool_runtime: None,
            policy: ChatPolicy::default(),
        }
    }

    pub fn policy(&self) -> ChatPolicy {
        self.policy
    }

    pub fn start_session(&self, model: impl Into<String>) -> ChatSession {
        ChatSession::start(model)
    }

    pub fn reset(&self, session: ChatSession) -> ChatSession {
        session.reset()
    }

    /// Runs one user turn and returns only the final assistant text.
    pub async fn ask(
        &self,
        session: &mut ChatSession,
        user_input: impl Into<String>,
    ) -> Result<String, ChatError> {
        self.run_turn(session, user_input)
            .await
            .map(|turn| turn.assistant_message)
    }

    /// Runs one user turn to completion.
    ///
    /// Every tool call is answered by exactly one tool result in the session
    /// history, in the order the calls were requested, and each result is sent
    /// back on its own request. Provider failures propagate and leave whatever
    /// history was already appended in place.
    pub async fn run_turn(
        &self,
        session: &mut ChatSession,
        user_input: impl Into<String>,
    ) -> Result<ChatTurnResult, ChatError> {
        let user_input = user_input.into();
        if user_input.trim().is_empty() {
            return Err(ChatError::invalid_request("user_input must not be empty"));
        }

        session.append(Message::new(Role::User, user_input));
        let trace_id = Uuid::new_v4().to_string();

        let mut usage = TokenUsage::default();
        let mut response = self.send(session, &mut usage).await?;

        let mut pending = VecDeque::from(response.tool_calls());
        let mut tool_results = Vec::new();
        let mut round_trips = 0;
        let mut limit_reached = false;

        while let Some(call) = pending.pop_front() {
            if !self.policy.allows_round_trip(round_trips) {
                tracing::warn!(
                    phase = "chat",
                    event = "tool_round_limit_reached",
                    session_id = session.id(),
                    round_trips,
                    unanswered = pending.len() + 1
                );

                for call in std::iter::once(call).chain(pending.drain(..)) {
                    let result = ToolResult::for_call(
                        &call,
                        json!({ "ok": false, "error": MAX_TOOL_ITERATIONS_EXCEEDED }),
                    );
                    session.append(Message::tool_result(result.clone()));
                    tool_results.push(result);
                }
                limit_reached = true;
                break;
            }

            let result = self.execute_tool(session, &trace_id, &call).await;
            session.append(Message::tool_result(result.clone()));
            tool_results.push(result);
            round_trips += 1;

            response = self.send(session, &mut usage).await?;
            pending.extend(response.tool_calls());
        }

        tracing::debug!(
            phase = "chat",
            event = "turn_complete",
            session_id = session.id(),
            trace_id = %trace_id,
            round_trips,
            limit_reached,
            history_len = session.len()
        );

        Ok(ChatTurnResult {
            session_id: session.id().to_string(),
            assistant_message: response.final_text(),
            tool_results,
            tool_round_trips: round_trips,
            tool_round_limit_reached: limit_reached,
            stop_reason: response.stop_reason,
            usage,
        })
    }

    async fn send(
        &self,
        session: &mut ChatSession,
        usage: &mut TokenUsage,
    ) -> Result<ModelResponse, ChatError> {
        let mut builder = ModelRequest::builder(session.model())
            .messages(session.messages().iter().cloned())
            .tools(self.tool_definitions());
        if let Some(system_prompt) = session.system_prompt() {
            builder = builder.system_prompt(system_prompt);
        }

        let response = self.provider.complete(builder.build()?).await?;
        usage.accumulate(response.usage);
        session.append(response.to_message());
        Ok(response)
    }

    /// Runs one call. Every call in a turn shares the turn's `trace_id`.
    async fn execute_tool(
        &self,
        session: &ChatSession,
        trace_id: &str,
        call: &ToolCall,
    ) -> ToolResult {
        let Some(runtime) = &self.tool_runtime else {
            return failure_result(call, &ToolError::unknown_tool(call.name.clone()));
        };

        let context = ToolExecutionContext::new(session.id()).with_trace_id(trace_id);
        match runtime.execute(call.clone(), context).await {
            Ok(result) => result.into_tool_result(),
            Err(error) => {
                tracing::warn!(
                    phase = "chat",
                    event = "tool_failed",
                    session_id = session.id(),
                    tool_name = call.name,
                    tool_call_id = call.id,
                    error_kind = ?error.kind,
                    error = %error
                );
                failure_result(call, &error)
            }
        }
    }

    fn tool_definitions(&self) -> Vec<fdprovider::ToolDefinition> {
        self.tool_runtime
            .as_ref()
            .map(|runtime| runtime.definitions())
            .unwrap_or_default()
    }
}
