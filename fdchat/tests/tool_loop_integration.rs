use std::collections::VecDeque;
use std::fs;
use std::sync::{Arc, Mutex};

use fdchat::prelude::*;
use fdchat::{APOLOGY_MESSAGE, MAX_TOOL_ITERATIONS_EXCEEDED};
use fdintake::{EventLogConfig, EventStream, IntakeDesk, JsonlEventLog, intake_registry};
use fdprovider::{
    MessagePart, ModelProvider, ModelRequest, ModelResponse, OutputItem, ProviderError,
    ProviderFuture, ProviderId, Role, StopReason, TokenUsage, ToolCall, ToolDefinition,
};
use serde_json::{Map, Value, json};

#[derive(Debug)]
struct ScriptedProvider {
    script: Mutex<VecDeque<Result<ModelResponse, ProviderError>>>,
    requests: Mutex<Vec<ModelRequest>>,
}

impl ScriptedProvider {
    fn new(script: Vec<Result<ModelResponse, ProviderError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn push(&self, response: Result<ModelResponse, ProviderError>) {
        self.script.lock().expect("script lock").push_back(response);
    }

    fn request_count(&self) -> usize {
        self.requests.lock().expect("requests lock").len()
    }

    fn request(&self, index: usize) -> ModelRequest {
        self.requests.lock().expect("requests lock")[index].clone()
    }

    fn last_request(&self) -> ModelRequest {
        self.request(self.request_count() - 1)
    }
}

impl ModelProvider for ScriptedProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Scripted
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            self.requests
                .lock()
                .expect("requests lock")
                .push(request);
            self.script
                .lock()
                .expect("script lock")
                .pop_front()
                .unwrap_or_else(|| Err(ProviderError::other("script exhausted")))
        })
    }
}

fn tool_request(name: &str, arguments: Value) -> Result<ModelResponse, ProviderError> {
    let arguments = match arguments {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    Ok(ModelResponse {
        provider: ProviderId::Scripted,
        model: "scripted-model".to_string(),
        output: vec![OutputItem::ToolCall(ToolCall::new(
            format!("call_{name}"),
            name,
            arguments,
        ))],
        text: None,
        stop_reason: StopReason::ToolUse,
        usage: TokenUsage::default(),
    })
}

fn answer(text: &str) -> Result<ModelResponse, ProviderError> {
    Ok(ModelResponse {
        provider: ProviderId::Scripted,
        model: "scripted-model".to_string(),
        output: vec![OutputItem::Text(text.to_string())],
        text: Some(text.to_string()),
        stop_reason: StopReason::EndTurn,
        usage: TokenUsage::default(),
    })
}

fn x_runtime() -> Arc<dyn ToolRuntime> {
    let mut registry = ToolRegistry::new();
    registry.register_sync_fn(ToolDefinition::new("X", "Does X"), |_args, _ctx| {
        Ok(json!({ "ok": true, "did": "x" }))
    });
    Arc::new(DefaultToolRuntime::new(Arc::new(registry)))
}

#[tokio::test]
async fn single_tool_request_performs_exactly_one_round_trip() {
    let provider = ScriptedProvider::new(vec![tool_request("X", json!({})), answer("X is done.")]);
    let service = ChatService::builder(provider.clone())
        .tool_runtime(x_runtime())
        .build();
    let mut session = ChatSession::start("scripted-model");

    let turn = service.run_turn(&mut session, "please do X").await.expect("turn");

    assert_eq!(turn.assistant_message, "X is done.");
    assert_eq!(turn.tool_round_trips, 1);
    assert!(!turn.tool_round_limit_reached);
    assert_eq!(provider.request_count(), 2);

    let roles = session
        .messages()
        .iter()
        .map(|message| message.role)
        .collect::<Vec<_>>();
    assert_eq!(
        roles,
        vec![Role::User, Role::Assistant, Role::Tool, Role::Assistant]
    );
}

#[tokio::test]
async fn unknown_tool_is_reported_to_the_model_without_failing_the_turn() {
    let provider = ScriptedProvider::new(vec![
        tool_request("lookup_hours", json!({ "day": "friday" })),
        answer("I can't check hours, but I've noted it."),
    ]);
    let service = ChatService::builder(provider.clone())
        .tool_runtime(x_runtime())
        .build();
    let mut session = ChatSession::start("scripted-model");

    let turn = service
        .run_turn(&mut session, "are you open friday?")
        .await
        .expect("unknown tools never fail the turn");

    let result = &turn.tool_results[0];
    assert!(result.error().is_some_and(|code| code.starts_with("unknown_tool:")));
    assert_eq!(result.response["received_args"]["day"], "friday");

    let sent = provider.last_request();
    let Some(MessagePart::ToolResult(sent_result)) =
        sent.messages.last().and_then(|message| message.parts.first())
    else {
        panic!("last sent message should carry the tool result");
    };
    assert_eq!(sent_result, result);
}

#[tokio::test]
async fn round_trip_limit_answers_pending_calls_and_stops_sending() {
    let provider = ScriptedProvider::new(vec![
        tool_request("X", json!({})),
        tool_request("X", json!({})),
        tool_request("X", json!({})),
    ]);
    let service = ChatService::builder(provider.clone())
        .tool_runtime(x_runtime())
        .max_tool_round_trips(2)
        .build();
    let mut session = ChatSession::start("scripted-model");

    let turn = service.run_turn(&mut session, "loop forever").await.expect("turn");

    assert!(turn.tool_round_limit_reached);
    assert_eq!(turn.tool_round_trips, 2);
    assert_eq!(provider.request_count(), 3);
    assert_eq!(turn.tool_results.len(), 3);
    assert_eq!(
        turn.tool_results[2].error(),
        Some(MAX_TOOL_ITERATIONS_EXCEEDED)
    );

    let calls = session
        .messages()
        .iter()
        .flat_map(|message| message.tool_calls())
        .count();
    let results = session
        .messages()
        .iter()
        .flat_map(|message| message.tool_results())
        .count();
    assert_eq!(calls, results);
}

#[tokio::test]
async fn unbounded_policy_follows_the_model_until_it_stops() {
    let mut script = (0..15)
        .map(|_| tool_request("X", json!({})))
        .collect::<Vec<_>>();
    script.push(answer("finally"));
    let provider = ScriptedProvider::new(script);
    let service = ChatService::builder(provider)
        .tool_runtime(x_runtime())
        .policy(ChatPolicy::unbounded())
        .build();
    let mut session = ChatSession::start("scripted-model");

    let turn = service.run_turn(&mut session, "go").await.expect("turn");

    assert_eq!(turn.assistant_message, "finally");
    assert_eq!(turn.tool_round_trips, 15);
}

#[tokio::test]
async fn transport_error_propagates_and_session_continues_next_turn() {
    let provider = ScriptedProvider::new(vec![
        tool_request("X", json!({})),
        Err(ProviderError::transport("connection reset")),
    ]);
    let service = ChatService::builder(provider.clone())
        .tool_runtime(x_runtime())
        .build();
    let mut session = ChatSession::start("scripted-model");

    let error = service
        .ask(&mut session, "do X")
        .await
        .expect_err("transport failure propagates");
    assert_eq!(error.kind, ChatErrorKind::Provider);
    assert!(error.is_retryable());
    assert_eq!(error.user_facing_message(), APOLOGY_MESSAGE);
    assert_eq!(session.len(), 3);

    provider.push(answer("Back again."));
    let reply = service.ask(&mut session, "hello?").await.expect("next turn");
    assert_eq!(reply, "Back again.");
    assert_eq!(provider.last_request().messages.len(), 4);
}

#[tokio::test]
async fn reset_starts_from_empty_history() {
    let provider = ScriptedProvider::new(vec![answer("hi"), answer("hello again")]);
    let service = ChatService::new(provider.clone());
    let mut session = service.start_session("scripted-model");
    service.ask(&mut session, "first").await.expect("first turn");
    let old_id = session.id().to_string();

    let mut session = service.reset(session);
    assert_eq!(session.len(), 0);
    assert_ne!(session.id(), old_id);

    service.ask(&mut session, "second").await.expect("second turn");
    assert_eq!(provider.last_request().messages.len(), 1);
}

#[tokio::test]
async fn lead_request_is_recorded_and_confirmed() {
    let root = tempfile::tempdir().expect("tempdir");
    let log = Arc::new(JsonlEventLog::new(EventLogConfig::new(root.path().join("logs"))));
    let desk = IntakeDesk::new(log.clone());
    let runtime = Arc::new(DefaultToolRuntime::new(Arc::new(intake_registry(&desk))));

    let provider = ScriptedProvider::new(vec![
        tool_request(
            "record_customer_interest",
            json!({
                "email": "a@b.com",
                "name": "Jane",
                "message": "poetry chapbook edit",
            }),
        ),
        answer("Thanks Jane, we'll email you at a@b.com shortly."),
    ]);
    let service = ChatService::builder(provider.clone())
        .tool_runtime(runtime)
        .build();
    let mut session = ChatSession::start("scripted-model");

    let turn = service
        .run_turn(
            &mut session,
            "I'd like a quote, email me at a@b.com, I'm Jane, need a poetry chapbook edited",
        )
        .await
        .expect("turn");

    assert_eq!(
        turn.assistant_message,
        "Thanks Jane, we'll email you at a@b.com shortly."
    );
    let result = &turn.tool_results[0];
    assert!(result.is_ok());

    let first_request = provider.request(0);
    let advertised = first_request
        .tools
        .iter()
        .map(|tool| tool.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(advertised, vec!["record_customer_interest", "record_feedback"]);

    let contents =
        fs::read_to_string(log.stream_path(EventStream::Leads)).expect("lead log written");
    let lines = contents.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 1);
    let record: Value = serde_json::from_str(lines[0]).expect("record JSON");
    assert_eq!(record["lead_id"], result.response["lead_id"]);
    assert_eq!(record["ts"], result.response["ts"]);
    assert_eq!(record["email"], "a@b.com");
    assert_eq!(record["name"], "Jane");
    assert_eq!(record["message"], "poetry chapbook edit");
}
