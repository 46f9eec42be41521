use serde_json::{Map, Value, json};

use super::serde_api::{build_api_request, into_model_response, parse_finish_reason};
use super::{GeminiCandidate, GeminiContent, GeminiFunctionCall, GeminiPart, GeminiResponse};
use crate::{
    Message, MessagePart, ModelRequest, OutputItem, ProviderErrorKind, Role, StopReason, ToolCall,
    ToolDefinition, ToolParameter, ToolResult,
};

fn args(pairs: &[(&str, &str)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
        .collect()
}

fn candidate(parts: Vec<GeminiPart>, finish_reason: &str) -> GeminiResponse {
    GeminiResponse {
        candidates: vec![GeminiCandidate {
            content: Some(GeminiContent {
                role: Some("model".to_string()),
                parts,
            }),
            finish_reason: Some(finish_reason.to_string()),
        }],
        usage_metadata: None,
        model_version: None,
        prompt_feedback: None,
    }
}

#[test]
fn request_maps_roles_parts_and_system_instruction() {
    let call = ToolCall::new("call_1", "record_feedback", args(&[("question", "rates?")]));
    let request = ModelRequest::builder("gemini-2.5-flash")
        .system_prompt("You are the front desk.")
        .message(Message::new(Role::User, "What are your rates?"))
        .message(Message::with_parts(
            Role::Assistant,
            vec![MessagePart::ToolCall(call.clone())],
        ))
        .message(Message::tool_result(ToolResult::for_call(
            &call,
            json!({"ok": true, "feedback_id": "f-1"}),
        )))
        .temperature(0.2)
        .build()
        .expect("request should build");

    let api = build_api_request(&request);
    let encoded = serde_json::to_value(&api).expect("request should serialize");

    assert_eq!(
        encoded["systemInstruction"]["parts"][0]["text"],
        "You are the front desk."
    );
    assert_eq!(encoded["contents"][0]["role"], "user");
    assert_eq!(encoded["contents"][1]["role"], "model");
    assert_eq!(
        encoded["contents"][1]["parts"][0]["functionCall"]["name"],
        "record_feedback"
    );
    assert_eq!(encoded["contents"][2]["role"], "user");
    assert_eq!(
        encoded["contents"][2]["parts"][0]["functionResponse"]["response"]["ok"],
        true
    );
    assert!(encoded["generationConfig"]["temperature"].is_number());
    assert!(encoded.get("tools").is_none());
}

#[test]
fn tool_definitions_become_function_declarations() {
    let definition = ToolDefinition::new("record_feedback", "Log an unanswered question.")
        .with_parameter(ToolParameter::required_string(
            "question",
            "The user question.",
        ));
    let request = ModelRequest::builder("gemini")
        .message(Message::new(Role::User, "hi"))
        .tools(vec![definition])
        .build()
        .expect("request should validate");

    let encoded = serde_json::to_value(build_api_request(&request)).expect("serialize");
    let declaration = &encoded["tools"][0]["functionDeclarations"][0];

    assert_eq!(declaration["name"], "record_feedback");
    assert_eq!(declaration["parameters"]["type"], "OBJECT");
    assert_eq!(
        declaration["parameters"]["properties"]["question"]["type"],
        "STRING"
    );
    assert_eq!(declaration["parameters"]["required"], json!(["question"]));
}

#[test]
fn text_only_candidate_yields_consolidated_text() {
    let response = candidate(
        vec![GeminiPart::text("Hello, "), GeminiPart::text("welcome.")],
        "STOP",
    );

    let mapped = into_model_response(response, "gemini-2.5-flash").expect("maps");
    assert_eq!(mapped.text.as_deref(), Some("Hello, welcome."));
    assert_eq!(mapped.stop_reason, StopReason::EndTurn);
    assert_eq!(mapped.model, "gemini-2.5-flash");
    assert!(!mapped.has_tool_calls());
}

#[test]
fn function_call_parts_get_generated_ids_and_no_consolidated_text() {
    let response = candidate(
        vec![
            GeminiPart::text("Let me log that."),
            GeminiPart {
                function_call: Some(GeminiFunctionCall {
                    name: "record_feedback".to_string(),
                    args: args(&[("question", "Do you do screenplays?")]),
                }),
                ..GeminiPart::default()
            },
        ],
        "STOP",
    );

    let mapped = into_model_response(response, "gemini").expect("maps");
    assert_eq!(mapped.text, None);
    assert_eq!(mapped.stop_reason, StopReason::ToolUse);

    let calls = mapped.tool_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].name, "record_feedback");
    assert!(!calls[0].id.is_empty());
    assert!(matches!(mapped.output[0], OutputItem::Text(_)));
}

#[test]
fn missing_candidates_is_an_invalid_response() {
    let error = into_model_response(GeminiResponse::default(), "gemini")
        .expect_err("empty candidates must fail");
    assert_eq!(error.kind, ProviderErrorKind::InvalidResponse);
}

#[test]
fn blocked_prompt_maps_to_blocked_error() {
    let body = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
    let response: GeminiResponse = serde_json::from_value(body).expect("deserializes");

    let error = into_model_response(response, "gemini").expect_err("blocked prompt must fail");
    assert_eq!(error.kind, ProviderErrorKind::Blocked);
    assert_eq!(error.message, "prompt blocked: SAFETY");
    assert!(!error.retryable);
}

#[test]
fn response_json_deserializes_with_usage() {
    let body = json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"functionCall": {"name": "record_customer_interest", "args": {"email": "a@b.com"}}}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 3, "totalTokenCount": 13},
        "modelVersion": "gemini-2.5-flash-001"
    });

    let parsed: GeminiResponse = serde_json::from_value(body).expect("deserialize");
    let mapped = into_model_response(parsed, "gemini-2.5-flash").expect("maps");

    assert_eq!(mapped.model, "gemini-2.5-flash-001");
    assert_eq!(mapped.usage.total_tokens, 13);
    assert_eq!(mapped.tool_calls()[0].arguments["email"], "a@b.com");
}

#[test]
fn finish_reason_mapping() {
    assert_eq!(parse_finish_reason(Some("MAX_TOKENS"), false), StopReason::MaxTokens);
    assert_eq!(parse_finish_reason(Some("SAFETY"), false), StopReason::Safety);
    assert_eq!(parse_finish_reason(None, false), StopReason::Other);
    assert_eq!(parse_finish_reason(Some("STOP"), true), StopReason::ToolUse);
}
