//! Gemini `generateContent` payload serde models and conversion helpers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::{
    Message, MessagePart, ModelRequest, ModelResponse, OutputItem, ParameterKind, ProviderError,
    ProviderId, Role, StopReason, TokenUsage, ToolCall, ToolDefinition,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<GeminiTool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<GeminiFunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<GeminiFunctionResponse>,
}

impl GeminiPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiFunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiFunctionResponse {
    pub name: String,
    pub response: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiTool {
    pub function_declarations: Vec<GeminiFunctionDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeminiFunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    pub usage_metadata: Option<GeminiUsage>,
    #[serde(default)]
    pub model_version: Option<String>,
    #[serde(default)]
    pub prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiPromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiUsage {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<GeminiErrorEnvelope>(body).ok()?;
    Some(parsed.error.message)
}

pub(crate) fn build_api_request(request: &ModelRequest) -> GeminiRequest {
    let mut system_parts = request
        .system_prompt
        .iter()
        .filter(|prompt| !prompt.trim().is_empty())
        .map(|prompt| GeminiPart::text(prompt.clone()))
        .collect::<Vec<_>>();

    let mut contents = Vec::new();
    for message in &request.messages {
        if message.role == Role::System {
            system_parts.extend(message_parts(message));
            continue;
        }

        let parts = message_parts(message);
        if parts.is_empty() {
            continue;
        }

        contents.push(GeminiContent {
            role: Some(content_role(message.role).to_string()),
            parts,
        });
    }

    let system_instruction = if system_parts.is_empty() {
        None
    } else {
        Some(GeminiContent {
            role: None,
            parts: system_parts,
        })
    };

    let tools = if request.tools.is_empty() {
        Vec::new()
    } else {
        vec![GeminiTool {
            function_declarations: request.tools.iter().map(function_declaration).collect(),
        }]
    };

    let generation_config = if request.temperature.is_none() && request.max_tokens.is_none() {
        None
    } else {
        Some(GeminiGenerationConfig {
            temperature: request.temperature,
            max_output_tokens: request.max_tokens,
        })
    };

    GeminiRequest {
        contents,
        system_instruction,
        tools,
        generation_config,
    }
}

fn content_role(role: Role) -> &'static str {
    match role {
        Role::Assistant => "model",
        Role::System | Role::User | Role::Tool => "user",
    }
}

fn message_parts(message: &Message) -> Vec<GeminiPart> {
    message
        .parts
        .iter()
        .filter_map(|part| match part {
            MessagePart::Text(text) if text.is_empty() => None,
            MessagePart::Text(text) => Some(GeminiPart::text(text.clone())),
            MessagePart::ToolCall(call) => Some(GeminiPart {
                function_call: Some(GeminiFunctionCall {
                    name: call.name.clone(),
                    args: call.arguments.clone(),
                }),
                ..GeminiPart::default()
            }),
            MessagePart::ToolResult(result) => Some(GeminiPart {
                function_response: Some(GeminiFunctionResponse {
                    name: result.name.clone(),
                    response: result.response.clone(),
                }),
                ..GeminiPart::default()
            }),
        })
        .collect()
}

fn function_declaration(definition: &ToolDefinition) -> GeminiFunctionDeclaration {
    let mut properties = Map::new();
    for parameter in &definition.parameters {
        let kind = match parameter.kind {
            ParameterKind::String => "STRING",
        };
        properties.insert(
            parameter.name.clone(),
            json!({ "type": kind, "description": parameter.description }),
        );
    }

    let required = definition.required_parameters().collect::<Vec<_>>();

    GeminiFunctionDeclaration {
        name: definition.name.clone(),
        description: definition.description.clone(),
        parameters: json!({
            "type": "OBJECT",
            "properties": properties,
            "required": required,
        }),
    }
}

pub(crate) fn parse_finish_reason(value: Option<&str>, has_tool_calls: bool) -> StopReason {
    if has_tool_calls {
        return StopReason::ToolUse;
    }

    match value {
        Some("STOP") => StopReason::EndTurn,
        Some("MAX_TOKENS") => StopReason::MaxTokens,
        Some("SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" | "SPII") => {
            StopReason::Safety
        }
        _ => StopReason::Other,
    }
}

/// Maps the first candidate into the provider-agnostic response.
///
/// Function calls carry no ids on the wire, so each one gets a fresh UUID.
pub(crate) fn into_model_response(
    response: GeminiResponse,
    requested_model: &str,
) -> Result<ModelResponse, ProviderError> {
    let GeminiResponse {
        candidates,
        usage_metadata,
        model_version,
        prompt_feedback,
    } = response;

    let Some(candidate) = candidates.into_iter().next() else {
        return Err(match prompt_feedback.and_then(|feedback| feedback.block_reason) {
            Some(reason) => ProviderError::blocked(format!("prompt blocked: {reason}")),
            None => ProviderError::invalid_response("Gemini response did not include candidates"),
        });
    };

    let mut output = Vec::new();
    let mut text = String::new();
    let mut saw_text = false;
    let mut saw_call = false;

    for part in candidate.content.map(|content| content.parts).unwrap_or_default() {
        if let Some(part_text) = part.text {
            saw_text = true;
            text.push_str(&part_text);
            output.push(OutputItem::Text(part_text));
        }

        if let Some(call) = part.function_call {
            saw_call = true;
            output.push(OutputItem::ToolCall(ToolCall::new(
                uuid::Uuid::new_v4().to_string(),
                call.name,
                call.args,
            )));
        }
    }

    let usage = usage_metadata.unwrap_or_default();

    Ok(ModelResponse {
        provider: ProviderId::Gemini,
        model: model_version.unwrap_or_else(|| requested_model.to_string()),
        output,
        text: (saw_text && !saw_call).then_some(text),
        stop_reason: parse_finish_reason(candidate.finish_reason.as_deref(), saw_call),
        usage: TokenUsage {
            input_tokens: usage.prompt_token_count,
            output_tokens: usage.candidates_token_count,
            total_tokens: usage.total_token_count,
        },
    })
}
