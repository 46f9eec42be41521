//! The closed set of intake tools and their typed arguments.

use fdprovider::{ToolArguments, ToolDefinition, ToolParameter};
use fdtooling::{
    Tool, ToolError, ToolExecutionContext, ToolFuture, ToolRegistry, parse_arguments,
};
use serde::Deserialize;
use serde_json::Value;

use crate::IntakeDesk;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntakeTool {
    RecordCustomerInterest,
    RecordFeedback,
}

impl IntakeTool {
    pub const ALL: [IntakeTool; 2] = [Self::RecordCustomerInterest, Self::RecordFeedback];

    pub fn name(self) -> &'static str {
        match self {
            Self::RecordCustomerInterest => "record_customer_interest",
            Self::RecordFeedback => "record_feedback",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn definition(self) -> ToolDefinition {
        match self {
            Self::RecordCustomerInterest => ToolDefinition::new(
                self.name(),
                "Use when the user wants services or follow-up. Ask for missing fields first. \
                 Do NOT call if email/name/message are unknown.",
            )
            .with_parameter(ToolParameter::required_string(
                "email",
                "Customer email address.",
            ))
            .with_parameter(ToolParameter::required_string("name", "Customer full name."))
            .with_parameter(ToolParameter::required_string(
                "message",
                "Short note on project/needs/context.",
            )),
            Self::RecordFeedback => ToolDefinition::new(
                self.name(),
                "Use when the question is not answered by the provided business knowledge or \
                 confidence is low. Do NOT guess. Pass the user's exact question.",
            )
            .with_parameter(ToolParameter::required_string(
                "question",
                "The user question the bot failed to answer.",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomerInterest {
    pub email: String,
    pub name: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedbackQuestion {
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeCall {
    RecordCustomerInterest(CustomerInterest),
    RecordFeedback(FeedbackQuestion),
}

impl IntakeCall {
    /// Decodes `arguments` into the typed call for `tool`.
    pub fn parse(tool: IntakeTool, arguments: &ToolArguments) -> Result<Self, ToolError> {
        match tool {
            IntakeTool::RecordCustomerInterest => {
                parse_arguments(arguments).map(Self::RecordCustomerInterest)
            }
            IntakeTool::RecordFeedback => parse_arguments(arguments).map(Self::RecordFeedback),
        }
    }
}

struct IntakeToolHandler {
    tool: IntakeTool,
    desk: IntakeDesk,
}

impl Tool for IntakeToolHandler {
    fn definition(&self) -> ToolDefinition {
        self.tool.definition()
    }

    fn invoke<'a>(
        &'a self,
        arguments: &'a ToolArguments,
        _context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<Value, ToolError>> {
        Box::pin(async move {
            let call = IntakeCall::parse(self.tool, arguments)?;
            self.desk.dispatch(call)
        })
    }
}

/// Builds the registry holding every [`IntakeTool`], all backed by `desk`.
pub fn intake_registry(desk: &IntakeDesk) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    for tool in IntakeTool::ALL {
        registry.register(IntakeToolHandler {
            tool,
            desk: desk.clone(),
        });
    }
    registry
}
