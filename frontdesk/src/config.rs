//! Startup configuration resolved from flags with environment fallbacks.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use fdchat::ChatPolicy;
use fdintake::{DEFAULT_LOG_DIR, EventLogConfig};
use fdprovider::SecretString;

use crate::prompt::{DEFAULT_BUSINESS_NAME, build_system_prompt};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone, Parser)]
#[command(
    name = "frontdesk",
    version,
    about = "Conversational front desk agent with lead capture and feedback logging"
)]
pub struct AgentArgs {
    /// Gemini API key.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Gemini model name.
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Directory holding leads.jsonl and feedback.jsonl.
    #[arg(long, env = "LOG_DIR", default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,

    /// Tool round trips allowed per user turn; 0 removes the cap.
    #[arg(long, env = "FRONTDESK_MAX_TOOL_ROUND_TRIPS", default_value_t = ChatPolicy::DEFAULT_MAX_TOOL_ROUND_TRIPS)]
    pub max_tool_round_trips: usize,

    /// Business name used in the built-in system prompt.
    #[arg(long, env = "FRONTDESK_BUSINESS_NAME", default_value = DEFAULT_BUSINESS_NAME)]
    pub business_name: String,

    /// Grounding text the agent answers from.
    #[arg(long, env = "FRONTDESK_KNOWLEDGE", default_value = "")]
    pub knowledge: String,

    /// Replaces the built-in system prompt entirely.
    #[arg(long, env = "FRONTDESK_SYSTEM_PROMPT")]
    pub system_prompt: Option<String>,

    /// Per-request timeout for the model API, in seconds.
    #[arg(long, env = "FRONTDESK_REQUEST_TIMEOUT_SECS", default_value_t = 90)]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    pub api_key: SecretString,
    pub model: String,
    pub event_log: EventLogConfig,
    pub policy: ChatPolicy,
    pub system_prompt: String,
    pub request_timeout: Duration,
}

impl AgentConfig {
    pub fn from_args(args: AgentArgs) -> Result<Self, ConfigError> {
        let api_key = args
            .api_key
            .map(SecretString::new)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                ConfigError::missing_api_key(
                    "missing GEMINI_API_KEY; set it in the environment or a .env file",
                )
            })?;

        let model = args.model.trim().to_string();
        if model.is_empty() {
            return Err(ConfigError::invalid("model must not be empty"));
        }

        if args.request_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "request timeout must be at least one second",
            ));
        }

        let policy = match args.max_tool_round_trips {
            0 => ChatPolicy::unbounded(),
            limit => ChatPolicy::bounded(limit),
        };

        let system_prompt = match args.system_prompt {
            Some(prompt) if !prompt.trim().is_empty() => prompt,
            _ => build_system_prompt(&args.business_name, &args.knowledge),
        };

        Ok(Self {
            api_key,
            model,
            event_log: EventLogConfig::new(args.log_dir),
            policy,
            system_prompt,
            request_timeout: Duration::from_secs(args.request_timeout_secs),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    MissingApiKey,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub kind: ConfigErrorKind,
    pub message: String,
}

impl ConfigError {
    pub fn new(kind: ConfigErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn missing_api_key(message: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::MissingApiKey, message)
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::Invalid, message)
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ConfigError {}
