//! Chat-layer errors and classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

use fdprovider::{ProviderError, ProviderErrorKind};

/// The only failure text an end user ever sees.
pub const APOLOGY_MESSAGE: &str =
    "Sorry, something went wrong on our side. Please try sending that again in a moment.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    InvalidRequest,
    Provider,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
    pub provider_kind: Option<ProviderErrorKind>,
    pub retryable: bool,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            provider_kind: None,
            retryable: false,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::InvalidRequest, message)
    }

    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    pub fn user_facing_message(&self) -> &'static str {
        APOLOGY_MESSAGE
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ChatError {}

impl From<ProviderError> for ChatError {
    fn from(value: ProviderError) -> Self {
        Self {
            kind: ChatErrorKind::Provider,
            message: value.to_string(),
            provider_kind: Some(value.kind),
            retryable: value.retryable,
        }
    }
}
