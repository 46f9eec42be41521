//! Google Gemini adapter over the Generative Language `generateContent` API.

mod provider;
mod serde_api;
#[cfg(test)]
mod tests;
mod transport;

pub use provider::GeminiProvider;
pub use serde_api::{
    GeminiCandidate, GeminiContent, GeminiFunctionCall, GeminiFunctionDeclaration,
    GeminiFunctionResponse, GeminiGenerationConfig, GeminiPart, GeminiPromptFeedback,
    GeminiRequest, GeminiResponse, GeminiTool, GeminiUsage,
};
pub use transport::{GEMINI_BASE_URL, GeminiHttpTransport, GeminiTransport};
