//! Gemini `ModelProvider` implementation.

use std::sync::Arc;

use crate::{
    ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderFuture, ProviderId,
    SecretString,
};

use super::serde_api::{build_api_request, into_model_response};
use super::transport::GeminiTransport;

#[derive(Debug, Clone)]
pub struct GeminiProvider {
    api_key: Arc<SecretString>,
    transport: Arc<dyn GeminiTransport>,
}

impl GeminiProvider {
    pub fn new(
        api_key: impl Into<String>,
        transport: Arc<dyn GeminiTransport>,
    ) -> Result<Self, ProviderError> {
        let api_key = SecretString::new(api_key);
        if api_key.is_empty() {
            return Err(ProviderError::authentication(
                "Gemini API key must not be empty",
            ));
        }

        Ok(Self {
            api_key: Arc::new(api_key),
            transport,
        })
    }
}

impl ModelProvider for GeminiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let api_request = build_api_request(&request);

            tracing::debug!(
                phase = "provider",
                event = "request",
                provider = %ProviderId::Gemini,
                model = %request.model,
                contents = api_request.contents.len(),
                tools = request.tools.len()
            );

            let response = self
                .transport
                .generate_content(&request.model, api_request, &self.api_key)
                .await?;

            into_model_response(response, &request.model)
        })
    }
}
