use std::sync::Arc;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest,
    },
    Client,
};
use extera_types::{AgentError, ModelSettings, ProviderKind};

/// Single-shot completion capability implemented by each provider backend.
#[async_trait::async_trait]
pub trait ProviderClient: Send + Sync {
    /// Submit the prompt with the given generation parameters and return the
    /// completion text. One request, one response; no streaming, no retry.
    async fn generate(&self, prompt: &str, settings: &ModelSettings)
        -> Result<String, AgentError>;
}

/// Completion client for the OpenAI chat API.
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
}

impl OpenAiClient {
    /// Reads the API key from `OPENAI_API_KEY`.
    pub fn new() -> Self {
        let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
        Self::with_api_key(&api_key)
    }

    pub fn with_api_key(api_key: &str) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Client::with_config(config),
        }
    }
}

impl Default for OpenAiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ProviderClient for OpenAiClient {
    async fn generate(
        &self,
        prompt: &str,
        settings: &ModelSettings,
    ) -> Result<String, AgentError> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt.to_string())
            .build()
            .map_err(|e| AgentError::Provider(e.to_string()))?;

        let request = CreateChatCompletionRequest {
            model: settings.model.clone(),
            messages: vec![ChatCompletionRequestMessage::User(message)],
            temperature: Some(settings.temperature),
            max_completion_tokens: Some(settings.max_tokens),
            top_p: Some(settings.top_p),
            frequency_penalty: Some(settings.frequency_penalty),
            presence_penalty: Some(settings.presence_penalty),
            ..Default::default()
        };

        tracing::debug!(
            "Chat completion request model={} temperature={} max_tokens={}",
            settings.model,
            settings.temperature,
            settings.max_tokens
        );

        let response = self.client.chat().create(request).await.map_err(|e| {
            tracing::error!("OpenAI request failed: {}", e);
            AgentError::Provider(format!("OpenAI API error: {}", e))
        })?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| AgentError::Provider("completion returned no choices".to_string()))?;

        Ok(choice.message.content.clone().unwrap_or_default())
    }
}

/// Map a raw `ai_model` identifier onto a provider client.
///
/// Unknown identifiers fail with `UnsupportedProvider`; known identifiers
/// without a client fail with `ProviderNotImplemented`. The two are kept
/// distinct so callers can tell a typo from a missing backend.
pub fn create_provider(ai_model: &str) -> Result<Arc<dyn ProviderClient>, AgentError> {
    match ai_model.parse::<ProviderKind>()? {
        ProviderKind::OpenAi => Ok(Arc::new(OpenAiClient::new())),
        kind @ (ProviderKind::Anthropic | ProviderKind::Google) => {
            Err(AgentError::ProviderNotImplemented(kind))
        }
    }
}
