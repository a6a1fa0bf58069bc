use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::app_config::AzureOpenAIConfig;
use crate::errors::{ConfigError, ProviderError};
use crate::providers::{ChatMessage, ChatProvider};

/// Azure OpenAI client for the chat-completions API
///
/// Requests are never retried; a failed call is returned to the caller as is.
#[derive(Debug)]
pub struct AzureOpenAI {
    /// HTTP client for API requests
    client: Client,
    /// Fully qualified chat-completions URL, including `api-version`
    url: Url,
    /// API key for authentication
    api_key: String,
    /// Deployment name, kept for logging
    deployment: String,
}

/// Chat-completions request body
///
/// Only the conversation is sent; sampling parameters keep the deployment defaults.
#[derive(Debug, Serialize)]
pub struct AzureChatRequest {
    /// The messages for the conversation
    messages: Vec<ChatMessage>,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Chat-completions response
#[derive(Debug, Deserialize)]
pub struct AzureChatResponse {
    /// Generated choices
    pub choices: Vec<AzureChoice>,
    /// Token usage information
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

/// Individual choice in a chat-completions response
#[derive(Debug, Deserialize)]
pub struct AzureChoice {
    /// The assistant message
    pub message: AzureResponseMessage,
}

/// Assistant message; content is null when the reply was filtered
#[derive(Debug, Deserialize)]
pub struct AzureResponseMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl AzureChatRequest {
    /// Create a new request from messages
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }
}

impl AzureOpenAI {
    /// Create a new Azure OpenAI client
    ///
    /// No request timeout is set unless `timeout_secs` is configured.
    pub fn new(config: &AzureOpenAIConfig) -> Result<Self, ConfigError> {
        let url = Self::chat_completions_url(config)?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            url,
            api_key: config.api_key.clone(),
            deployment: config.deployment.clone(),
        })
    }

    /// Build `{endpoint}/openai/deployments/{deployment}/chat/completions?api-version={version}`
    pub fn chat_completions_url(config: &AzureOpenAIConfig) -> Result<Url, ConfigError> {
        let mut url = config.endpoint_url()?;

        url.path_segments_mut()
            .map_err(|_| ConfigError::InvalidValue {
                key: crate::app_config::ENV_ENDPOINT.to_string(),
                message: "endpoint cannot be a base URL".to_string(),
            })?
            .pop_if_empty()
            .extend(["openai", "deployments", config.deployment.as_str(), "chat", "completions"]);

        url.query_pairs_mut()
            .clear()
            .append_pair("api-version", &config.api_version);

        Ok(url)
    }

    /// Complete a chat request
    pub async fn send(&self, request: &AzureChatRequest) -> Result<AzureChatResponse, ProviderError> {
        debug!("Sending {} message(s) to deployment {}", request.messages.len(), self.deployment);

        let response = self.client.post(self.url.clone())
            .header("api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to send request to Azure OpenAI: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Azure OpenAI API error ({}): {}", status, error_text);

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::AuthenticationError(error_text),
                StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimitExceeded(error_text),
                _ => ProviderError::ApiError {
                    status_code: status.as_u16(),
                    message: error_text,
                },
            });
        }

        let chat_response = response.json::<AzureChatResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse Azure OpenAI response: {}", e)))?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "Token usage: {} total ({} prompt, {} completion)",
                usage.total_tokens, usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }

    /// Extract text from the first choice of a response
    pub fn extract_text(response: &AzureChatResponse) -> Result<String, ProviderError> {
        response.choices.first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| ProviderError::ParseError("Response contained no message content".to_string()))
    }
}

#[async_trait]
impl ChatProvider for AzureOpenAI {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        let request = AzureChatRequest::new(messages.to_vec());
        let response = self.send(&request).await?;
        Self::extract_text(&response)
    }
}
