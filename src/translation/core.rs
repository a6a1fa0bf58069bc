/*!
 * Core translation service implementation.
 *
 * This module contains the TranslationService struct, which sends an
 * extracted article to a chat-completion provider and returns the reply.
 */

use log::{debug, info};
use std::sync::Arc;
use std::time::Instant;

use crate::app_config::{AzureOpenAIConfig, Config};
use crate::errors::TranslationError;
use crate::providers::azure_openai::AzureOpenAI;
use crate::providers::ChatProvider;
use super::prompts;

/// Translation service backed by a chat-completion provider
#[derive(Debug, Clone)]
pub struct TranslationService {
    /// Provider the conversation is sent to
    provider: Arc<dyn ChatProvider>,
}

impl TranslationService {
    /// Create a service around an existing provider
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self { provider }
    }

    /// Create a service backed by Azure OpenAI
    pub fn from_config(config: &AzureOpenAIConfig) -> Result<Self, TranslationError> {
        let client = AzureOpenAI::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Translate `text` into `target_language`
    ///
    /// One request is sent. The reply is returned exactly as the provider
    /// produced it; provider failures are not retried.
    pub async fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslationError> {
        let messages = prompts::build_messages(text, target_language);

        info!("Translating {} characters to {}", text.chars().count(), target_language);
        let start = Instant::now();

        let reply = self.provider.complete(&messages).await?;

        debug!("Translation received in {:.1}s", start.elapsed().as_secs_f64());
        Ok(reply)
    }
}

/// Translate an article, optionally through a caller-supplied provider
///
/// When `client` is `None`, an Azure OpenAI client is built from the process
/// environment; missing required keys surface as a configuration error.
pub async fn translate_article(
    text: &str,
    target_language: &str,
    client: Option<&dyn ChatProvider>,
) -> Result<String, TranslationError> {
    match client {
        Some(provider) => {
            let messages = prompts::build_messages(text, target_language);
            Ok(provider.complete(&messages).await?)
        }
        None => translate_article_with_config(text, target_language, &Config::from_env()).await,
    }
}

/// Translate an article through an Azure OpenAI client built from `config`
///
/// The configuration is validated first, so nothing is sent when a required
/// key is missing.
pub async fn translate_article_with_config(
    text: &str,
    target_language: &str,
    config: &Config,
) -> Result<String, TranslationError> {
    config.validate()?;
    let provider = AzureOpenAI::new(&config.provider)?;

    let messages = prompts::build_messages(text, target_language);
    Ok(provider.complete(&messages).await?)
}
