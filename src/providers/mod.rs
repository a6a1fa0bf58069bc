/*!
 * Provider implementations for the chat-completion service.
 *
 * This module contains:
 * - `azure_openai`: Azure OpenAI chat-completions client
 * - `mock`: In-memory stand-in used by tests
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Role-tagged chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,

    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// System instruction message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// User message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Common trait for chat-completion providers
///
/// A provider turns an ordered list of messages into the model's text reply.
/// Implementations perform a single attempt per call.
#[async_trait]
pub trait ChatProvider: Send + Sync + Debug {
    /// Complete a conversation
    ///
    /// # Arguments
    /// * `messages` - The messages to send, in order
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The reply text or an error
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError>;
}

pub mod azure_openai;
pub mod mock;
