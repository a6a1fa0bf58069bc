/*!
 * Tests for prompt construction and the translation service
 */

use std::sync::Arc;
use tradutor::errors::{ProviderError, TranslationError};
use tradutor::providers::mock::MockProvider;
use tradutor::translation::prompts::{build_messages, ARTICLE_TRANSLATOR};
use tradutor::{translate_article, ChatProvider, TranslationService};

#[test]
fn test_buildMessages_withFrench_shouldMatchExpectedUserMessage() {
    let messages = build_messages("Hello", "french");

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, "system");
    assert_eq!(
        messages[0].content,
        "Você é um tradutor de artigos científicos. Mantenha a formatação e responda em markdown."
    );
    assert_eq!(messages[1].role, "user");
    assert_eq!(messages[1].content, "Traduza o seguinte texto para french:\n\nHello");
}

#[tokio::test]
async fn test_translate_shouldSendExactlyTheFixedConversation() {
    let mock = MockProvider::working();
    let service = TranslationService::new(Arc::new(mock.clone()));

    service.translate("Linha 1\nLinha 2", "english").await.unwrap();

    let sent = mock.last_messages();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].content, ARTICLE_TRANSLATOR);
    assert_eq!(sent[1].content, "Traduza o seguinte texto para english:\n\nLinha 1\nLinha 2");
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_translate_withLongText_shouldNotChunk() {
    let mock = MockProvider::working();
    let service = TranslationService::new(Arc::new(mock.clone()));
    let text = "paragraph\n".repeat(5_000);

    service.translate(&text, "deutsch").await.unwrap();

    assert_eq!(mock.request_count(), 1);
    assert!(mock.last_messages()[1].content.ends_with(&text));
}

#[tokio::test]
async fn test_translate_withUnauthorizedProvider_shouldSurfaceAuthError() {
    let mock = MockProvider::unauthorized();
    let service = TranslationService::new(Arc::new(mock.clone()));

    let err = service.translate("Hello", "french").await.unwrap_err();

    assert!(matches!(
        err,
        TranslationError::Provider(ProviderError::AuthenticationError(_))
    ));
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_translate_withEmptyReply_shouldReturnEmptyString() {
    let service = TranslationService::new(Arc::new(MockProvider::empty()));

    assert_eq!(service.translate("Hello", "french").await.unwrap(), "");
}

#[tokio::test]
async fn test_translateArticle_withInjectedFailingClient_shouldNotRetry() {
    let mock = MockProvider::failing();

    let result = translate_article("Hello", "french", Some(&mock as &dyn ChatProvider)).await;

    assert!(result.is_err());
    assert_eq!(mock.request_count(), 1);
}
