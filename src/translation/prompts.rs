/*!
 * Prompt templates for article translation.
 *
 * The conversation is always two messages: a fixed system instruction and a
 * user instruction carrying the target language and the article text.
 */

use crate::providers::ChatMessage;

/// System instruction for the translator persona
pub const ARTICLE_TRANSLATOR: &str =
    "Você é um tradutor de artigos científicos. Mantenha a formatação e responda em markdown.";

/// User instruction; `{target_language}` and `{text}` are substituted verbatim
pub const TRANSLATE_INSTRUCTION: &str = "Traduza o seguinte texto para {target_language}:\n\n{text}";

/// Render the user instruction for a language and text
///
/// The text is inserted last so placeholders appearing inside the article
/// are left untouched.
pub fn render_instruction(target_language: &str, text: &str) -> String {
    let (head, tail) = TRANSLATE_INSTRUCTION
        .split_once("{text}")
        .unwrap_or((TRANSLATE_INSTRUCTION, ""));

    let mut rendered = head.replace("{target_language}", target_language);
    rendered.push_str(text);
    rendered.push_str(tail);
    rendered
}

/// Build the two-message conversation sent to the provider
pub fn build_messages(text: &str, target_language: &str) -> [ChatMessage; 2] {
    [
        ChatMessage::system(ARTICLE_TRANSLATOR),
        ChatMessage::user(render_instruction(target_language, text)),
    ]
}
