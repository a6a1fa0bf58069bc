/*!
 * Article translation using a chat-completion provider.
 *
 * - `core`: Translation service and the `translate_article` entry point
 * - `prompts`: The fixed system and user instructions
 */

// Re-export main types for easier usage
pub use self::core::{translate_article, translate_article_with_config, TranslationService};

pub mod core;
pub mod prompts;
