/*!
 * # tradutor - article translation with Azure OpenAI
 *
 * A Rust library and command-line tool that downloads an article, reduces
 * its HTML to clean plain text and asks a hosted chat model to translate it.
 *
 * ## Features
 *
 * - Fetch a page and strip `script`/`style` content and markup
 * - Normalize the text into one fragment per line, in reading order
 * - Translate through an Azure OpenAI chat deployment, answering in markdown
 * - Print the result or save it to a file
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration loading and validation
 * - `extractor`: Page download and text extraction
 * - `translation`: Prompt construction and the translation service
 * - `providers`: Chat-completion clients behind the `ChatProvider` trait:
 *   - `providers::azure_openai`: Azure OpenAI client
 *   - `providers::mock`: Stand-in provider for tests
 * - `app_controller`: Runs extraction and translation in sequence
 * - `file_utils`: Output file handling
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(non_snake_case)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod extractor;
pub mod file_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunOutcome};
pub use extractor::{extract_text, TextExtractor};
pub use providers::{ChatMessage, ChatProvider};
pub use translation::{translate_article, translate_article_with_config, TranslationService};
pub use errors::{AppError, ConfigError, ExtractionError, ProviderError, TranslationError};
