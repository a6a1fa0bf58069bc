/*!
 * Error types for the tradutor application.
 *
 * This module contains custom error types for the extraction, configuration
 * and translation stages, using the thiserror crate for ergonomic error
 * definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with the chat-completion provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur while fetching and extracting an article
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The server answered with anything other than HTTP 200
    #[error("Failed to fetch {url}: HTTP status {status}")]
    FetchFailure {
        /// Requested URL
        url: String,
        /// HTTP status code returned by the server
        status: u16,
    },

    /// The request never produced a response (DNS, TLS, connection reset, invalid URL...)
    #[error("Request to {url} failed: {message}")]
    RequestFailed {
        /// Requested URL
        url: String,
        /// Underlying transport error
        message: String,
    },

    /// The page was fetched but contained no text once cleaned
    #[error("No text could be extracted from {0}")]
    EmptyDocument(String),
}

impl ExtractionError {
    /// HTTP status of a failed fetch, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::FetchFailure { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised while loading configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// One or more required keys are absent or empty
    #[error("Missing required configuration: {}", .0.join(", "))]
    MissingKeys(Vec<String>),

    /// A configured value cannot be used
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key
        key: String,
        /// Why the value was rejected
        message: String,
    },

    /// The HTTP client could not be built from the configured settings
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

impl ConfigError {
    /// Names of the missing keys, empty for other variants
    pub fn missing_keys(&self) -> &[String] {
        match self {
            Self::MissingKeys(keys) => keys,
            _ => &[],
        }
    }
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// No client was supplied and none could be built from configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration loading
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from the extraction stage
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),
}
