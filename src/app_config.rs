use serde::{Deserialize, Serialize};
use std::default::Default;
use url::Url;

use crate::errors::ConfigError;

// Application configuration module
// Azure OpenAI connection settings: loaded from the process environment,
// completed with defaults and validated before any request is made.

/// Environment variable holding the Azure OpenAI resource endpoint
pub const ENV_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
/// Environment variable holding the Azure OpenAI API key
pub const ENV_API_KEY: &str = "AZURE_OPENAI_API_KEY";
/// Environment variable overriding the API version
pub const ENV_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";
/// Environment variable overriding the deployment name
pub const ENV_DEPLOYMENT: &str = "AZURE_OPENAI_DEPLOYMENT";

/// Keys that must be present before anything is fetched
pub const REQUIRED_KEYS: [&str; 2] = [ENV_ENDPOINT, ENV_API_KEY];

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Chat-completion provider settings
    #[serde(default)]
    pub provider: AzureOpenAIConfig,

    /// Article fetch settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Azure OpenAI service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AzureOpenAIConfig {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// API key for the service
    #[serde(default = "String::new")]
    pub api_key: String,

    /// REST API version sent as the `api-version` query parameter
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Deployment (model) name
    #[serde(default = "default_deployment")]
    pub deployment: String,

    /// Request timeout in seconds, unset to keep the transport defaults
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for AzureOpenAIConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            api_version: default_api_version(),
            deployment: default_deployment(),
            timeout_secs: None,
        }
    }
}

impl AzureOpenAIConfig {
    /// Parsed endpoint URL
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        Url::parse(self.endpoint.trim()).map_err(|e| ConfigError::InvalidValue {
            key: ENV_ENDPOINT.to_string(),
            message: e.to_string(),
        })
    }
}

/// Settings for the article download
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds, unset to keep the transport defaults
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// User agent sent with the request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

pub fn default_api_version() -> String {
    "2025-01-01-preview".to_string()
}

pub fn default_deployment() -> String {
    "gpt-4o-mini".to_string()
}

fn default_user_agent() -> String {
    format!("tradutor/{}", env!("CARGO_PKG_VERSION"))
}

/// Treat unset and blank values the same way
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Build the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    ///
    /// Optional keys fall back to their defaults when unset or blank.
    /// Required keys are left empty and reported by [`Config::validate`].
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = AzureOpenAIConfig {
            endpoint: non_empty(lookup(ENV_ENDPOINT)).unwrap_or_default(),
            api_key: non_empty(lookup(ENV_API_KEY)).unwrap_or_default(),
            api_version: non_empty(lookup(ENV_API_VERSION)).unwrap_or_else(default_api_version),
            deployment: non_empty(lookup(ENV_DEPLOYMENT)).unwrap_or_else(default_deployment),
            ..AzureOpenAIConfig::default()
        };

        Self {
            provider,
            ..Self::default()
        }
    }

    /// Names of the required keys that are not set, in declaration order
    pub fn missing_keys(&self) -> Vec<String> {
        REQUIRED_KEYS
            .iter()
            .filter(|key| match **key {
                ENV_ENDPOINT => self.provider.endpoint.trim().is_empty(),
                ENV_API_KEY => self.provider.api_key.trim().is_empty(),
                _ => false,
            })
            .map(|key| key.to_string())
            .collect()
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let missing = self.missing_keys();
        if !missing.is_empty() {
            return Err(ConfigError::MissingKeys(missing));
        }

        self.provider.endpoint_url()?;

        Ok(())
    }
}
