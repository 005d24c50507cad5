//! LLM player configuration.

use crate::llm_client::{LlmConfig, LlmProvider};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings for a language-model player.
///
/// Every field has a default, so an empty TOML file is a valid config.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct LlmPlayerConfig {
    /// Player name shown in the game.
    #[serde(default = "default_name")]
    name: String,

    /// LLM provider (openai, anthropic or gemini).
    #[serde(default = "default_provider")]
    llm_provider: LlmProvider,

    /// LLM model name. Falls back to the provider's default.
    #[serde(default)]
    #[getter(skip)]
    llm_model: Option<String>,

    /// Maximum tokens for LLM responses.
    #[serde(default = "default_max_tokens")]
    llm_max_tokens: u32,

    /// Requests allowed per move before the player gives up.
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,
}

fn default_name() -> String {
    "LLM".to_string()
}

fn default_provider() -> LlmProvider {
    LlmProvider::Gemini
}

fn default_max_tokens() -> u32 {
    150
}

fn default_max_attempts() -> u32 {
    3
}

impl Default for LlmPlayerConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            llm_provider: default_provider(),
            llm_model: None,
            llm_max_tokens: default_max_tokens(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl LlmPlayerConfig {
    /// Creates a configuration for the given provider with default settings.
    #[instrument]
    pub fn new(name: String, llm_provider: LlmProvider) -> Self {
        Self {
            name,
            llm_provider,
            ..Self::default()
        }
    }

    /// Model to request, resolving the provider default when unset.
    pub fn llm_model(&self) -> &str {
        self.llm_model
            .as_deref()
            .unwrap_or_else(|| self.llm_provider.default_model())
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            name = %config.name,
            provider = %config.llm_provider,
            model = %config.llm_model(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Creates the client configuration, reading the provider's API key
    /// from the environment.
    #[instrument(skip(self), fields(provider = ?self.llm_provider, model = %self.llm_model()))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        debug!("Creating LLM config");

        let var = self.llm_provider.api_key_var();
        let api_key = std::env::var(var)
            .map_err(|_| ConfigError::new(format!("{} environment variable not set", var)))?;

        Ok(LlmConfig::new(
            self.llm_provider,
            api_key,
            self.llm_model().to_string(),
            self.llm_max_tokens,
        ))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
