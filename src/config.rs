//! Configuration for the webqa service.
//!
//! Non-secret settings live in a TOML file; API keys are read from the
//! process environment only and never serialized.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use webqa_search::SearchConfig;

use crate::error::{Result, WebqaError};

/// Environment variable holding the search provider API key.
pub const SEARCH_API_KEY_ENV: &str = "SERPER_API_KEY";

/// Environment variable holding the completion provider API key.
pub const LLM_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "WEBQA_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebqaConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Search provider and page fetch settings.
    pub search: SearchConfig,
    /// Completion provider settings.
    pub llm: LlmConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind (0 = auto-assign).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5001,
        }
    }
}

/// Completion provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider base URL; `/v1/chat/completions` is appended.
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Response length cap in tokens.
    pub max_tokens: u32,
    /// Sampling temperature (0.0–2.0).
    pub temperature: f64,
    /// Timeout for the completion call in seconds.
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_owned(),
            model: "gpt-3.5-turbo".to_owned(),
            max_tokens: 500,
            temperature: 0.7,
            timeout_seconds: 30,
        }
    }
}

impl LlmConfig {
    fn validate(&self) -> Result<()> {
        match url::Url::parse(&self.base_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            _ => {
                return Err(WebqaError::Config(format!(
                    "llm.base_url must be an http(s) URL, got {:?}",
                    self.base_url
                )));
            }
        }
        if self.model.trim().is_empty() {
            return Err(WebqaError::Config("llm.model must not be empty".into()));
        }
        if self.max_tokens == 0 {
            return Err(WebqaError::Config(
                "llm.max_tokens must be greater than 0".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(WebqaError::Config(
                "llm.temperature must be within 0.0..=2.0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(WebqaError::Config(
                "llm.timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

impl WebqaConfig {
    /// Check every section, returning the first problem found.
    ///
    /// # Errors
    ///
    /// Returns [`WebqaError::Config`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        self.search
            .validate()
            .map_err(|e| WebqaError::Config(format!("search: {e}")))?;
        self.llm.validate()
    }

    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| WebqaError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| WebqaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve and load the effective configuration.
    ///
    /// An explicit path (CLI flag, then `WEBQA_CONFIG`) must exist. The
    /// default path is optional; when it is absent, defaults are used.
    /// The result is validated before it is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, any file fails to
    /// parse, or validation fails.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        let config = match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::from_file(&path)?,
            None => {
                let path = Self::default_config_path();
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    tracing::debug!(path = %path.display(), "no config file, using defaults");
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns the default config file path: `~/.config/webqa/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("webqa").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("webqa")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/webqa-config/config.toml")
        }
    }
}

/// Provider API keys, read once at startup.
#[derive(Clone, Default)]
pub struct Secrets {
    /// Search provider key.
    pub search_api_key: Option<String>,
    /// Completion provider key.
    pub llm_api_key: Option<String>,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("search_api_key_set", &self.search_api_key.is_some())
            .field("llm_api_key_set", &self.llm_api_key.is_some())
            .finish()
    }
}

impl Secrets {
    /// Read keys from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read keys through `lookup`; blank values count as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            search_api_key: read(SEARCH_API_KEY_ENV),
            llm_api_key: read(LLM_API_KEY_ENV),
        }
    }

    /// Names of the environment variables that are not set.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.search_api_key.is_none() {
            missing.push(SEARCH_API_KEY_ENV);
        }
        if self.llm_api_key.is_none() {
            missing.push(LLM_API_KEY_ENV);
        }
        missing
    }
}
