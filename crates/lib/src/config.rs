//! # Application Configuration
//!
//! Loads analyzer configuration from an optional `config.yml` and
//! environment variables, in layers: programmatic defaults, then the file
//! (with `${VAR}` substitution), then plain environment variables, then
//! `CLASSMARK_`-prefixed overrides for nested keys (e.g.
//! `CLASSMARK_ANALYSIS__MODEL_NAME`).

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::time::Duration;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Settings for the analysis model call.
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// A map of named, reusable AI provider configurations.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

/// Settings for the classification/metadata model call.
#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisConfig {
    /// The key of the provider to use from the `providers` map.
    #[serde(default = "default_provider_key")]
    pub provider: String,
    /// The model the provider is asked to run.
    #[serde(default = "default_model_name")]
    pub model_name: String,
    /// Bound on one model round trip, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Extra transport attempts after the first failure.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl AnalysisConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            provider: default_provider_key(),
            model_name: default_model_name(),
            request_timeout_secs: default_request_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_provider_key() -> String {
    "local_default".to_string()
}

fn default_model_name() -> String {
    "qwen2.5:7b".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    1
}

/// A reusable configuration for a specific AI provider instance.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// The type of provider ("gemini", "local", or "ollama").
    pub provider: String,
    /// The API URL. Optional for Gemini, where it can be derived.
    pub api_url: Option<String>,
    /// The API key, which can be null for local providers.
    pub api_key: Option<String>,
    /// The model name sent with each request.
    pub model_name: Option<String>,
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}").unwrap();
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_else(|_| "".to_string())
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the analyzer configuration.
///
/// The file is optional: with no `config.yml` present the defaults apply,
/// plus a `local_default` provider pointing at `LOCAL_AI_API_URL` (or the
/// standard Ollama endpoint) so a plain local setup needs no file at all.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    // Pick up a .env file before the environment layers are read.
    dotenvy::dotenv().ok();

    let mut builder = ConfigBuilder::builder()
        .set_default("analysis.provider", default_provider_key())?
        .set_default("analysis.model_name", default_model_name())?
        .set_default("analysis.request_timeout_secs", default_request_timeout_secs())?
        .set_default("analysis.max_retries", default_max_retries())?;

    let config_path = config_path_override.unwrap_or("config.yml");
    if let Some(content) = read_and_substitute(config_path)? {
        info!("Loading configuration from '{config_path}'.");
        builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
    } else if config_path_override.is_some() {
        return Err(ConfigError::NotFound(format!(
            "Config file not found at '{config_path}'."
        )));
    }

    let settings = builder
        // Environment variables for top-level keys.
        .add_source(Environment::default())
        // Prefixed environment variables for nested overrides.
        .add_source(
            Environment::with_prefix("CLASSMARK")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    // A bare local setup gets a default Ollama-style provider entry.
    if !config.providers.contains_key("local_default") {
        let api_url = env::var("LOCAL_AI_API_URL")
            .unwrap_or_else(|_| "http://localhost:11434/v1/chat/completions".to_string());
        config.providers.insert(
            "local_default".to_string(),
            ProviderConfig {
                provider: "local".to_string(),
                api_url: Some(api_url),
                api_key: None,
                model_name: Some(config.analysis.model_name.clone()),
            },
        );
    }

    Ok(config)
}
