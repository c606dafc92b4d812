//! # AI Provider Factory
//!
//! Centralizes the logic for turning a named provider configuration into a
//! boxed [`AiProvider`] instance, so every consumer builds providers the
//! same way.

use crate::{
    config::ProviderConfig,
    errors::ProviderError,
    providers::ai::{gemini::GeminiProvider, local::LocalAiProvider, AiProvider},
};
use tracing::info;

/// Creates an AI provider instance from a provider configuration.
///
/// Gemini providers derive their URL from the model name when none is
/// configured; local (OpenAI-compatible, e.g. Ollama) providers require an
/// explicit `api_url`.
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn AiProvider>, ProviderError> {
    match config.provider.as_str() {
        "gemini" => {
            let api_key = config.api_key.clone().ok_or_else(|| {
                ProviderError::MissingAiProvider(
                    "api_key must be set for the gemini provider".to_string(),
                )
            })?;
            let api_url = match &config.api_url {
                Some(url) => url.clone(),
                None => {
                    let model = config.model_name.as_deref().ok_or_else(|| {
                        ProviderError::MissingAiProvider(
                            "model_name is required to derive the gemini API URL".to_string(),
                        )
                    })?;
                    format!(
                        "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent"
                    )
                }
            };
            info!("Configuring Gemini provider with URL: {api_url}");
            Ok(Box::new(GeminiProvider::new(api_url, api_key)?))
        }
        "local" | "ollama" => {
            let api_url = config.api_url.clone().ok_or_else(|| {
                ProviderError::MissingAiProvider(
                    "api_url is not set for the local provider. Set LOCAL_AI_API_URL in your .env file."
                        .to_string(),
                )
            })?;
            info!("Configuring local AI provider with URL: {api_url}");
            Ok(Box::new(LocalAiProvider::new(
                api_url,
                config.api_key.clone(),
                config.model_name.clone(),
            )?))
        }
        other => Err(ProviderError::MissingAiProvider(format!(
            "unknown provider type '{other}' (expected 'gemini', 'local', or 'ollama')"
        ))),
    }
}
