pub mod gemini;
pub mod local;

use crate::errors::ProviderError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with an AI provider.
///
/// This trait defines a common interface for the single chat-style round
/// trip the classification and metadata pipelines perform, so the concrete
/// backend (Gemini, a local Ollama endpoint, a test mock) is injected at
/// construction time rather than reached through a process-wide singleton.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response from a given system and user prompt.
    ///
    /// The result is the model's raw text reply; callers are responsible
    /// for extracting structured data from it.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, ProviderError>;
}

dyn_clone::clone_trait_object!(AiProvider);
