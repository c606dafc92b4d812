use thiserror::Error;

/// Errors from the AI provider layer.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("AI provider is not configured: {0}")]
    MissingAiProvider(String),
    #[error("AI provider did not respond within {0} seconds")]
    Timeout(u64),
}

/// Errors from the classification and metadata-generation pipeline.
///
/// In strict mode these surface to the caller; in lenient mode the
/// orchestrator substitutes the next fallback tier and the error is only
/// visible through the result's provenance field.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(
        "Model service is unavailable: {0}. Start the model service (e.g. `ollama serve`) and try again."
    )]
    ModelUnavailable(String),
    #[error("AI provider call failed: {0}")]
    Provider(#[from] ProviderError),
    #[error("Could not extract a JSON object from the model reply; reply started with: {snippet:?}")]
    ParseFailure { snippet: String },
    #[error("Model reply has an invalid structure: {0}")]
    InvalidStructure(String),
    #[error("Failed to spool upload to a temporary file: {0}")]
    TempFile(#[from] std::io::Error),
}
