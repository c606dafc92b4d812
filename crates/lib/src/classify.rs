//! # Content Classifier
//!
//! Builds the taxonomy-constrained prompt, performs the single model round
//! trip, and turns the reply into a [`ClassificationResult`] through the
//! parse, validate, and normalize stages. On any failure along that path,
//! the explicit [`AnalysisMode`] decides between surfacing the error and
//! falling back to the deterministic keyword classifier.

use crate::errors::{AnalysisError, ProviderError};
use crate::fallback;
use crate::normalize;
use crate::parse;
use crate::prompts::classification::{build_user_prompt, CLASSIFICATION_SYSTEM_PROMPT};
use crate::providers::ai::AiProvider;
use crate::types::{AnalysisMethod, ClassificationResult};
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

/// How model-path failures are handled.
///
/// The classification entry point uses `Strict` (a missing model is a
/// reported error); the zero-touch pipeline is lenient. The mode is an
/// explicit parameter so the policy is visible at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    /// Model failures are fatal and surface to the caller.
    Strict,
    /// Model failures silently degrade to the keyword fallback; the
    /// result's `analysis_method` records which path produced it.
    Lenient,
}

/// Default bound on one model round trip.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Default number of extra transport attempts after the first failure.
pub const DEFAULT_MAX_RETRIES: u32 = 1;

const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Classifies educational content with one bounded model call per request.
///
/// The provider handle is injected at construction time; tests substitute a
/// mock. The classifier holds no per-request state, so one instance can
/// serve concurrent requests.
#[derive(Clone, Debug)]
pub struct ContentClassifier {
    provider: Option<Box<dyn AiProvider>>,
    model_name: String,
    request_timeout: Duration,
    max_retries: u32,
}

impl ContentClassifier {
    /// Creates a classifier backed by the given provider.
    pub fn new(provider: Box<dyn AiProvider>, model_name: impl Into<String>) -> Self {
        Self {
            provider: Some(provider),
            model_name: model_name.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Creates a classifier with no connected model. Strict analysis fails
    /// with [`AnalysisError::ModelUnavailable`]; lenient analysis goes
    /// straight to the keyword fallback.
    pub fn without_provider(model_name: impl Into<String>) -> Self {
        Self {
            provider: None,
            model_name: model_name.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Overrides the per-round-trip timeout.
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Overrides the transport retry budget. Zero disables retries.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub(crate) fn provider_ref(&self) -> Option<&dyn AiProvider> {
        self.provider.as_deref()
    }

    /// Classifies one piece of content.
    ///
    /// Issues at most one successful model round trip. In lenient mode any
    /// model, parse, or validation failure degrades to the deterministic
    /// fallback over the same inputs.
    pub async fn analyze(
        &self,
        title: &str,
        content: &str,
        filename: &str,
        mode: AnalysisMode,
    ) -> Result<ClassificationResult, AnalysisError> {
        match self.analyze_with_model(title, content, filename).await {
            Ok(result) => Ok(result),
            Err(err) => match mode {
                AnalysisMode::Strict => Err(err),
                AnalysisMode::Lenient => {
                    warn!("model analysis failed ({err}); using keyword fallback");
                    Ok(fallback::classify(title, content, filename))
                }
            },
        }
    }

    async fn analyze_with_model(
        &self,
        title: &str,
        content: &str,
        filename: &str,
    ) -> Result<ClassificationResult, AnalysisError> {
        let provider = self.provider.as_deref().ok_or_else(|| {
            AnalysisError::ModelUnavailable("no AI provider is configured".to_string())
        })?;

        let user_prompt = build_user_prompt(title, filename, content);
        debug!(model = %self.model_name, "--> sending classification prompt");
        let reply = self
            .generate_bounded(provider, CLASSIFICATION_SYSTEM_PROMPT, &user_prompt)
            .await?;
        debug!("<-- model reply: {reply}");

        let map = parse::extract_json_object(&reply)?;
        normalize::validate_classification(&map)?;
        Ok(normalize::normalize_classification(
            &map,
            AnalysisMethod::Llm,
            Some(self.model_name.clone()),
        ))
    }

    /// One logical model call, bounded by the configured timeout and a small
    /// retry budget with linear backoff. Only transport failures are
    /// retried; a reply that arrives is final, however malformed.
    pub(crate) async fn generate_bounded(
        &self,
        provider: &dyn AiProvider,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, AnalysisError> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let outcome = timeout(
                self.request_timeout,
                provider.generate(system_prompt, user_prompt),
            )
            .await;

            let err: ProviderError = match outcome {
                Ok(Ok(reply)) => return Ok(reply),
                Ok(Err(err)) => err,
                Err(_) => ProviderError::Timeout(self.request_timeout.as_secs()),
            };

            if attempt > self.max_retries {
                return Err(err.into());
            }
            warn!("model call attempt {attempt} failed ({err}); retrying");
            sleep(RETRY_BACKOFF * attempt).await;
        }
    }
}
