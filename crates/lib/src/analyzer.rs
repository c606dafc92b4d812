//! # Analysis Orchestrator
//!
//! Sequences the pipeline per request: spool the upload to a scoped
//! temporary file, extract text, then either classify (titled content) or
//! run the zero-touch metadata chain. The temporary file is removed on
//! every exit path, including errors, by the guard's drop.

use crate::classify::{AnalysisMode, ContentClassifier};
use crate::config::AppConfig;
use crate::errors::{AnalysisError, ProviderError};
use crate::extract;
use crate::metadata::MetadataGenerator;
use crate::providers::factory::create_provider;
use crate::taxonomy;
use crate::types::{AnalyzerStatus, AutoProcessed, UploadAnalysis};
use chrono::Utc;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// Leading slice of extracted text handed to the persistence layer for
/// search indexing.
const SEARCH_EXCERPT_CHARS: usize = 5000;

/// The per-request entry points for content analysis.
#[derive(Clone, Debug)]
pub struct ContentAnalyzer {
    classifier: ContentClassifier,
    generator: MetadataGenerator,
}

impl ContentAnalyzer {
    pub fn new(classifier: ContentClassifier) -> Self {
        let generator = MetadataGenerator::new(classifier.clone());
        Self {
            classifier,
            generator,
        }
    }

    /// Builds an analyzer from the application configuration.
    ///
    /// A missing or broken provider configuration is not fatal here: the
    /// analyzer comes up without a model, strict analysis reports it, and
    /// the lenient paths use the deterministic tiers.
    pub fn from_config(config: &AppConfig) -> Self {
        let model_name = config.analysis.model_name.clone();
        let classifier = match Self::provider_from_config(config) {
            Ok(provider) => ContentClassifier::new(provider, model_name),
            Err(err) => {
                warn!("no usable AI provider ({err}); analyzer starts in fallback-only mode");
                ContentClassifier::without_provider(model_name)
            }
        };
        let classifier = classifier
            .with_request_timeout(config.analysis.request_timeout())
            .with_max_retries(config.analysis.max_retries);
        Self::new(classifier)
    }

    fn provider_from_config(
        config: &AppConfig,
    ) -> Result<Box<dyn crate::providers::ai::AiProvider>, ProviderError> {
        let provider_config = config
            .providers
            .get(&config.analysis.provider)
            .ok_or_else(|| {
                ProviderError::MissingAiProvider(format!(
                    "provider '{}' is not defined in the configuration",
                    config.analysis.provider
                ))
            })?;
        create_provider(provider_config)
    }

    /// Classifies an uploaded, already-titled document.
    ///
    /// The upload is written to a temporary file for extraction; the file
    /// is deleted on every exit path. The classified text is the
    /// concatenation of title, description, and extracted content.
    pub async fn analyze_upload(
        &self,
        file_bytes: &[u8],
        filename: &str,
        title: &str,
        description: &str,
        mode: AnalysisMode,
    ) -> Result<UploadAnalysis, AnalysisError> {
        let spooled = spool_to_temp(file_bytes, filename)?;
        let content = extract::extract_text(spooled.path(), None).await;
        let extracted_content_length = content.chars().count();
        info!(
            filename,
            extracted_chars = extracted_content_length,
            "extracted upload content"
        );

        let combined = format!("{title}\n{description}\n{content}").trim().to_string();
        let analysis = self
            .classifier
            .analyze(title, &combined, filename, mode)
            .await?;

        Ok(UploadAnalysis {
            analysis,
            filename: filename.to_string(),
            content_extracted: extracted_content_length > 0,
            extracted_content_length,
            analysis_timestamp: Utc::now(),
        })
    }

    /// Zero-touch processing: extracts text and synthesizes a complete
    /// metadata record through the tiered chain. Never fails past the
    /// temp-file stage; an unextractable file is analyzed from its
    /// filename alone.
    pub async fn auto_process(
        &self,
        file_bytes: &[u8],
        filename: &str,
    ) -> Result<AutoProcessed, AnalysisError> {
        let spooled = spool_to_temp(file_bytes, filename)?;
        let mut content = extract::extract_text(spooled.path(), None).await;
        let content_length = content.chars().count();
        let content_extracted = !content.trim().is_empty();

        if !content_extracted {
            // Nothing readable: give the model the filename as context.
            content = format!("Educational file: {filename}");
        }

        let metadata = self.generator.generate(&content, filename).await;
        info!(
            filename,
            provenance = metadata.provenance().as_str(),
            "auto-processing complete"
        );

        Ok(AutoProcessed {
            metadata,
            content_excerpt: content.chars().take(SEARCH_EXCERPT_CHARS).collect(),
            content_extracted,
            content_length,
        })
    }

    /// Reports provider connectivity, the configured model, and the
    /// vocabularies this analyzer classifies into.
    pub fn status(&self) -> AnalyzerStatus {
        AnalyzerStatus {
            llm_connected: self.classifier.has_provider(),
            model: self.classifier.model_name().to_string(),
            supported_formats: extract::supported_formats(),
            content_types: taxonomy::content_type_labels(),
            subjects: taxonomy::subject_labels(),
            difficulty_levels: taxonomy::difficulty_labels(),
            grade_levels: taxonomy::grade_level_labels(),
        }
    }

    pub fn classifier(&self) -> &ContentClassifier {
        &self.classifier
    }
}

/// Writes upload bytes to a named temporary file carrying the original
/// extension, so extraction dispatch sees the right format. The file is
/// removed when the guard drops.
fn spool_to_temp(file_bytes: &[u8], filename: &str) -> Result<NamedTempFile, AnalysisError> {
    let suffix = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_else(|| ".tmp".to_string());

    let mut temp = tempfile::Builder::new().suffix(&suffix).tempfile()?;
    temp.write_all(file_bytes)?;
    temp.flush()?;
    Ok(temp)
}
