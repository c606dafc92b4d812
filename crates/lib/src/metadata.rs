//! # Zero-Touch Metadata Generation
//!
//! Produces a complete catalog record from raw extracted text and a
//! filename, with a three-tier degrade chain:
//!
//! 1. **LLM tier**: one model call generates every field; confidence 0.9.
//! 2. **Fallback tier**: keyword classification plus a filename-derived
//!    title; confidence equals the fallback's overall confidence.
//! 3. **Basic tier**: filename-only heuristics; confidence 0.3.
//!
//! Tiers are attempted strictly top-down, and the chain itself never fails:
//! the basic tier succeeds unconditionally.

use crate::classify::ContentClassifier;
use crate::errors::AnalysisError;
use crate::fallback;
use crate::normalize;
use crate::parse;
use crate::prompts::metadata::{build_user_prompt, METADATA_SYSTEM_PROMPT};
use crate::taxonomy::ContentType;
use crate::types::GeneratedMetadata;
use std::path::Path;
use tracing::{debug, info, warn};

/// Confidence stamped on a complete LLM-generated record.
pub const LLM_TIER_CONFIDENCE: f64 = 0.9;

/// Confidence stamped on a last-resort basic record.
pub const BASIC_TIER_CONFIDENCE: f64 = 0.3;

const MAX_TITLE_CHARS: usize = 60;

/// Generates complete metadata records through the tiered degrade chain.
#[derive(Clone, Debug)]
pub struct MetadataGenerator {
    classifier: ContentClassifier,
}

impl MetadataGenerator {
    pub fn new(classifier: ContentClassifier) -> Self {
        Self { classifier }
    }

    /// Generates a complete metadata record for the given content.
    ///
    /// Never fails: each tier only runs when the one above it failed, and
    /// the basic tier always produces a record.
    pub async fn generate(&self, content: &str, filename: &str) -> GeneratedMetadata {
        match self.generate_with_model(content, filename).await {
            Ok(metadata) => {
                info!("metadata generated by model '{}'", self.classifier.model_name());
                metadata
            }
            Err(err) => {
                warn!("LLM metadata generation failed ({err}); deriving from keyword analysis");
                match self.fallback_metadata(content, filename) {
                    Ok(metadata) => metadata,
                    Err(err) => {
                        warn!("fallback metadata derivation failed ({err}); using basic metadata");
                        basic_metadata(filename)
                    }
                }
            }
        }
    }

    /// Tier 1: one model call for the whole record.
    async fn generate_with_model(
        &self,
        content: &str,
        filename: &str,
    ) -> Result<GeneratedMetadata, AnalysisError> {
        let provider = self.classifier_provider()?;
        let user_prompt = build_user_prompt(content, filename);
        debug!(model = %self.classifier.model_name(), "--> sending metadata prompt");
        let reply = self
            .classifier
            .generate_bounded(provider, METADATA_SYSTEM_PROMPT, &user_prompt)
            .await?;
        debug!("<-- model reply: {reply}");

        let map = parse::extract_json_object(&reply)?;
        let mut metadata = normalize::normalize_metadata(&map);
        metadata.categorization_confidence = LLM_TIER_CONFIDENCE;
        metadata.generation_model = self.classifier.model_name().to_string();
        Ok(metadata)
    }

    /// Tier 2: full record derived from the keyword classifier.
    fn fallback_metadata(
        &self,
        content: &str,
        filename: &str,
    ) -> Result<GeneratedMetadata, AnalysisError> {
        let analysis = fallback::classify("", content, filename);
        let title = humanize_title(filename);
        if title.is_empty() {
            return Err(AnalysisError::InvalidStructure(format!(
                "filename {filename:?} yields no usable title"
            )));
        }

        let kind = analysis.content_type.humanized();
        Ok(GeneratedMetadata {
            title,
            description: format!(
                "Educational content analyzed from {filename}. Content appears to be a {kind}."
            ),
            subject: analysis.subject,
            content_type: analysis.content_type,
            keywords: analysis.suggested_tags.join(", "),
            estimated_duration: normalize::DEFAULT_DURATION_MINUTES,
            grade_level: analysis.grade_level,
            difficulty: analysis.difficulty,
            suggested_tags: analysis.suggested_tags,
            learning_objectives: format!("Students will work with {kind} materials"),
            materials_needed: "Standard classroom supplies".to_string(),
            categorization_confidence: analysis.overall_confidence,
            generation_model: "fallback".to_string(),
        })
    }

    fn classifier_provider(&self) -> Result<&dyn crate::providers::ai::AiProvider, AnalysisError> {
        self.classifier
            .provider_ref()
            .ok_or_else(|| AnalysisError::ModelUnavailable("no AI provider is configured".to_string()))
    }
}

/// Tier 3: a last-resort record from filename heuristics alone. Cannot
/// fail; an unusable filename still yields a titled, taxonomy-conformant
/// record at [`BASIC_TIER_CONFIDENCE`].
pub fn basic_metadata(filename: &str) -> GeneratedMetadata {
    let filename_lower = filename.to_lowercase();
    let content_type = if filename_lower.contains("worksheet") {
        ContentType::Worksheet
    } else if filename_lower.contains("lesson") || filename_lower.contains("plan") {
        ContentType::LessonPlan
    } else if filename_lower.contains("test")
        || filename_lower.contains("quiz")
        || filename_lower.contains("exam")
    {
        ContentType::Assessment
    } else {
        ContentType::Resource
    };

    let title = match humanize_title(filename) {
        t if t.is_empty() => "Untitled Educational Content".to_string(),
        t => t,
    };
    let kind = content_type.humanized();

    GeneratedMetadata {
        title,
        description: format!("Educational {kind} uploaded from {filename}"),
        subject: Default::default(),
        content_type,
        keywords: content_type.as_str().replace('-', ", "),
        estimated_duration: normalize::DEFAULT_DURATION_MINUTES,
        grade_level: Default::default(),
        difficulty: Default::default(),
        suggested_tags: vec![content_type.as_str().to_string()],
        learning_objectives: "To be determined".to_string(),
        materials_needed: "Standard classroom supplies".to_string(),
        categorization_confidence: BASIC_TIER_CONFIDENCE,
        generation_model: "basic".to_string(),
    }
}

/// Derives a presentable title from a filename: the stem with separators
/// spaced out, title-cased, and bounded to 60 characters.
pub fn humanize_title(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let spaced = stem.replace(['_', '-'], " ");
    let titled = spaced
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ");
    titled.chars().take(MAX_TITLE_CHARS).collect()
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
