//! Output records produced by the classification and metadata pipelines.
//!
//! Both records are created fresh per request and are immutable once
//! returned; persistence is the caller's concern.

use crate::taxonomy::{ContentType, Difficulty, GradeLevel, Subject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which pipeline produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisMethod {
    #[serde(rename = "llm")]
    Llm,
    #[serde(rename = "fallback")]
    Fallback,
}

impl AnalysisMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMethod::Llm => "llm",
            AnalysisMethod::Fallback => "fallback",
        }
    }
}

/// Which tier of the zero-touch chain produced a metadata record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    #[serde(rename = "llm")]
    Llm,
    #[serde(rename = "fallback")]
    Fallback,
    #[serde(rename = "basic")]
    Basic,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Llm => "llm",
            Provenance::Fallback => "fallback",
            Provenance::Basic => "basic",
        }
    }
}

/// A structured classification of one piece of educational content.
///
/// Invariant: every categorical field is a member of its taxonomy
/// enumeration, every confidence lies in `[0.0, 1.0]`, and `suggested_tags`
/// is a subset of the tag vocabulary with at most four entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub content_type: ContentType,
    pub content_type_confidence: f64,
    pub subject: Subject,
    pub subject_confidence: f64,
    pub difficulty: Difficulty,
    pub difficulty_confidence: f64,
    pub grade_level: GradeLevel,
    pub grade_level_confidence: f64,
    pub suggested_tags: Vec<String>,
    pub overall_confidence: f64,
    pub analysis_method: AnalysisMethod,
    /// The model that produced an LLM-tier result; absent for fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
}

/// A complete metadata record for zero-touch cataloging.
///
/// `generation_model` carries the provenance: the model name for LLM-tier
/// results, `"fallback"` or `"basic"` for the deterministic tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedMetadata {
    pub title: String,
    pub description: String,
    pub subject: Subject,
    pub content_type: ContentType,
    /// Comma-separated search keywords.
    pub keywords: String,
    /// Typical classroom duration in minutes; always positive.
    pub estimated_duration: u32,
    pub grade_level: GradeLevel,
    pub difficulty: Difficulty,
    pub suggested_tags: Vec<String>,
    pub learning_objectives: String,
    pub materials_needed: String,
    pub categorization_confidence: f64,
    pub generation_model: String,
}

impl GeneratedMetadata {
    /// Which tier of the zero-touch chain produced this record.
    pub fn provenance(&self) -> Provenance {
        match self.generation_model.as_str() {
            "fallback" => Provenance::Fallback,
            "basic" => Provenance::Basic,
            _ => Provenance::Llm,
        }
    }
}

/// The result of analyzing a titled upload, with extraction statistics.
#[derive(Debug, Clone, Serialize)]
pub struct UploadAnalysis {
    pub analysis: ClassificationResult,
    pub filename: String,
    pub content_extracted: bool,
    pub extracted_content_length: usize,
    pub analysis_timestamp: DateTime<Utc>,
}

/// The result of the zero-touch pipeline: the generated record plus the
/// leading slice of extracted text the persistence layer indexes for search.
#[derive(Debug, Clone, Serialize)]
pub struct AutoProcessed {
    pub metadata: GeneratedMetadata,
    pub content_excerpt: String,
    pub content_extracted: bool,
    pub content_length: usize,
}

/// Which document formats the extractor was built with.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SupportedFormats {
    pub text: bool,
    pub pdf: bool,
    pub word: bool,
    pub slides: bool,
}

/// A connectivity and capability report for the status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzerStatus {
    pub llm_connected: bool,
    pub model: String,
    pub supported_formats: SupportedFormats,
    pub content_types: Vec<&'static str>,
    pub subjects: Vec<&'static str>,
    pub difficulty_levels: Vec<&'static str>,
    pub grade_levels: Vec<&'static str>,
}
