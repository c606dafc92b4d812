//! # Validation and Normalization
//!
//! Turns the raw, untrusted mapping extracted from a model reply into a
//! fully-populated, taxonomy-conformant record. Validation (strict path)
//! rejects; normalization (total) always succeeds: unknown labels pass
//! through the synonym tables and then fall back to per-field defaults,
//! missing confidences are filled in, tags are intersected with the
//! vocabulary, and durations are coerced.

use crate::errors::AnalysisError;
use crate::taxonomy::{
    is_allowed_tag, ContentType, Difficulty, GradeLevel, Subject, MAX_SUGGESTED_TAGS,
};
use crate::types::{AnalysisMethod, ClassificationResult, GeneratedMetadata};
use serde_json::{Map, Value};

/// Default confidence for a field the model classified without scoring.
pub const DEFAULT_FIELD_CONFIDENCE: f64 = 0.7;

/// Default classroom duration in minutes when the model omits or mangles it.
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

const REQUIRED_FIELDS: [&str; 4] = ["content_type", "subject", "difficulty", "grade_level"];

/// Checks that a classification reply has the four required fields and that
/// each value is an exact member of its enumeration.
///
/// Used by the strict classification path, where a malformed reply is a
/// reported error rather than something to paper over.
pub fn validate_classification(map: &Map<String, Value>) -> Result<(), AnalysisError> {
    for field in REQUIRED_FIELDS {
        if !map.contains_key(field) {
            return Err(AnalysisError::InvalidStructure(format!(
                "missing required field '{field}'"
            )));
        }
    }

    let checks: [(&str, fn(&str) -> bool); 4] = [
        ("content_type", |v| ContentType::parse(v).is_some()),
        ("subject", |v| Subject::parse(v).is_some()),
        ("difficulty", |v| Difficulty::parse(v).is_some()),
        ("grade_level", |v| GradeLevel::parse(v).is_some()),
    ];
    for (field, is_member) in checks {
        let value = map.get(field).and_then(Value::as_str).unwrap_or_default();
        if !is_member(value) {
            return Err(AnalysisError::InvalidStructure(format!(
                "'{value}' is not a valid {field}"
            )));
        }
    }
    Ok(())
}

/// Normalizes a classification mapping into a [`ClassificationResult`].
///
/// Total: any input mapping yields a valid, fully-populated result.
pub fn normalize_classification(
    map: &Map<String, Value>,
    analysis_method: AnalysisMethod,
    model_used: Option<String>,
) -> ClassificationResult {
    let content_type = resolve_field(map, "content_type", ContentType::resolve);
    let subject = resolve_field(map, "subject", Subject::resolve);
    let difficulty = resolve_field(map, "difficulty", Difficulty::resolve);
    let grade_level = resolve_field(map, "grade_level", GradeLevel::resolve);

    let content_type_confidence = confidence(map, "content_type_confidence");
    let subject_confidence = confidence(map, "subject_confidence");
    let difficulty_confidence = confidence(map, "difficulty_confidence");
    let grade_level_confidence = confidence(map, "grade_level_confidence");

    let overall_confidence = match map.get("overall_confidence").and_then(Value::as_f64) {
        Some(value) => value.clamp(0.0, 1.0),
        None => {
            (content_type_confidence
                + subject_confidence
                + difficulty_confidence
                + grade_level_confidence)
                / 4.0
        }
    };

    ClassificationResult {
        content_type,
        content_type_confidence,
        subject,
        subject_confidence,
        difficulty,
        difficulty_confidence,
        grade_level,
        grade_level_confidence,
        suggested_tags: filter_tags(map.get("suggested_tags")),
        overall_confidence,
        analysis_method,
        model_used,
    }
}

/// Normalizes a metadata mapping into a [`GeneratedMetadata`].
///
/// Total: every field gets a default when missing or malformed. The caller
/// stamps `generation_model` and `categorization_confidence` for its tier;
/// they are returned here with placeholder values.
pub fn normalize_metadata(map: &Map<String, Value>) -> GeneratedMetadata {
    GeneratedMetadata {
        title: string_field(map, "title", "Untitled Educational Content"),
        description: string_field(map, "description", "Educational content for classroom use"),
        subject: resolve_field(map, "subject", Subject::resolve),
        content_type: resolve_field(map, "content_type", ContentType::resolve),
        keywords: text_or_joined_list(map.get("keywords"), ""),
        estimated_duration: duration(map.get("estimated_duration")),
        grade_level: resolve_field(map, "grade_level", GradeLevel::resolve),
        difficulty: resolve_field(map, "difficulty", Difficulty::resolve),
        suggested_tags: filter_tags(map.get("suggested_tags")),
        learning_objectives: text_or_joined_list(map.get("learning_objectives"), ""),
        materials_needed: text_or_joined_list(map.get("materials_needed"), ""),
        categorization_confidence: 0.0,
        generation_model: String::new(),
    }
}

/// Intersects a raw tag value with the allowed vocabulary, preserving order
/// and truncating to [`MAX_SUGGESTED_TAGS`]. Non-list input yields an empty
/// list.
pub fn filter_tags(raw: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = raw else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Value::as_str)
        .filter(|tag| is_allowed_tag(tag))
        .take(MAX_SUGGESTED_TAGS)
        .map(str::to_string)
        .collect()
}

fn resolve_field<T: Default>(
    map: &Map<String, Value>,
    field: &str,
    resolve: fn(&str) -> Option<T>,
) -> T {
    map.get(field)
        .and_then(Value::as_str)
        .and_then(resolve)
        .unwrap_or_default()
}

fn confidence(map: &Map<String, Value>, field: &str) -> f64 {
    map.get(field)
        .and_then(Value::as_f64)
        .unwrap_or(DEFAULT_FIELD_CONFIDENCE)
        .clamp(0.0, 1.0)
}

fn string_field(map: &Map<String, Value>, field: &str, default: &str) -> String {
    match map.get(field).and_then(Value::as_str) {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => default.to_string(),
    }
}

/// Accepts either a string or a list of strings (models flip between the
/// two for keyword-ish fields); lists are joined with ", ".
fn text_or_joined_list(raw: Option<&Value>, default: &str) -> String {
    match raw {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        _ => default.to_string(),
    }
}

/// Coerces a duration to a positive whole number of minutes. Accepts
/// integers and numeric strings; anything else defaults.
fn duration(raw: Option<&Value>) -> u32 {
    let minutes = match raw {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(text)) => text.trim().parse::<u64>().ok(),
        _ => None,
    };
    match minutes {
        Some(m) if m > 0 => u32::try_from(m).unwrap_or(DEFAULT_DURATION_MINUTES),
        _ => DEFAULT_DURATION_MINUTES,
    }
}
