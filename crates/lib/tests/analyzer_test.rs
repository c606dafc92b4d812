//! # Orchestrator Tests
//!
//! End-to-end runs through the analyzer entry points with scripted
//! providers: upload classification (strict and lenient), the zero-touch
//! pipeline, and the status report.

use classmark::analyzer::ContentAnalyzer;
use classmark::classify::{AnalysisMode, ContentClassifier};
use classmark::config::get_config;
use classmark::errors::AnalysisError;
use classmark::taxonomy::ContentType;
use classmark::types::{AnalysisMethod, Provenance};
use classmark_test_utils::MockAiProvider;

const CLASSIFY_KEY: &str = "categorize content for a teaching database";
const METADATA_KEY: &str = "generate complete database metadata";

fn analyzer_with(mock: &MockAiProvider) -> ContentAnalyzer {
    ContentAnalyzer::new(
        ContentClassifier::new(Box::new(mock.clone()), "test-model").with_max_retries(0),
    )
}

/// An upload is spooled, extracted, and classified; the extraction stats
/// reflect the file content.
#[tokio::test]
async fn test_analyze_upload_with_extraction() {
    let mock = MockAiProvider::new();
    mock.add_response(
        CLASSIFY_KEY,
        r#"{"content_type":"worksheet","subject":"English","difficulty":"beginner","grade_level":"primary"}"#,
    );
    let analyzer = analyzer_with(&mock);

    let body = b"Spelling practice: write each word three times.";
    let result = analyzer
        .analyze_upload(body, "spelling.txt", "Spelling Practice", "weekly spellings", AnalysisMode::Strict)
        .await
        .expect("analysis succeeds");

    assert_eq!(result.analysis.content_type, ContentType::Worksheet);
    assert_eq!(result.analysis.analysis_method, AnalysisMethod::Llm);
    assert!(result.content_extracted);
    assert_eq!(result.extracted_content_length, body.len());
    assert_eq!(result.filename, "spelling.txt");

    // The extracted text reached the prompt alongside title and description.
    let calls = mock.get_calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].1.contains("write each word three times"));
    assert!(calls[0].1.contains("weekly spellings"));
}

/// Strict upload analysis surfaces a missing model instead of falling back.
#[tokio::test]
async fn test_analyze_upload_strict_without_model() {
    let analyzer = ContentAnalyzer::new(ContentClassifier::without_provider("test-model"));
    let err = analyzer
        .analyze_upload(b"content", "notes.txt", "Notes", "", AnalysisMode::Strict)
        .await
        .expect_err("strict mode must report the missing model");
    assert!(matches!(err, AnalysisError::ModelUnavailable(_)));
}

/// Lenient upload analysis degrades to the fallback classifier.
#[tokio::test]
async fn test_analyze_upload_lenient_without_model() {
    let analyzer = ContentAnalyzer::new(ContentClassifier::without_provider("test-model"));
    let result = analyzer
        .analyze_upload(
            b"basic worksheet practice problems",
            "fractions.txt",
            "Fractions Practice",
            "",
            AnalysisMode::Lenient,
        )
        .await
        .expect("lenient mode never fails past spooling");
    assert_eq!(result.analysis.analysis_method, AnalysisMethod::Fallback);
    assert_eq!(result.analysis.content_type, ContentType::Worksheet);
}

/// Zero-touch processing returns a complete record and the search excerpt.
#[tokio::test]
async fn test_auto_process_llm_tier() {
    let mock = MockAiProvider::new();
    mock.add_response(
        METADATA_KEY,
        r#"{"title":"Prayer Reflection Lesson","description":"A guided reflection.","subject":"Religious Education","content_type":"lesson-plan","keywords":"prayer, reflection","estimated_duration":40,"grade_level":"primary","difficulty":"intermediate","suggested_tags":["lesson-plan"],"learning_objectives":"Reflect on daily prayer.","materials_needed":"None"}"#,
    );
    let analyzer = analyzer_with(&mock);

    let body = b"A guided prayer reflection for primary classes.";
    let result = analyzer
        .auto_process(body, "prayer_reflection.txt")
        .await
        .expect("auto-processing succeeds");

    assert_eq!(result.metadata.title, "Prayer Reflection Lesson");
    assert_eq!(result.metadata.provenance(), Provenance::Llm);
    assert_eq!(result.metadata.estimated_duration, 40);
    assert!(result.content_extracted);
    assert_eq!(result.content_length, body.len());
    assert!(result.content_excerpt.contains("guided prayer reflection"));
}

/// With no model connected, zero-touch still succeeds through the fallback
/// tier and says so in its provenance.
#[tokio::test]
async fn test_auto_process_degrades_without_model() {
    let analyzer = ContentAnalyzer::new(ContentClassifier::without_provider("test-model"));
    let result = analyzer
        .auto_process(b"worksheet on reading comprehension", "comprehension_worksheet.txt")
        .await
        .expect("zero-touch never fails past spooling");
    assert_eq!(result.metadata.provenance(), Provenance::Fallback);
    assert_eq!(result.metadata.content_type, ContentType::Worksheet);
    assert_eq!(result.metadata.title, "Comprehension Worksheet");
}

/// An unreadable upload is analyzed from its filename placeholder.
#[tokio::test]
async fn test_auto_process_with_empty_content() {
    let analyzer = ContentAnalyzer::new(ContentClassifier::without_provider("test-model"));
    let result = analyzer
        .auto_process(b"", "empty_quiz.txt")
        .await
        .expect("zero-touch never fails past spooling");
    assert!(!result.content_extracted);
    // The filename placeholder still drives classification.
    assert_eq!(result.metadata.content_type, ContentType::Assessment);
}

/// The status report reflects provider connectivity and the vocabularies.
#[test]
fn test_status_report() {
    let analyzer = ContentAnalyzer::new(ContentClassifier::without_provider("test-model"));
    let status = analyzer.status();
    assert!(!status.llm_connected);
    assert_eq!(status.model, "test-model");
    assert_eq!(status.content_types.len(), 5);
    assert_eq!(status.subjects.len(), 4);
    assert_eq!(status.difficulty_levels.len(), 3);
    assert_eq!(status.grade_levels.len(), 4);
}

/// An analyzer built from the default configuration comes up with a model
/// handle configured.
#[test]
fn test_analyzer_from_default_config() {
    let config = get_config(None).expect("defaults load");
    let analyzer = ContentAnalyzer::from_config(&config);
    let status = analyzer.status();
    assert!(status.llm_connected);
    assert_eq!(status.model, "qwen2.5:7b");
}
