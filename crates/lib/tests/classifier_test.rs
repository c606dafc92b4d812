//! # Classifier Tests
//!
//! Drives the full classify pipeline with a scripted provider: prompt
//! construction, the bounded round trip, reply parsing, strict validation,
//! and the strict-vs-lenient failure policy.

use classmark::classify::{AnalysisMode, ContentClassifier};
use classmark::errors::AnalysisError;
use classmark::taxonomy::{ContentType, Difficulty, GradeLevel, Subject};
use classmark::types::AnalysisMethod;
use classmark_test_utils::{FlakyAiProvider, MockAiProvider};

const CLASSIFY_KEY: &str = "categorize content for a teaching database";

const FENCED_REPLY: &str = "Here is the result:\n```json\n{\"content_type\":\"assessment\",\"subject\":\"English\",\"difficulty\":\"advanced\",\"grade_level\":\"secondary\"}\n```";

fn classifier_with_reply(reply: &str) -> (ContentClassifier, MockAiProvider) {
    let mock = MockAiProvider::new();
    mock.add_response(CLASSIFY_KEY, reply);
    let classifier = ContentClassifier::new(Box::new(mock.clone()), "test-model");
    (classifier, mock)
}

/// A fenced model reply with no confidence scores: the fence strategy
/// extracts it and the normalizer fills every confidence to 0.7.
#[tokio::test]
async fn test_fenced_reply_with_defaulted_confidences() {
    let (classifier, _mock) = classifier_with_reply(FENCED_REPLY);
    let result = classifier
        .analyze("End of Term Exam", "essay questions", "exam.docx", AnalysisMode::Strict)
        .await
        .expect("analysis should succeed");

    assert_eq!(result.content_type, ContentType::Assessment);
    assert_eq!(result.subject, Subject::English);
    assert_eq!(result.difficulty, Difficulty::Advanced);
    assert_eq!(result.grade_level, GradeLevel::Secondary);
    assert_eq!(result.content_type_confidence, 0.7);
    assert_eq!(result.subject_confidence, 0.7);
    assert_eq!(result.difficulty_confidence, 0.7);
    assert_eq!(result.grade_level_confidence, 0.7);
    assert_eq!(result.overall_confidence, 0.7);
    assert_eq!(result.analysis_method, AnalysisMethod::Llm);
    assert_eq!(result.model_used.as_deref(), Some("test-model"));
}

/// The user prompt embeds the title, filename, excerpt, and all four
/// taxonomy lists.
#[tokio::test]
async fn test_prompt_contents() {
    let (classifier, mock) = classifier_with_reply(FENCED_REPLY);
    classifier
        .analyze("Fractions Practice", "practice problems", "fractions.pdf", AnalysisMode::Strict)
        .await
        .expect("analysis should succeed");

    let calls = mock.get_calls();
    assert_eq!(calls.len(), 1);
    let user_prompt = &calls[0].1;
    assert!(user_prompt.contains("Fractions Practice"));
    assert!(user_prompt.contains("fractions.pdf"));
    assert!(user_prompt.contains("practice problems"));
    assert!(user_prompt.contains("lesson-plan, worksheet, assessment, resource, activity"));
    assert!(user_prompt.contains("English, Religious Education, Learning Support, Other"));
    assert!(user_prompt.contains("beginner, intermediate, advanced"));
    assert!(user_prompt.contains("early-years, primary, secondary, adult-ed"));
}

/// Strict mode with no connected model is a fatal, reported error.
#[tokio::test]
async fn test_strict_without_provider_fails() {
    let classifier = ContentClassifier::without_provider("test-model");
    let err = classifier
        .analyze("t", "c", "f.txt", AnalysisMode::Strict)
        .await
        .expect_err("strict mode must surface the missing model");
    match err {
        AnalysisError::ModelUnavailable(_) => {
            assert!(err.to_string().contains("Start the model service"));
        }
        other => panic!("expected ModelUnavailable, got {other:?}"),
    }
}

/// Lenient mode with no connected model silently degrades to the keyword
/// fallback.
#[tokio::test]
async fn test_lenient_without_provider_falls_back() {
    let classifier = ContentClassifier::without_provider("test-model");
    let result = classifier
        .analyze("Spelling worksheet", "spelling practice", "spelling.pdf", AnalysisMode::Lenient)
        .await
        .expect("lenient mode never fails");
    assert_eq!(result.analysis_method, AnalysisMethod::Fallback);
    assert_eq!(result.content_type, ContentType::Worksheet);
    assert_eq!(result.subject, Subject::English);
}

/// A reply missing a required field fails strict analysis with
/// InvalidStructure.
#[tokio::test]
async fn test_strict_rejects_missing_required_field() {
    let (classifier, _mock) =
        classifier_with_reply(r#"{"content_type":"worksheet","subject":"English","difficulty":"beginner"}"#);
    let err = classifier
        .analyze("t", "c", "f.txt", AnalysisMode::Strict)
        .await
        .expect_err("missing grade_level must be rejected");
    assert!(matches!(err, AnalysisError::InvalidStructure(_)));
}

/// A reply with no JSON at all fails strict analysis with ParseFailure.
#[tokio::test]
async fn test_strict_rejects_unparseable_reply() {
    let (classifier, _mock) = classifier_with_reply("I cannot classify this content, sorry.");
    let err = classifier
        .analyze("t", "c", "f.txt", AnalysisMode::Strict)
        .await
        .expect_err("prose reply must be rejected");
    assert!(matches!(err, AnalysisError::ParseFailure { .. }));
}

/// In lenient mode a malformed reply degrades to the fallback and the
/// provenance field says so.
#[tokio::test]
async fn test_lenient_degrades_on_malformed_reply() {
    let (classifier, mock) = classifier_with_reply("no json here");
    let result = classifier
        .analyze("Prayer lesson", "", "prayer_lesson.docx", AnalysisMode::Lenient)
        .await
        .expect("lenient mode never fails");
    assert_eq!(result.analysis_method, AnalysisMethod::Fallback);
    assert_eq!(result.subject, Subject::ReligiousEducation);
    // The model was consulted exactly once; the reply was not retried.
    assert_eq!(mock.get_calls().len(), 1);
}

/// A transport failure is retried within the configured budget and the
/// round trip then succeeds.
#[tokio::test]
async fn test_transport_failure_is_retried() {
    let flaky = FlakyAiProvider::new(1, FENCED_REPLY);
    let classifier =
        ContentClassifier::new(Box::new(flaky.clone()), "test-model").with_max_retries(1);
    let result = classifier
        .analyze("t", "c", "f.txt", AnalysisMode::Strict)
        .await
        .expect("second attempt should succeed");
    assert_eq!(result.content_type, ContentType::Assessment);
    assert_eq!(flaky.attempts(), 2);
}

/// With a zero retry budget the first transport failure is final.
#[tokio::test]
async fn test_zero_retry_budget() {
    let flaky = FlakyAiProvider::new(1, FENCED_REPLY);
    let classifier =
        ContentClassifier::new(Box::new(flaky.clone()), "test-model").with_max_retries(0);
    let err = classifier
        .analyze("t", "c", "f.txt", AnalysisMode::Strict)
        .await
        .expect_err("no retries allowed");
    assert!(matches!(err, AnalysisError::Provider(_)));
    assert_eq!(flaky.attempts(), 1);
}

/// A successful reply is never re-requested, whatever the retry budget.
#[tokio::test]
async fn test_no_retry_after_successful_round_trip() {
    let (classifier, mock) = classifier_with_reply(FENCED_REPLY);
    let classifier = classifier.with_max_retries(3);
    classifier
        .analyze("t", "c", "f.txt", AnalysisMode::Strict)
        .await
        .expect("analysis should succeed");
    assert_eq!(mock.get_calls().len(), 1);
}
