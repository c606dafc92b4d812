//! # Reply Parsing Tests
//!
//! Exercises the JSON-extraction strategy chain against the reply shapes
//! models actually produce: a bare object, an object buried in prose, a
//! fenced code block, and a single JSON line, plus the exhaustion path.

use classmark::errors::AnalysisError;
use classmark::parse::extract_json_object;

/// A reply that is exactly the requested object parses directly.
#[test]
fn test_direct_object() {
    let map = extract_json_object(r#"{"content_type": "worksheet", "subject": "English"}"#)
        .expect("direct parse should succeed");
    assert_eq!(map["content_type"], "worksheet");
    assert_eq!(map["subject"], "English");
}

/// An object embedded in surrounding prose is found by the brace-balanced
/// scan, including nested objects.
#[test]
fn test_object_embedded_in_prose() {
    let reply = r#"Sure! Based on the content, here is my analysis: {"content_type": "assessment", "scores": {"subject": 0.8}} Let me know if you need anything else."#;
    let map = extract_json_object(reply).expect("balanced-brace extraction should succeed");
    assert_eq!(map["content_type"], "assessment");
    assert_eq!(map["scores"]["subject"], 0.8);
}

/// Braces inside JSON string values do not confuse the balanced scan.
#[test]
fn test_braces_inside_string_values() {
    let reply = r#"Result: {"description": "uses {curly} markers", "subject": "Other"} done."#;
    let map = extract_json_object(reply).expect("string braces should be skipped");
    assert_eq!(map["description"], "uses {curly} markers");
}

/// A fenced code block with a language tag parses via the fence strategy.
#[test]
fn test_fenced_block_with_language_tag() {
    let reply = "Here is the result:\n```json\n{\"content_type\": \"lesson-plan\"}\n```";
    let map = extract_json_object(reply).expect("fenced extraction should succeed");
    assert_eq!(map["content_type"], "lesson-plan");
}

/// A fenced code block without a language tag also parses.
#[test]
fn test_fenced_block_without_language_tag() {
    let reply = "```\n{\"difficulty\": \"advanced\"}\n```";
    let map = extract_json_object(reply).expect("untagged fence should parse");
    assert_eq!(map["difficulty"], "advanced");
}

/// When the first `{...}` span is not valid JSON, a well-formed single line
/// is still recovered by the line scan.
#[test]
fn test_line_scan_recovers_after_invalid_span() {
    let reply = "notes {not json at all} ignored\n{\"grade_level\": \"primary\"}\nthanks";
    let map = extract_json_object(reply).expect("line scan should succeed");
    assert_eq!(map["grade_level"], "primary");
}

/// Earlier strategies win: a valid brace span beats a later fenced block.
#[test]
fn test_strategy_order_prefers_balanced_braces() {
    let reply = "first {\"winner\": 1} then\n```json\n{\"winner\": 2}\n```";
    let map = extract_json_object(reply).expect("extraction should succeed");
    assert_eq!(map["winner"], 1);
}

/// An invalid brace span does not stop the chain from trying the fence.
#[test]
fn test_fence_wins_when_brace_span_is_invalid() {
    let reply = "oops {broken span} text\n```json\n{\"winner\": 2}\n```";
    let map = extract_json_object(reply).expect("fence should be reached");
    assert_eq!(map["winner"], 2);
}

/// A reply with no JSON-like substring exhausts the chain.
#[test]
fn test_no_json_yields_parse_failure() {
    let err = extract_json_object("I am unable to classify this content.")
        .expect_err("should exhaust all strategies");
    match err {
        AnalysisError::ParseFailure { snippet } => {
            assert!(snippet.starts_with("I am unable"));
        }
        other => panic!("expected ParseFailure, got {other:?}"),
    }
}

/// Top-level JSON that is not an object (an array) is not accepted.
#[test]
fn test_array_is_not_an_object() {
    let err = extract_json_object("[1, 2, 3]").expect_err("arrays must not count");
    assert!(matches!(err, AnalysisError::ParseFailure { .. }));
}

/// The diagnostic snippet is truncated so errors never carry the payload.
#[test]
fn test_failure_snippet_is_bounded() {
    let long_reply = "x".repeat(5000);
    let err = extract_json_object(&long_reply).expect_err("should fail");
    match err {
        AnalysisError::ParseFailure { snippet } => {
            assert_eq!(snippet.chars().count(), 200);
        }
        other => panic!("expected ParseFailure, got {other:?}"),
    }
}
