//! # Model Reply Parsing
//!
//! Models are asked for "ONLY a JSON object" but routinely wrap it in prose,
//! markdown fences, or stray lines. Extraction is an ordered strategy chain:
//! each strategy is a pure function over the raw reply, evaluated in fixed
//! order, and the first one that yields a syntactically valid JSON object
//! wins. Later strategies are never attempted after a success.

use crate::errors::AnalysisError;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

/// How much of a malformed reply is kept for diagnostics. Errors must never
/// carry the full payload.
const SNIPPET_LIMIT: usize = 200;

type Strategy = fn(&str) -> Option<Value>;

/// The extraction strategies, in evaluation order.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("direct", parse_direct),
    ("balanced-braces", parse_balanced_braces),
    ("fenced-block", parse_fenced_block),
    ("line-scan", parse_line_scan),
];

/// Extracts a JSON object from a raw model reply.
///
/// Returns [`AnalysisError::ParseFailure`] with a truncated copy of the
/// reply when every strategy is exhausted.
pub fn extract_json_object(text: &str) -> Result<Map<String, Value>, AnalysisError> {
    for (name, strategy) in STRATEGIES {
        if let Some(Value::Object(map)) = strategy(text) {
            debug!(strategy = name, "extracted JSON object from model reply");
            return Ok(map);
        }
    }
    Err(AnalysisError::ParseFailure {
        snippet: text.chars().take(SNIPPET_LIMIT).collect(),
    })
}

/// Strategy 1: the whole reply is the object.
fn parse_direct(text: &str) -> Option<Value> {
    serde_json::from_str(text.trim()).ok()
}

/// Strategy 2: the outermost `{...}` span, found by depth counting so
/// nested objects are kept intact. Braces inside JSON strings are skipped.
fn parse_balanced_braces(text: &str) -> Option<Value> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    let span = &text[start..start + offset + ch.len_utf8()];
                    return serde_json::from_str(span).ok();
                }
            }
            _ => {}
        }
    }
    None
}

/// Strategy 3: the content of a triple-backtick code fence, with or without
/// a language tag.
fn parse_fenced_block(text: &str) -> Option<Value> {
    let re = Regex::new(r"```(?:[a-zA-Z]+)?\s*([\s\S]*?)```").ok()?;
    let captured = re.captures(text)?.get(1)?.as_str().trim();
    serde_json::from_str(captured).ok()
}

/// Strategy 4: any single line that both starts with `{` and ends with `}`.
fn parse_line_scan(text: &str) -> Option<Value> {
    for line in text.lines() {
        let line = line.trim();
        if line.starts_with('{') && line.ends_with('}') {
            if let Ok(value) = serde_json::from_str::<Value>(line) {
                if value.is_object() {
                    return Some(value);
                }
            }
        }
    }
    None
}
