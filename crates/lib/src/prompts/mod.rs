//! # Prompt Templates
//!
//! Prompt constants and builders for the two model tasks: classification of
//! titled content and zero-touch metadata generation. Templates use
//! `{placeholder}` substitution; the builders embed the taxonomy lists
//! verbatim so the model is constrained to known labels, and truncate the
//! content excerpt to bound token cost.

pub mod classification;
pub mod metadata;

/// Truncates `content` to at most `limit` characters, appending a literal
/// `...` marker when anything was cut.
pub fn truncate_excerpt(content: &str, limit: usize) -> String {
    if content.chars().count() > limit {
        let mut excerpt: String = content.chars().take(limit).collect();
        excerpt.push_str("...");
        excerpt
    } else {
        content.to_string()
    }
}
