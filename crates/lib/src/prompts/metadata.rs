//! Prompts for zero-touch metadata generation.
//!
//! One call must synthesize an entire catalog record from raw extracted text
//! alone, so the prompt spells out every field and pins each categorical one
//! to its taxonomy list.

use crate::taxonomy::{
    content_type_labels, difficulty_labels, grade_level_labels, join_labels, subject_labels,
    ALLOWED_TAGS,
};

/// How much of the document text is embedded in the metadata prompt.
pub const METADATA_EXCERPT_LIMIT: usize = 2000;

/// The system prompt for the metadata-generation call.
pub const METADATA_SYSTEM_PROMPT: &str = "You are an expert cataloger of educational teaching materials. You generate complete database metadata for uploaded content. Your only output is a single valid JSON object with every requested field filled. Do not add any explanations, introductory text, or markdown formatting.";

/// The user prompt for the metadata-generation call.
/// Placeholders: `{excerpt}`, `{filename}`, `{content_types}`, `{subjects}`,
/// `{difficulties}`, `{grade_levels}`, `{allowed_tags}`.
pub const METADATA_USER_PROMPT: &str = r#"Generate complete database metadata for this educational content.

Content: "{excerpt}"
Filename: "{filename}"

Return ONLY valid JSON with ALL fields filled:
{
    "title": "Descriptive title based on content (not filename)",
    "description": "2-3 sentence summary covering learning objectives and key content",
    "subject": "Must be EXACTLY one of: {subjects}",
    "content_type": "Must be EXACTLY one of: {content_types}",
    "keywords": "Comma-separated search keywords (5-10 relevant terms)",
    "estimated_duration": 30,
    "grade_level": "Must be EXACTLY one of: {grade_levels}",
    "difficulty": "Must be EXACTLY one of: {difficulties}",
    "suggested_tags": ["ONLY use tags from: {allowed_tags}"],
    "learning_objectives": "Brief list of what students will learn or achieve",
    "materials_needed": "Any materials or resources required (if applicable)"
}

Guidelines:
- Title should be clear and descriptive (15-60 characters)
- Description should highlight educational value
- Keywords should include topic terms, skills, and concepts
- Duration in minutes for typical classroom use
- Focus on educational value and practical classroom use
- Make the title engaging and specific to the content
- For suggested_tags: ONLY use tags from the list provided, do NOT create new tags"#;

/// Builds the user prompt for one metadata-generation request.
pub fn build_user_prompt(content: &str, filename: &str) -> String {
    let excerpt = super::truncate_excerpt(content, METADATA_EXCERPT_LIMIT);
    METADATA_USER_PROMPT
        .replace("{excerpt}", &excerpt)
        .replace("{filename}", filename)
        .replace("{content_types}", &join_labels(&content_type_labels()))
        .replace("{subjects}", &join_labels(&subject_labels()))
        .replace("{difficulties}", &join_labels(&difficulty_labels()))
        .replace("{grade_levels}", &join_labels(&grade_level_labels()))
        .replace("{allowed_tags}", &ALLOWED_TAGS.join(", "))
}
