//! Prompts for classifying already-titled educational content.

use crate::taxonomy::{
    content_type_labels, difficulty_labels, grade_level_labels, join_labels, subject_labels,
};

/// How much of the document text is embedded in the classification prompt.
pub const CLASSIFICATION_EXCERPT_LIMIT: usize = 1500;

/// The system prompt for the classification call.
pub const CLASSIFICATION_SYSTEM_PROMPT: &str = "You are an expert cataloger of educational teaching materials. You categorize content for a teaching database using only the fixed vocabularies the user provides. Your only output is a single JSON object with the exact fields requested. Do not add any explanations, introductory text, or markdown formatting.";

/// The user prompt for the classification call.
/// Placeholders: `{title}`, `{filename}`, `{excerpt}`, `{content_types}`,
/// `{subjects}`, `{difficulties}`, `{grade_levels}`.
pub const CLASSIFICATION_USER_PROMPT: &str = r#"Analyze the following educational content and categorize it appropriately for a teaching database.

Title: "{title}"
Filename: "{filename}"
Content: "{excerpt}"

Please categorize this educational content using these specific categories:

CONTENT TYPES: {content_types}
- lesson-plan: Full lesson plans with objectives, activities, and outcomes
- worksheet: Practice exercises, handouts, and student activities
- assessment: Tests, quizzes, evaluations, and rubrics
- resource: Reference materials, guides, and supplementary content
- activity: Interactive activities, games, and projects

SUBJECTS: {subjects}
- English: Reading, writing, literature, grammar, spelling
- Religious Education: Faith-based content, prayer, religious studies
- Learning Support: Special needs, inclusion, accessibility materials
- Other: Cross-curricular or unspecified subjects

DIFFICULTY LEVELS: {difficulties}
- beginner: Basic concepts, simple vocabulary, foundational skills
- intermediate: Standard grade-level content, moderate complexity
- advanced: Complex concepts, challenging vocabulary, higher-order thinking

GRADE TARGETS: {grade_levels}
- early-years: Ages 3-5, nursery, reception, kindergarten
- primary: Ages 5-11, elementary school, years 1-6
- secondary: Ages 11-18, high school, years 7-13
- adult-ed: Adult learners, professional development, continuing education

Instructions:
- Choose the MOST appropriate category from each list
- Only use categories from the exact lists provided above
- Assign a confidence score (0.0-1.0) for each classification
- Suggest 2-4 relevant organizational tags
- Consider the educational context and teaching purpose

Respond with ONLY a JSON object in this exact format:
{
    "content_type": "lesson-plan",
    "content_type_confidence": 0.95,
    "subject": "English",
    "subject_confidence": 0.87,
    "difficulty": "intermediate",
    "difficulty_confidence": 0.78,
    "grade_level": "primary",
    "grade_level_confidence": 0.82,
    "suggested_tags": ["worksheet", "homework", "individual"],
    "overall_confidence": 0.85
}

Classification:"#;

/// Builds the user prompt for one classification request, embedding the
/// taxonomy lists and a bounded content excerpt.
pub fn build_user_prompt(title: &str, filename: &str, content: &str) -> String {
    let excerpt = super::truncate_excerpt(content, CLASSIFICATION_EXCERPT_LIMIT);
    CLASSIFICATION_USER_PROMPT
        .replace("{title}", title)
        .replace("{filename}", filename)
        .replace("{excerpt}", &excerpt)
        .replace("{content_types}", &join_labels(&content_type_labels()))
        .replace("{subjects}", &join_labels(&subject_labels()))
        .replace("{difficulties}", &join_labels(&difficulty_labels()))
        .replace("{grade_levels}", &join_labels(&grade_level_labels()))
}
