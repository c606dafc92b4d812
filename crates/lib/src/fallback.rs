//! # Keyword Fallback Classifier
//!
//! A deterministic, offline classifier used whenever the model path is
//! unavailable or exhausted. Each taxonomy dimension has an ordered rule
//! table; rules are evaluated top to bottom over the lower-cased
//! concatenation of title, content, and filename, and the first rule whose
//! keyword set matches wins. Identical input always yields identical output.

use crate::taxonomy::{
    is_allowed_tag, ContentType, Difficulty, GradeLevel, Subject, MAX_SUGGESTED_TAGS,
};
use crate::types::{AnalysisMethod, ClassificationResult};

/// One keyword rule: if any keyword occurs in the text, the rule's label
/// applies with the given confidence.
struct KeywordRule {
    keywords: &'static [&'static str],
    label: &'static str,
    confidence: f64,
}

const CONTENT_TYPE_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["lesson", "plan", "teaching", "instruction", "objective", "learning goal"],
        label: "lesson-plan",
        confidence: 0.8,
    },
    KeywordRule {
        keywords: &["worksheet", "exercise", "practice", "activity", "handout", "task"],
        label: "worksheet",
        confidence: 0.8,
    },
    KeywordRule {
        keywords: &["test", "quiz", "exam", "assessment", "evaluation", "rubric"],
        label: "assessment",
        confidence: 0.8,
    },
    KeywordRule {
        keywords: &["activity", "game", "project", "experiment", "investigation"],
        label: "activity",
        confidence: 0.7,
    },
];

// Subject rows for subjects outside the taxonomy (mathematics, science)
// keep their original labels and fold to `Other` through the synonym table,
// so the closed-enumeration invariant holds for fallback results too.
const SUBJECT_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["english", "reading", "writing", "literature", "grammar", "spelling", "phonics"],
        label: "English",
        confidence: 0.8,
    },
    KeywordRule {
        keywords: &["math", "mathematics", "number", "calculation", "geometry", "algebra", "arithmetic"],
        label: "Mathematics",
        confidence: 0.8,
    },
    KeywordRule {
        keywords: &["science", "biology", "chemistry", "physics", "experiment", "scientific"],
        label: "Science",
        confidence: 0.8,
    },
    KeywordRule {
        keywords: &["religion", "religious", "faith", "prayer", "christian", "catholic", "bible"],
        label: "Religious Education",
        confidence: 0.8,
    },
    KeywordRule {
        keywords: &["support", "special", "needs", "inclusion", "accessibility", "sen"],
        label: "Learning Support",
        confidence: 0.8,
    },
];

const DIFFICULTY_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["basic", "simple", "easy", "introduction", "beginner", "foundation"],
        label: "beginner",
        confidence: 0.7,
    },
    KeywordRule {
        keywords: &["advanced", "complex", "difficult", "challenging", "expert", "higher order"],
        label: "advanced",
        confidence: 0.7,
    },
];

const GRADE_LEVEL_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["nursery", "reception", "early", "preschool", "kindergarten", "eyfs"],
        label: "early-years",
        confidence: 0.8,
    },
    KeywordRule {
        keywords: &[
            "secondary", "high school", "gcse", "a-level", "year 7", "year 8", "year 9",
            "year 10", "year 11",
        ],
        label: "secondary",
        confidence: 0.8,
    },
    KeywordRule {
        keywords: &["adult", "mature", "university", "college", "professional", "continuing education"],
        label: "adult-ed",
        confidence: 0.7,
    },
];

// Per-dimension defaults when no rule matches.
const DEFAULT_CONTENT_TYPE_CONFIDENCE: f64 = 0.5;
const DEFAULT_SUBJECT_CONFIDENCE: f64 = 0.5;
const DEFAULT_DIFFICULTY_CONFIDENCE: f64 = 0.6;
const DEFAULT_GRADE_LEVEL_CONFIDENCE: f64 = 0.6;

/// Tag triggers: keyword set to vocabulary tag. The detected content type is
/// always the leading tag; these add work-style tags behind it.
const TAG_TRIGGERS: &[(&str, &[&str])] = &[
    ("homework", &["homework", "home learning"]),
    ("interactive", &["interactive", "game", "games"]),
    ("group-work", &["group work", "group-work", "pair work", "teamwork"]),
    ("individual", &["individual", "independent work"]),
    ("beginner", &["beginner", "basic", "introduction"]),
    ("advanced", &["advanced", "challenging"]),
];

/// Classifies content by keyword rules alone.
///
/// Pure and deterministic; never fails. `overall_confidence` is the mean of
/// the four per-dimension confidences.
pub fn classify(title: &str, content: &str, filename: &str) -> ClassificationResult {
    let text = format!("{title} {content} {filename}").to_lowercase();

    let (content_type_label, content_type_confidence) =
        apply_rules(&text, CONTENT_TYPE_RULES, "resource", DEFAULT_CONTENT_TYPE_CONFIDENCE);
    let (subject_label, subject_confidence) =
        apply_rules(&text, SUBJECT_RULES, "Other", DEFAULT_SUBJECT_CONFIDENCE);
    let (difficulty_label, difficulty_confidence) =
        apply_rules(&text, DIFFICULTY_RULES, "intermediate", DEFAULT_DIFFICULTY_CONFIDENCE);
    let (grade_level_label, grade_level_confidence) =
        apply_rules(&text, GRADE_LEVEL_RULES, "primary", DEFAULT_GRADE_LEVEL_CONFIDENCE);

    let content_type = ContentType::resolve(content_type_label).unwrap_or_default();
    let subject = Subject::resolve(subject_label).unwrap_or_default();
    let difficulty = Difficulty::resolve(difficulty_label).unwrap_or_default();
    let grade_level = GradeLevel::resolve(grade_level_label).unwrap_or_default();

    let overall_confidence = (content_type_confidence
        + subject_confidence
        + difficulty_confidence
        + grade_level_confidence)
        / 4.0;

    ClassificationResult {
        content_type,
        content_type_confidence,
        subject,
        subject_confidence,
        difficulty,
        difficulty_confidence,
        grade_level,
        grade_level_confidence,
        suggested_tags: suggest_tags(&text, content_type),
        overall_confidence,
        analysis_method: AnalysisMethod::Fallback,
        model_used: None,
    }
}

fn apply_rules(
    text: &str,
    rules: &[KeywordRule],
    default_label: &'static str,
    default_confidence: f64,
) -> (&'static str, f64) {
    for rule in rules {
        if rule.keywords.iter().any(|keyword| text.contains(keyword)) {
            return (rule.label, rule.confidence);
        }
    }
    (default_label, default_confidence)
}

fn suggest_tags(text: &str, content_type: ContentType) -> Vec<String> {
    let mut tags = vec![content_type.as_str().to_string()];
    for (tag, keywords) in TAG_TRIGGERS {
        if keywords.iter().any(|keyword| text.contains(keyword)) {
            tags.push((*tag).to_string());
        }
    }
    tags.retain(|tag| is_allowed_tag(tag));
    tags.truncate(MAX_SUGGESTED_TAGS);
    tags
}
