//! # Classification Taxonomy
//!
//! The four closed vocabularies used to categorize educational content, plus
//! the fixed set of allowed organizational tags. Every categorical field in a
//! [`crate::types::ClassificationResult`] or [`crate::types::GeneratedMetadata`]
//! is a member of one of these enumerations after normalization.
//!
//! Synonym tables are kept as plain `const` data rather than inline
//! conditionals: they encode lossy domain decisions (e.g. "science" maps to
//! `Other`) and are the natural place to extend the taxonomy later.

use serde::{Deserialize, Serialize};

/// The kind of teaching material a document represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "lesson-plan")]
    LessonPlan,
    #[serde(rename = "worksheet")]
    Worksheet,
    #[serde(rename = "assessment")]
    Assessment,
    #[default]
    #[serde(rename = "resource")]
    Resource,
    #[serde(rename = "activity")]
    Activity,
}

impl ContentType {
    pub const ALL: [ContentType; 5] = [
        ContentType::LessonPlan,
        ContentType::Worksheet,
        ContentType::Assessment,
        ContentType::Resource,
        ContentType::Activity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::LessonPlan => "lesson-plan",
            ContentType::Worksheet => "worksheet",
            ContentType::Assessment => "assessment",
            ContentType::Resource => "resource",
            ContentType::Activity => "activity",
        }
    }

    /// Parses an exact taxonomy label.
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == label)
    }

    /// Resolves a raw, possibly multi-valued model output to a member of the
    /// enumeration. Comma-separated values are split and the first exact
    /// label wins. There is no synonym table for content types; unmapped
    /// input yields `None` and the caller substitutes the default.
    pub fn resolve(raw: &str) -> Option<Self> {
        raw.split(',').map(str::trim).find_map(Self::parse)
    }

    /// The label with hyphens spelled out, for human-readable descriptions.
    pub fn humanized(&self) -> String {
        self.as_str().replace('-', " ")
    }
}

/// The subject area a document belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
    #[serde(rename = "English")]
    English,
    #[serde(rename = "Religious Education")]
    ReligiousEducation,
    #[serde(rename = "Learning Support")]
    LearningSupport,
    #[default]
    #[serde(rename = "Other")]
    Other,
}

impl Subject {
    pub const ALL: [Subject; 4] = [
        Subject::English,
        Subject::ReligiousEducation,
        Subject::LearningSupport,
        Subject::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::English => "English",
            Subject::ReligiousEducation => "Religious Education",
            Subject::LearningSupport => "Learning Support",
            Subject::Other => "Other",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == label)
    }

    /// Resolves a raw subject string: exact labels first, then the synonym
    /// table, per comma-separated token.
    pub fn resolve(raw: &str) -> Option<Self> {
        raw.split(',').map(str::trim).find_map(|token| {
            Self::parse(token).or_else(|| {
                lookup(SUBJECT_SYNONYMS, token).and_then(Self::parse)
            })
        })
    }
}

/// The difficulty of the material relative to its audience.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "beginner")]
    Beginner,
    #[default]
    #[serde(rename = "intermediate")]
    Intermediate,
    #[serde(rename = "advanced")]
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.as_str() == label)
    }

    pub fn resolve(raw: &str) -> Option<Self> {
        raw.split(',').map(str::trim).find_map(Self::parse)
    }
}

/// The age band the material targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeLevel {
    #[serde(rename = "early-years")]
    EarlyYears,
    #[default]
    #[serde(rename = "primary")]
    Primary,
    #[serde(rename = "secondary")]
    Secondary,
    #[serde(rename = "adult-ed")]
    AdultEd,
}

impl GradeLevel {
    pub const ALL: [GradeLevel; 4] = [
        GradeLevel::EarlyYears,
        GradeLevel::Primary,
        GradeLevel::Secondary,
        GradeLevel::AdultEd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GradeLevel::EarlyYears => "early-years",
            GradeLevel::Primary => "primary",
            GradeLevel::Secondary => "secondary",
            GradeLevel::AdultEd => "adult-ed",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|g| g.as_str() == label)
    }

    /// Resolves a raw grade string: exact labels first, then the synonym
    /// table, per comma-separated token.
    pub fn resolve(raw: &str) -> Option<Self> {
        raw.split(',').map(str::trim).find_map(|token| {
            Self::parse(token).or_else(|| {
                lookup(GRADE_SYNONYMS, token).and_then(Self::parse)
            })
        })
    }
}

/// The closed set of allowed organizational tags. `suggested_tags` in any
/// result is an order-preserving subset of this list, capped at
/// [`MAX_SUGGESTED_TAGS`].
pub const ALLOWED_TAGS: [&str; 11] = [
    "worksheet",
    "lesson-plan",
    "assessment",
    "interactive",
    "homework",
    "group-work",
    "individual",
    "beginner",
    "advanced",
    "resource",
    "activity",
];

/// Maximum number of suggested tags on any result.
pub const MAX_SUGGESTED_TAGS: usize = 4;

/// Returns whether `tag` is a member of the tag vocabulary.
pub fn is_allowed_tag(tag: &str) -> bool {
    ALLOWED_TAGS.contains(&tag)
}

/// Subject synonyms, lower-cased input to canonical label. Subjects the
/// taxonomy does not track (science, history, mathematics) deliberately map
/// to `Other`.
const SUBJECT_SYNONYMS: &[(&str, &str)] = &[
    ("religious education", "Religious Education"),
    ("religious-education", "Religious Education"),
    ("learning support", "Learning Support"),
    ("learning-support", "Learning Support"),
    ("english", "English"),
    ("science", "Other"),
    ("history", "Other"),
    ("mathematics", "Other"),
];

/// Grade-level synonyms, lower-cased input to canonical label.
const GRADE_SYNONYMS: &[(&str, &str)] = &[
    ("early years", "early-years"),
    ("kindergarten", "early-years"),
    ("elementary", "primary"),
    ("middle school", "secondary"),
    ("high school", "secondary"),
    ("adult", "adult-ed"),
    ("adult education", "adult-ed"),
];

fn lookup(table: &'static [(&'static str, &'static str)], token: &str) -> Option<&'static str> {
    let lowered = token.to_lowercase();
    table
        .iter()
        .find(|(synonym, _)| *synonym == lowered)
        .map(|(_, label)| *label)
}

/// Joins the labels of a taxonomy dimension for embedding in prompts.
pub fn join_labels(labels: &[&str]) -> String {
    labels.join(", ")
}

/// Label lists, in taxonomy order, for prompt construction and status reports.
pub fn content_type_labels() -> Vec<&'static str> {
    ContentType::ALL.iter().map(|c| c.as_str()).collect()
}

pub fn subject_labels() -> Vec<&'static str> {
    Subject::ALL.iter().map(|s| s.as_str()).collect()
}

pub fn difficulty_labels() -> Vec<&'static str> {
    Difficulty::ALL.iter().map(|d| d.as_str()).collect()
}

pub fn grade_level_labels() -> Vec<&'static str> {
    GradeLevel::ALL.iter().map(|g| g.as_str()).collect()
}
