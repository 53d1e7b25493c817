//! Course model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Course category shown in the library filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseCategory {
    /// Hospitality
    #[serde(rename = "Hospitality")]
    Hospitality,
    /// Customer Relationships
    #[serde(rename = "Customer Relationships")]
    CustomerRelationships,
    /// Leadership
    #[serde(rename = "Leadership")]
    Leadership,
    /// Health & Safety
    #[serde(rename = "Health & Safety")]
    HealthAndSafety,
    /// Data Protection
    #[serde(rename = "Data Protection")]
    DataProtection,
    /// Work-Life Balance
    #[serde(rename = "Work-Life Balance")]
    WorkLifeBalance,
    /// Digital World
    #[serde(rename = "Digital World")]
    DigitalWorld,
}

impl CourseCategory {
    /// Every category, in library display order
    pub const ALL: [Self; 7] = [
        Self::Hospitality,
        Self::CustomerRelationships,
        Self::Leadership,
        Self::HealthAndSafety,
        Self::DataProtection,
        Self::WorkLifeBalance,
        Self::DigitalWorld,
    ];

    /// Display label (also the stored form)
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hospitality => "Hospitality",
            Self::CustomerRelationships => "Customer Relationships",
            Self::Leadership => "Leadership",
            Self::HealthAndSafety => "Health & Safety",
            Self::DataProtection => "Data Protection",
            Self::WorkLifeBalance => "Work-Life Balance",
            Self::DigitalWorld => "Digital World",
        }
    }

    /// Label folded to lowercase alphanumerics, used for lenient matching
    fn folded(value: &str) -> String {
        value
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect()
    }
}

impl fmt::Display for CourseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CourseCategory {
    type Err = String;

    /// Accepts the label in any case, with or without punctuation
    /// (`"health & safety"`, `"health-safety"`, `"HealthSafety"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = Self::folded(s).replace("and", "");
        Self::ALL
            .into_iter()
            .find(|category| Self::folded(category.label()).replace("and", "") == wanted)
            .ok_or_else(|| format!("Unknown course category: '{s}'"))
    }
}

/// One page of course reading material
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoursePage {
    /// Page id, unique within the course (e.g., "page-1")
    pub id: String,
    /// Page heading
    pub title: String,
    /// Page body text
    pub content: String,
}

/// Kind of quiz question; both are single-select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    /// Several options, one correct
    MultipleChoice,
    /// Two options, "True" and "False"
    TrueFalse,
}

/// A single-select quiz question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// Question id, unique within the course (e.g., "q1")
    pub id: String,
    /// Question text
    pub question: String,
    /// Question kind
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    /// Answer options, in display order
    pub options: Vec<String>,
    /// Index into `options` of the correct answer
    pub correct_answer: usize,
}

impl QuizQuestion {
    /// Whether the selected option index is the correct one
    #[must_use]
    pub const fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct_answer
    }
}

/// Represents a course in the training library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Course id (e.g., "hospitality-1")
    pub id: String,

    /// Course title (e.g., "Excellence in Customer Service")
    pub title: String,

    /// Library category
    pub category: CourseCategory,

    /// Short description shown on the course card
    pub description: String,

    /// Cover image
    #[serde(default)]
    pub image_url: String,

    /// Bullet points shown on the course overview
    #[serde(default)]
    pub learning_points: Vec<String>,

    /// Reading pages, in order
    pub pages: Vec<CoursePage>,

    /// Quiz questions, in order
    pub quiz: Vec<QuizQuestion>,

    /// Estimated time to finish the reading and quiz
    pub estimated_minutes: u32,
}

impl Course {
    /// Create a course with no pages and no quiz
    #[must_use]
    pub const fn new(
        id: String,
        title: String,
        category: CourseCategory,
        description: String,
        estimated_minutes: u32,
    ) -> Self {
        Self {
            id,
            title,
            category,
            description,
            image_url: String::new(),
            learning_points: Vec::new(),
            pages: Vec::new(),
            quiz: Vec::new(),
            estimated_minutes,
        }
    }

    /// Number of reading pages
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of quiz questions
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.quiz.len()
    }

    /// Case-insensitive match against title and description
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        needle.is_empty()
            || self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}
