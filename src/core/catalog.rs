//! Read-only course catalog
//!
//! The built-in library is compiled in from `assets/courses.json`, in the same
//! JSON shape the app stores courses in.

use crate::core::models::{Course, CourseCategory};

/// Built-in course library
const BUILTIN_COURSES: &str = include_str!("../../assets/courses.json");

/// Immutable list of courses, in library order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    /// Create a catalog from a list of courses
    #[must_use]
    pub const fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// Parse a catalog from a JSON array of courses
    ///
    /// # Errors
    /// Returns an error if the JSON does not match the course schema
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self::new)
    }

    /// The seven courses shipped with the app
    ///
    /// # Panics
    /// Panics if the compiled-in course data cannot be parsed
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_COURSES).expect("Failed to parse compiled-in course catalog")
    }

    /// All courses
    #[must_use]
    pub fn all(&self) -> &[Course] {
        &self.courses
    }

    /// Number of courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog has no courses
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Look up a course by id
    #[must_use]
    pub fn get(&self, course_id: &str) -> Option<&Course> {
        self.courses.iter().find(|course| course.id == course_id)
    }

    /// Courses in a category
    pub fn by_category(&self, category: CourseCategory) -> impl Iterator<Item = &Course> {
        self.courses
            .iter()
            .filter(move |course| course.category == category)
    }

    /// Courses whose title or description contains `query` (case-insensitive)
    pub fn search<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a Course> {
        self.courses.iter().filter(move |course| course.matches(query))
    }
}
