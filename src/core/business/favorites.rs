//! Favorite courses

use super::{BusinessError, BusinessStore};
use crate::core::models::Course;
use crate::core::storage::{KeyValueStore, StorageKey};

impl<S: KeyValueStore> BusinessStore<S> {
    /// Favorite course ids, in the order they were liked
    #[must_use]
    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    /// Whether a course is a favorite
    #[must_use]
    pub fn is_favorite(&self, course_id: &str) -> bool {
        self.favorites.iter().any(|id| id == course_id)
    }

    /// Add the course to favorites, or remove it if already there. Returns
    /// `true` when the course is a favorite afterwards.
    ///
    /// # Errors
    /// Returns [`BusinessError::CourseNotFound`] when adding a course that is
    /// not in the catalog, or [`BusinessError::Storage`] if the write fails
    pub fn toggle_favorite(&mut self, course_id: &str) -> Result<bool, BusinessError> {
        let mut favorites = self.favorites.clone();
        let now_favorite = if self.is_favorite(course_id) {
            favorites.retain(|id| id != course_id);
            false
        } else {
            self.course(course_id)?;
            favorites.push(course_id.to_string());
            true
        };

        self.persist(StorageKey::FavoriteCourses, &favorites)?;
        self.favorites = favorites;
        Ok(now_favorite)
    }

    /// Favorite courses that exist in the catalog
    #[must_use]
    pub fn favorite_courses(&self) -> Vec<&Course> {
        self.favorites
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .collect()
    }
}
