//! Ordered subject collection.

use crate::model::color::Color;
use crate::model::subject::{Subject, SubjectId};
use crate::model::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectRegistry {
    subjects: Vec<Subject>,
}

impl SubjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a registry from previously persisted subjects, keeping order.
    pub fn from_subjects(subjects: Vec<Subject>) -> Self {
        Self { subjects }
    }

    /// Creates a subject and appends it.
    ///
    /// # Errors
    /// - `ValidationError::EmptySubjectName` when `name` is blank; nothing is
    ///   appended.
    pub fn add(&mut self, name: &str, color: Color) -> Result<Subject, ValidationError> {
        let subject = Subject::new(name, color)?;
        self.subjects.push(subject.clone());
        Ok(subject)
    }

    /// Removes the subject with `id`, returning it when present.
    pub fn remove(&mut self, id: SubjectId) -> Option<Subject> {
        let index = self.subjects.iter().position(|subject| subject.id == id)?;
        Some(self.subjects.remove(index))
    }

    pub fn get(&self, id: SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|subject| subject.id == id)
    }

    pub fn contains(&self, id: SubjectId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.iter()
    }

    pub fn as_slice(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn clear(&mut self) {
        self.subjects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::SubjectRegistry;
    use crate::model::color::Color;
    use crate::model::ValidationError;
    use uuid::Uuid;

    #[test]
    fn add_trims_name_and_appends_in_order() {
        let mut registry = SubjectRegistry::new();
        let math = registry.add("  Math ", Color::default()).unwrap();
        let physics = registry.add("Physics", Color::default()).unwrap();

        assert_eq!(math.name, "Math");
        let ids = registry.iter().map(|s| s.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![math.id, physics.id]);
    }

    #[test]
    fn add_rejects_blank_name_without_mutation() {
        let mut registry = SubjectRegistry::new();
        let err = registry.add("   ", Color::default()).unwrap_err();
        assert_eq!(err, ValidationError::EmptySubjectName);
        assert!(registry.is_empty());
    }

    #[test]
    fn remove_is_idempotent() {
        let mut registry = SubjectRegistry::new();
        let math = registry.add("Math", Color::default()).unwrap();

        assert_eq!(registry.remove(math.id).map(|s| s.id), Some(math.id));
        assert!(registry.remove(math.id).is_none());
        assert!(registry.remove(Uuid::new_v4()).is_none());
        assert!(registry.is_empty());
    }
}
