//! Subject domain model.
//!
//! # Invariants
//! - `name` is stored trimmed and is never empty for subjects built by `new`.
//! - `id` is immutable after creation.

use super::color::Color;
use super::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable subject identifier.
pub type SubjectId = Uuid;

/// Named, colored category a slot belongs to (e.g. a course).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub color: Color,
}

impl Subject {
    /// Creates a subject with a generated ID.
    ///
    /// # Errors
    /// - `ValidationError::EmptySubjectName` when `name` is blank.
    pub fn new(name: &str, color: Color) -> Result<Self, ValidationError> {
        Self::with_id(Uuid::new_v4(), name, color)
    }

    /// Creates a subject with a caller-provided ID.
    pub fn with_id(id: SubjectId, name: &str, color: Color) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptySubjectName);
        }
        Ok(Self {
            id,
            name: name.to_string(),
            color,
        })
    }
}
