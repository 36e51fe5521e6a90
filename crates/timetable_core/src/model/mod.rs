//! Timetable domain model.
//!
//! # Responsibility
//! - Define the canonical subject/slot records shared by registries, layout,
//!   persistence and export.
//! - Make invalid days and colors unrepresentable.
//!
//! # Invariants
//! - Every subject and slot is identified by a stable UUID assigned at
//!   creation and never reused.
//! - `Slot::end > Slot::start` holds for every slot created through
//!   `Slot::new`; persisted slots are not re-validated on load.

use crate::time::TimeError;
use thiserror::Error;

pub mod color;
pub mod slot;
pub mod subject;

/// Rejection reasons for subject/slot creation.
///
/// A rejected operation never mutates registry state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("subject name cannot be empty")]
    EmptySubjectName,
    #[error("slot requires a subject")]
    MissingSubject,
    #[error(transparent)]
    InvalidTime(#[from] TimeError),
    #[error("slot end `{end}` must be after start `{start}`")]
    EndNotAfterStart { start: String, end: String },
    #[error("invalid color `{0}`; expected #rgb or #rrggbb")]
    InvalidColor(String),
    #[error("invalid day `{0}`; expected Mon|Tue|Wed|Thu|Fri|Sat|Sun")]
    InvalidDay(String),
    #[error("invalid visible window {start_hour}..{end_hour}; expected start < end <= 24")]
    InvalidWindow { start_hour: u8, end_hour: u8 },
}

impl ValidationError {
    /// Stable machine-readable code, safe to log (carries no user input).
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptySubjectName => "empty_subject_name",
            Self::MissingSubject => "missing_subject",
            Self::InvalidTime(_) => "invalid_time_format",
            Self::EndNotAfterStart { .. } => "end_not_after_start",
            Self::InvalidColor(_) => "invalid_color",
            Self::InvalidDay(_) => "invalid_day",
            Self::InvalidWindow { .. } => "invalid_window",
        }
    }
}
