//! Slot domain model.
//!
//! # Responsibility
//! - Define the weekly-recurring time interval record and its day type.
//! - Validate slot creation input (subject set, well-formed times, end after start).
//!
//! # Invariants
//! - `end > start` for every slot created by `Slot::new`.
//! - `subject_id` is not checked against any registry here.

use super::subject::SubjectId;
use super::ValidationError;
use crate::time::TimeOfDay;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable slot identifier.
pub type SlotId = Uuid;

/// Day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// All days in grid column order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mon => "Mon",
            Self::Tue => "Tue",
            Self::Wed => "Wed",
            Self::Thu => "Thu",
            Self::Fri => "Fri",
            Self::Sat => "Sat",
            Self::Sun => "Sun",
        }
    }

    /// Zero-based column index (Mon = 0).
    pub fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Weekday {
    type Err = ValidationError;

    /// Accepts short (`Mon`) or full (`monday`) names, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mon" | "monday" => Ok(Self::Mon),
            "tue" | "tuesday" => Ok(Self::Tue),
            "wed" | "wednesday" => Ok(Self::Wed),
            "thu" | "thursday" => Ok(Self::Thu),
            "fri" | "friday" => Ok(Self::Fri),
            "sat" | "saturday" => Ok(Self::Sat),
            "sun" | "sunday" => Ok(Self::Sun),
            _ => Err(ValidationError::InvalidDay(s.to_string())),
        }
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Form-shaped input for creating a slot.
///
/// Times stay as raw text so parsing failures surface as validation
/// rejections instead of being caught earlier by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRequest {
    /// `None` models a form submitted without a subject selection.
    pub subject_id: Option<SubjectId>,
    pub day: Weekday,
    pub start: String,
    pub end: String,
}

impl SlotRequest {
    pub fn new(
        subject_id: SubjectId,
        day: Weekday,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            subject_id: Some(subject_id),
            day,
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Weekly-recurring interval on one day, assigned to one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub id: SlotId,
    pub subject_id: SubjectId,
    pub day: Weekday,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl Slot {
    /// Validates a request and creates a slot with a generated ID.
    ///
    /// # Errors
    /// - `MissingSubject` when no subject is selected.
    /// - `InvalidTime` when `start` or `end` is not `HH:MM`.
    /// - `EndNotAfterStart` when `end <= start`.
    pub fn new(request: &SlotRequest) -> Result<Self, ValidationError> {
        let subject_id = request.subject_id.ok_or(ValidationError::MissingSubject)?;
        let start: TimeOfDay = request.start.parse()?;
        let end: TimeOfDay = request.end.parse()?;
        if end <= start {
            return Err(ValidationError::EndNotAfterStart {
                start: request.start.clone(),
                end: request.end.clone(),
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            subject_id,
            day: request.day,
            start,
            end,
        })
    }

    /// Slot length in minutes.
    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }
}
