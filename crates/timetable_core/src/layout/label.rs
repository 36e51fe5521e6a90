//! Subject display resolution for rendered slots.

use crate::model::color::Color;
use crate::model::slot::Slot;
use crate::model::subject::SubjectId;
use crate::registry::subject_registry::SubjectRegistry;

/// Name shown for slots whose subject no longer exists.
pub const UNKNOWN_SUBJECT_NAME: &str = "Unknown";

/// Display data for one subject reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectLabel {
    pub name: String,
    pub color: Color,
    /// `false` when the reference is dangling and fallbacks were used.
    pub resolved: bool,
}

/// Resolves `subject_id` against `subjects`, falling back to
/// `UNKNOWN_SUBJECT_NAME` and `Color::fallback()`.
pub fn resolve_subject(subjects: &SubjectRegistry, subject_id: SubjectId) -> SubjectLabel {
    match subjects.get(subject_id) {
        Some(subject) => SubjectLabel {
            name: subject.name.clone(),
            color: subject.color.clone(),
            resolved: true,
        },
        None => SubjectLabel {
            name: UNKNOWN_SUBJECT_NAME.to_string(),
            color: Color::fallback(),
            resolved: false,
        },
    }
}

/// One-line listing text: `<subject> — <Day> <start> - <end>`.
pub fn slot_line(subjects: &SubjectRegistry, slot: &Slot) -> String {
    let label = resolve_subject(subjects, slot.subject_id);
    format!("{} — {} {} - {}", label.name, slot.day, slot.start, slot.end)
}

#[cfg(test)]
mod tests {
    use super::{resolve_subject, slot_line, UNKNOWN_SUBJECT_NAME};
    use crate::model::color::Color;
    use crate::model::slot::{Slot, SlotRequest, Weekday};
    use crate::registry::subject_registry::SubjectRegistry;
    use uuid::Uuid;

    #[test]
    fn dangling_reference_resolves_to_unknown() {
        let subjects = SubjectRegistry::new();
        let label = resolve_subject(&subjects, Uuid::new_v4());
        assert_eq!(label.name, UNKNOWN_SUBJECT_NAME);
        assert_eq!(label.color, Color::fallback());
        assert!(!label.resolved);
    }

    #[test]
    fn slot_line_uses_subject_name() {
        let mut subjects = SubjectRegistry::new();
        let math = subjects
            .add("Math", Color::parse("#3b82f6").unwrap())
            .unwrap();
        let slot = Slot::new(&SlotRequest::new(math.id, Weekday::Mon, "09:00", "10:00")).unwrap();
        assert_eq!(slot_line(&subjects, &slot), "Math — Mon 09:00 - 10:00");
    }
}
