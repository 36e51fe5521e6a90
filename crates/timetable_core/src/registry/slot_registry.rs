//! Ordered slot collection.

use crate::model::slot::{Slot, SlotId, SlotRequest};
use crate::model::subject::SubjectId;
use crate::model::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotRegistry {
    slots: Vec<Slot>,
}

impl SlotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a registry from persisted slots without re-validating them.
    pub fn from_slots(slots: Vec<Slot>) -> Self {
        Self { slots }
    }

    /// Validates `request` and appends the resulting slot.
    ///
    /// The referenced subject is not checked for existence here.
    pub fn add(&mut self, request: &SlotRequest) -> Result<Slot, ValidationError> {
        let slot = Slot::new(request)?;
        self.slots.push(slot.clone());
        Ok(slot)
    }

    /// Removes the slot with `id`, returning it when present.
    pub fn remove(&mut self, id: SlotId) -> Option<Slot> {
        let index = self.slots.iter().position(|slot| slot.id == id)?;
        Some(self.slots.remove(index))
    }

    /// Removes every slot referencing `subject_id`, returning them in order.
    pub fn remove_for_subject(&mut self, subject_id: SubjectId) -> Vec<Slot> {
        let (removed, kept): (Vec<Slot>, Vec<Slot>) = std::mem::take(&mut self.slots)
            .into_iter()
            .partition(|slot| slot.subject_id == subject_id);
        self.slots = kept;
        removed
    }

    pub fn get(&self, id: SlotId) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    pub fn count_for_subject(&self, subject_id: SubjectId) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.subject_id == subject_id)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    pub fn as_slice(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::SlotRegistry;
    use crate::model::slot::{SlotRequest, Weekday};
    use uuid::Uuid;

    #[test]
    fn add_rejects_reversed_range_without_mutation() {
        let mut registry = SlotRegistry::new();
        let request = SlotRequest::new(Uuid::new_v4(), Weekday::Mon, "10:00", "09:00");
        assert!(registry.add(&request).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn remove_for_subject_keeps_other_slots_in_order() {
        let mut registry = SlotRegistry::new();
        let math = Uuid::new_v4();
        let physics = Uuid::new_v4();
        let first = registry
            .add(&SlotRequest::new(physics, Weekday::Mon, "08:00", "09:00"))
            .unwrap();
        registry
            .add(&SlotRequest::new(math, Weekday::Tue, "09:00", "10:00"))
            .unwrap();
        let last = registry
            .add(&SlotRequest::new(physics, Weekday::Wed, "11:00", "12:00"))
            .unwrap();

        let removed = registry.remove_for_subject(math);
        assert_eq!(removed.len(), 1);
        let remaining = registry.iter().map(|s| s.id).collect::<Vec<_>>();
        assert_eq!(remaining, vec![first.id, last.id]);
        assert_eq!(registry.count_for_subject(math), 0);
    }

    #[test]
    fn remove_missing_slot_is_noop() {
        let mut registry = SlotRegistry::new();
        registry
            .add(&SlotRequest::new(Uuid::new_v4(), Weekday::Sun, "18:00", "19:00"))
            .unwrap();
        assert!(registry.remove(Uuid::new_v4()).is_none());
        assert_eq!(registry.len(), 1);
    }
}
