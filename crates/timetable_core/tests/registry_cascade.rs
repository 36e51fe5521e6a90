use timetable_core::{
    Color, MemoryKeyValueStore, ServiceError, SlotRequest, TimetableService, ValidationError,
    Weekday,
};
use uuid::Uuid;

#[test]
fn removing_subject_removes_exactly_its_slots() {
    let store = MemoryKeyValueStore::new();
    let mut service = TimetableService::new(&store);
    let math = service.add_subject("Math", Color::default()).unwrap();
    let physics = service.add_subject("Physics", Color::default()).unwrap();

    for (day, start, end) in [
        (Weekday::Mon, "09:00", "10:00"),
        (Weekday::Wed, "09:00", "10:00"),
        (Weekday::Fri, "13:00", "14:30"),
    ] {
        service
            .add_slot(&SlotRequest::new(math.id, day, start, end))
            .unwrap();
    }
    let kept = service
        .add_slot(&SlotRequest::new(physics.id, Weekday::Mon, "10:00", "11:30"))
        .unwrap();

    let before = service.slots().len();
    let dependents = service.slots().count_for_subject(math.id);
    let removal = service.remove_subject(math.id).unwrap();

    assert_eq!(dependents, 3);
    assert_eq!(removal.subject.map(|s| s.id), Some(math.id));
    assert_eq!(removal.removed_slots.len(), dependents);
    assert_eq!(service.slots().len(), before - dependents);
    assert!(service.slots().iter().all(|slot| slot.id == kept.id));
    assert!(!service.subjects().contains(math.id));
}

#[test]
fn removing_subject_without_slots_leaves_slots_untouched() {
    let store = MemoryKeyValueStore::new();
    let mut service = TimetableService::new(&store);
    let math = service.add_subject("Math", Color::default()).unwrap();
    let art = service.add_subject("Art", Color::default()).unwrap();
    service
        .add_slot(&SlotRequest::new(math.id, Weekday::Tue, "08:00", "09:00"))
        .unwrap();

    let removal = service.remove_subject(art.id).unwrap();
    assert!(removal.removed_slots.is_empty());
    assert_eq!(service.slots().len(), 1);
}

#[test]
fn removing_unknown_ids_is_a_noop() {
    let store = MemoryKeyValueStore::new();
    let mut service = TimetableService::new(&store);
    service.add_subject("Math", Color::default()).unwrap();

    let removal = service.remove_subject(Uuid::new_v4()).unwrap();
    assert!(removal.is_noop());
    assert!(service.remove_slot(Uuid::new_v4()).unwrap().is_none());
    assert_eq!(service.subjects().len(), 1);
}

#[test]
fn reversed_slot_leaves_registry_unchanged() {
    let store = MemoryKeyValueStore::new();
    let mut service = TimetableService::new(&store);
    let math = service.add_subject("Math", Color::default()).unwrap();
    let snapshot = service.slots().clone();

    let err = service
        .add_slot(&SlotRequest::new(math.id, Weekday::Mon, "10:00", "09:00"))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::EndNotAfterStart { .. })
    ));
    assert_eq!(service.slots(), &snapshot);
}

#[test]
fn slot_without_subject_is_rejected() {
    let store = MemoryKeyValueStore::new();
    let mut service = TimetableService::new(&store);
    let request = SlotRequest {
        subject_id: None,
        day: Weekday::Mon,
        start: "09:00".to_string(),
        end: "10:00".to_string(),
    };
    let err = service.add_slot(&request).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::MissingSubject)
    ));
    assert!(service.slots().is_empty());
}

#[test]
fn malformed_slot_time_is_rejected() {
    let store = MemoryKeyValueStore::new();
    let mut service = TimetableService::new(&store);
    let math = service.add_subject("Math", Color::default()).unwrap();
    let err = service
        .add_slot(&SlotRequest::new(math.id, Weekday::Mon, "9h", "10:00"))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::InvalidTime(_))
    ));
    assert!(service.slots().is_empty());
}

#[test]
fn registries_preserve_insertion_order() {
    let store = MemoryKeyValueStore::new();
    let mut service = TimetableService::new(&store);
    let names = ["Math", "Physics", "Chemistry"];
    for name in names {
        service.add_subject(name, Color::default()).unwrap();
    }
    let listed = service
        .subjects()
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(listed, names);
}
