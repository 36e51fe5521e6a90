use timetable_core::{
    Color, MemoryKeyValueStore, SlotRequest, TimetableService, VisibleWindow, Weekday,
};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn math_then_physics_on_monday() {
    let store = MemoryKeyValueStore::new();
    let mut service = TimetableService::new(&store);

    let math = service
        .add_subject("Math", Color::parse("#3b82f6").unwrap())
        .unwrap();
    let physics = service.add_subject("Physics", Color::default()).unwrap();
    service
        .add_slot(&SlotRequest::new(math.id, Weekday::Mon, "09:00", "10:00"))
        .unwrap();
    service
        .add_slot(&SlotRequest::new(physics.id, Weekday::Mon, "10:00", "11:30"))
        .unwrap();

    let window = VisibleWindow::new(8, 18).unwrap();
    let layout = service.layout(&window);
    let monday = layout.day(Weekday::Mon);
    assert_eq!(monday.blocks.len(), 2);

    let first = &monday.blocks[0];
    assert_eq!(first.subject_id, math.id);
    assert_close(first.top_percent(), 10.0);
    assert_close(first.height_percent(), 10.0);

    let second = &monday.blocks[1];
    assert_eq!(second.subject_id, physics.id);
    assert_close(second.top_percent(), 20.0);
    assert_close(second.height_percent(), 15.0);

    assert_eq!(service.subject_label(first.subject_id).name, "Math");
    assert!(Weekday::ALL
        .iter()
        .filter(|day| **day != Weekday::Mon)
        .all(|day| layout.day(*day).blocks.is_empty()));

    let removal = service.remove_subject(math.id).unwrap();
    assert_eq!(removal.removed_slots.len(), 1);
    let layout = service.layout(&window);
    assert_eq!(layout.day(Weekday::Mon).blocks.len(), 1);
    assert_eq!(layout.day(Weekday::Mon).blocks[0].subject_id, physics.id);
}
