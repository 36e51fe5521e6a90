//! Core domain logic for the weekly timetable builder.
//! This crate is the single source of truth for timetable invariants.

pub mod db;
pub mod export;
pub mod layout;
pub mod logging;
pub mod model;
pub mod registry;
pub mod service;
pub mod store;
pub mod time;

pub use export::{ExportDocument, ExportError, EXPORT_FILE_NAME};
pub use layout::grid::{
    block_geometry, layout_day, layout_week, DayColumn, SlotBlock, VisibleWindow, WeekLayout,
    MIN_VISIBLE_FRACTION,
};
pub use layout::label::{resolve_subject, slot_line, SubjectLabel, UNKNOWN_SUBJECT_NAME};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::color::Color;
pub use model::slot::{Slot, SlotId, SlotRequest, Weekday};
pub use model::subject::{Subject, SubjectId};
pub use model::ValidationError;
pub use registry::slot_registry::SlotRegistry;
pub use registry::subject_registry::SubjectRegistry;
pub use service::timetable_service::{
    ServiceError, ServiceResult, SubjectRemoval, TimetableService,
};
pub use store::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult,
};
pub use time::{format_minutes, parse_time, TimeError, TimeOfDay};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
