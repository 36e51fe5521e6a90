//! Flutter-facing bridge over `timetable_core`.

pub mod api;
