//! Core use-case services.
//!
//! # Responsibility
//! - Own the subject and slot registries for one timetable.
//! - Enforce cross-registry rules (subject cascade, subject existence).
//! - Mirror registry state to the key-value store after each mutation.

pub mod timetable_service;
