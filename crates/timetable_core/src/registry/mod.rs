//! In-memory ordered registries for subjects and slots.
//!
//! # Responsibility
//! - Own the two timetable collections as explicit values (no ambient state).
//! - Apply creation validation before appending.
//!
//! # Invariants
//! - Both registries preserve insertion order.
//! - Removing an absent ID is a no-op.
//! - A rejected `add` leaves the registry unchanged.
//! - Neither registry checks cross-registry references; the subject cascade
//!   lives in `service::timetable_service`.

pub mod slot_registry;
pub mod subject_registry;
