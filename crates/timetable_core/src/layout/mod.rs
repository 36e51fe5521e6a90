//! Weekly grid layout.
//!
//! # Responsibility
//! - Map slots to fractional render rectangles inside a visible hour window.
//! - Resolve subject display data for rendering, tolerating dangling refs.
//!
//! # Invariants
//! - Layout is a pure function of `(slots, window)`; recomputing it with the
//!   same inputs yields the same output.
//! - Overlapping slots are laid out independently (no conflict detection).

pub mod grid;
pub mod label;
