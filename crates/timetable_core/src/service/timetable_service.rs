//! Timetable use-case service.
//!
//! # Responsibility
//! - Provide add/remove entry points for subjects and slots.
//! - Load registries once at startup and write them through on mutation.
//! - Derive the week layout and the export document.
//!
//! # Invariants
//! - `remove_subject` purges every slot referencing the subject in the same call.
//! - Rejected operations write nothing to the store.
//! - Each registry is persisted independently under its own key; a failed
//!   write leaves the in-memory change in place and returns the store error.

use crate::export::ExportDocument;
use crate::layout::grid::{layout_week, VisibleWindow, WeekLayout};
use crate::layout::label::{resolve_subject, SubjectLabel};
use crate::model::color::Color;
use crate::model::slot::{Slot, SlotId, SlotRequest};
use crate::model::subject::{Subject, SubjectId};
use crate::model::ValidationError;
use crate::registry::slot_registry::SlotRegistry;
use crate::registry::subject_registry::SubjectRegistry;
use crate::store::{KeyValueStore, StoreError, SLOTS_KEY, SUBJECTS_KEY};
use log::{error, info, warn};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Slot references a subject that is not registered.
    #[error("subject not found: {0}")]
    UnknownSubject(SubjectId),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to encode registry: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Outcome of a subject removal, including cascaded slots.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubjectRemoval {
    /// `None` when no subject had the given ID.
    pub subject: Option<Subject>,
    pub removed_slots: Vec<Slot>,
}

impl SubjectRemoval {
    pub fn is_noop(&self) -> bool {
        self.subject.is_none() && self.removed_slots.is_empty()
    }
}

/// Owns both registries and the store they are mirrored to.
pub struct TimetableService<S: KeyValueStore> {
    store: S,
    subjects: SubjectRegistry,
    slots: SlotRegistry,
}

impl<S: KeyValueStore> TimetableService<S> {
    /// Creates a service with empty registries; nothing is read from `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            subjects: SubjectRegistry::new(),
            slots: SlotRegistry::new(),
        }
    }

    /// Creates a service and loads both registries from `store`.
    ///
    /// Missing keys load as empty registries. Unreadable blobs are logged and
    /// also load as empty, so a damaged entry never blocks startup.
    ///
    /// # Errors
    /// - `ServiceError::Store` when the store itself fails.
    pub fn load(store: S) -> ServiceResult<Self> {
        let subjects = decode_registry::<Subject>(SUBJECTS_KEY, store.load(SUBJECTS_KEY)?);
        let slots = decode_registry::<Slot>(SLOTS_KEY, store.load(SLOTS_KEY)?);
        info!(
            "event=timetable_load module=service status=ok subjects={} slots={}",
            subjects.len(),
            slots.len()
        );
        Ok(Self {
            store,
            subjects: SubjectRegistry::from_subjects(subjects),
            slots: SlotRegistry::from_slots(slots),
        })
    }

    pub fn subjects(&self) -> &SubjectRegistry {
        &self.subjects
    }

    pub fn slots(&self) -> &SlotRegistry {
        &self.slots
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Adds a subject and persists the subject registry.
    pub fn add_subject(&mut self, name: &str, color: Color) -> ServiceResult<Subject> {
        let subject = self
            .subjects
            .add(name, color)
            .inspect_err(|err| log_rejected("subject_add", err))?;
        self.persist_subjects()?;
        info!(
            "event=subject_add module=service status=ok subjects={}",
            self.subjects.len()
        );
        Ok(subject)
    }

    /// Removes a subject and every slot referencing it.
    ///
    /// Removing an unknown ID still purges slots that dangle on that ID;
    /// when nothing matches, nothing is written.
    pub fn remove_subject(&mut self, id: SubjectId) -> ServiceResult<SubjectRemoval> {
        let removal = SubjectRemoval {
            subject: self.subjects.remove(id),
            removed_slots: self.slots.remove_for_subject(id),
        };

        if removal.subject.is_some() {
            self.persist_subjects()?;
        }
        if !removal.removed_slots.is_empty() {
            self.persist_slots()?;
        }

        info!(
            "event=subject_remove module=service status={} removed_slots={}",
            if removal.is_noop() { "noop" } else { "ok" },
            removal.removed_slots.len()
        );
        Ok(removal)
    }

    /// Adds a slot after checking that its subject is registered.
    ///
    /// # Errors
    /// - `ServiceError::Validation` for missing subject, malformed times or
    ///   `end <= start`.
    /// - `ServiceError::UnknownSubject` when the subject is not registered.
    pub fn add_slot(&mut self, request: &SlotRequest) -> ServiceResult<Slot> {
        if let Some(subject_id) = request.subject_id {
            if !self.subjects.contains(subject_id) {
                warn!("event=slot_add module=service status=rejected reason=unknown_subject");
                return Err(ServiceError::UnknownSubject(subject_id));
            }
        }

        let slot = self
            .slots
            .add(request)
            .inspect_err(|err| log_rejected("slot_add", err))?;
        self.persist_slots()?;
        info!(
            "event=slot_add module=service status=ok slots={}",
            self.slots.len()
        );
        Ok(slot)
    }

    /// Removes one slot; unknown IDs are a no-op.
    pub fn remove_slot(&mut self, id: SlotId) -> ServiceResult<Option<Slot>> {
        let removed = self.slots.remove(id);
        if removed.is_some() {
            self.persist_slots()?;
        }
        info!(
            "event=slot_remove module=service status={}",
            if removed.is_some() { "ok" } else { "noop" }
        );
        Ok(removed)
    }

    /// Drops all subjects and slots and deletes both store keys.
    pub fn clear_all(&mut self) -> ServiceResult<()> {
        self.subjects.clear();
        self.slots.clear();
        self.store.delete(SUBJECTS_KEY)?;
        self.store.delete(SLOTS_KEY)?;
        info!("event=timetable_clear module=service status=ok");
        Ok(())
    }

    /// Lays out all slots for `window`.
    pub fn layout(&self, window: &VisibleWindow) -> WeekLayout {
        layout_week(self.slots.iter(), window)
    }

    /// Display name/color for a subject reference, with fallbacks.
    pub fn subject_label(&self, subject_id: SubjectId) -> SubjectLabel {
        resolve_subject(&self.subjects, subject_id)
    }

    pub fn can_export(&self) -> bool {
        !self.subjects.is_empty() || !self.slots.is_empty()
    }

    pub fn export_document(&self) -> ExportDocument {
        ExportDocument::new(self.subjects.as_slice(), self.slots.as_slice())
    }

    fn persist_subjects(&self) -> ServiceResult<()> {
        let blob = serde_json::to_string(self.subjects.as_slice())?;
        self.save_blob(SUBJECTS_KEY, &blob)
    }

    fn persist_slots(&self) -> ServiceResult<()> {
        let blob = serde_json::to_string(self.slots.as_slice())?;
        self.save_blob(SLOTS_KEY, &blob)
    }

    fn save_blob(&self, key: &str, blob: &str) -> ServiceResult<()> {
        self.store.save(key, blob).map_err(|err| {
            error!(
                "event=store_save module=service status=error key={} error={}",
                key, err
            );
            ServiceError::from(err)
        })
    }
}

fn decode_registry<T: DeserializeOwned>(key: &str, blob: Option<String>) -> Vec<T> {
    let Some(blob) = blob else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<T>>(&blob) {
        Ok(items) => items,
        Err(err) => {
            error!(
                "event=store_decode module=service status=error key={} error_code=corrupt_blob line={} column={}",
                key,
                err.line(),
                err.column()
            );
            Vec::new()
        }
    }
}

fn log_rejected(event: &str, err: &ValidationError) {
    warn!(
        "event={} module=service status=rejected reason={}",
        event,
        err.code()
    );
}
