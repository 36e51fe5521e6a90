//! JSON export of the full timetable.
//!
//! # Responsibility
//! - Build the `{ "subjects": [...], "slots": [...] }` export document.
//! - Write it pretty-printed to a file.
//!
//! # Invariants
//! - Export is read-only over registries; there is no import path.
//! - Registry order is preserved in the document.

use crate::model::slot::Slot;
use crate::model::subject::Subject;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default file name offered for downloads/exports.
pub const EXPORT_FILE_NAME: &str = "timetable.json";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize export document: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write export file `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Export document shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub subjects: Vec<Subject>,
    pub slots: Vec<Slot>,
}

impl ExportDocument {
    pub fn new(subjects: &[Subject], slots: &[Slot]) -> Self {
        Self {
            subjects: subjects.to_vec(),
            slots: slots.to_vec(),
        }
    }

    /// Export is only offered when there is something to export.
    pub fn has_content(&self) -> bool {
        !self.subjects.is_empty() || !self.slots.is_empty()
    }

    pub fn to_pretty_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the pretty-printed document to `path`, replacing any file there.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        let json = self.to_pretty_json()?;
        std::fs::write(path, json).map_err(|source| {
            error!(
                "event=export_write module=export status=error error_code=io_failed error={}",
                source
            );
            ExportError::Io {
                path: path.display().to_string(),
                source,
            }
        })?;
        info!(
            "event=export_write module=export status=ok subjects={} slots={}",
            self.subjects.len(),
            self.slots.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ExportDocument;

    #[test]
    fn empty_document_has_no_content() {
        let document = ExportDocument::new(&[], &[]);
        assert!(!document.has_content());
        let json = document.to_pretty_json().unwrap();
        assert!(json.contains("\"subjects\": []"));
        assert!(json.contains("\"slots\": []"));
    }
}
