//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose timetable use-cases (subjects, slots, layout, export) to Dart.
//! - Keep error semantics simple: envelopes with `ok` + message.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call opens the configured database, loads both registries, and
//!   writes through on mutation; no state is cached between calls.

use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;
use timetable_core::db::open_db;
use timetable_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    slot_line, Color, ServiceResult, SlotRequest, SqliteKeyValueStore, TimetableService,
    VisibleWindow, Weekday, EXPORT_FILE_NAME,
};
use uuid::Uuid;

const DB_FILE_NAME: &str = "timetable.sqlite3";
const DB_PATH_ENV: &str = "TIMETABLE_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

type FfiService<'conn> = TimetableService<SqliteKeyValueStore<'conn>>;

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - `level`: `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory for rolling log files.
/// - Returns empty string on success, error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Sets the database file used by all later calls.
///
/// # FFI contract
/// - Must be called before any data call to take effect; afterwards the
///   path is fixed for the process lifetime.
/// - Returns empty string on success, error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_storage(db_path: String) -> String {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "db_path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = DB_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "storage already configured at `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// Subject item for list views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectItem {
    pub id: String,
    pub name: String,
    /// Lowercase `#rrggbb`.
    pub color: String,
}

/// Slot item for list views, with resolved subject display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotItem {
    pub id: String,
    pub subject_id: String,
    pub subject_name: String,
    pub color: String,
    pub day: String,
    pub start: String,
    pub end: String,
    /// `<subject> — <Day> <start> - <end>`.
    pub label: String,
}

/// Full registry snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableSnapshot {
    pub subjects: Vec<SubjectItem>,
    pub slots: Vec<SlotItem>,
    pub can_export: bool,
    pub message: String,
}

/// Generic mutation response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// ID of the created or removed record, when there is one.
    pub id: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// One rendered block, positions in percent of the grid height.
#[derive(Debug, Clone, PartialEq)]
pub struct GridBlockItem {
    pub slot_id: String,
    pub subject_name: String,
    pub color: String,
    pub start: String,
    pub end: String,
    pub top_percent: f64,
    pub height_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridColumnItem {
    pub day: String,
    pub blocks: Vec<GridBlockItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridResponse {
    pub ok: bool,
    pub hour_labels: Vec<String>,
    pub columns: Vec<GridColumnItem>,
    pub message: String,
}

/// Export payload, kept apart from the status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResponse {
    pub ok: bool,
    /// Suggested file name for saving `json`.
    pub file_name: String,
    /// Pretty-printed document; `None` on failure.
    pub json: Option<String>,
    pub message: String,
}

impl ExportResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            file_name: EXPORT_FILE_NAME.to_string(),
            json: None,
            message: message.into(),
        }
    }
}

/// Lists both registries in insertion order.
#[flutter_rust_bridge::frb(sync)]
pub fn timetable_snapshot() -> TimetableSnapshot {
    match with_service(|service| Ok(snapshot_of(service))) {
        Ok(snapshot) => snapshot,
        Err(err) => TimetableSnapshot {
            subjects: Vec::new(),
            slots: Vec::new(),
            can_export: false,
            message: format!("timetable_snapshot failed: {err}"),
        },
    }
}

/// Adds a subject. `color` defaults to `#3b82f6` when blank.
#[flutter_rust_bridge::frb(sync)]
pub fn subject_add(name: String, color: String) -> ActionResponse {
    let color = if color.trim().is_empty() {
        Color::default()
    } else {
        match Color::parse(&color) {
            Ok(color) => color,
            Err(err) => return ActionResponse::failure(format!("subject_add failed: {err}")),
        }
    };

    match with_service(|service| service.add_subject(&name, color)) {
        Ok(subject) => ActionResponse::success("Subject added.", Some(subject.id.to_string())),
        Err(err) => ActionResponse::failure(format!("subject_add failed: {err}")),
    }
}

/// Removes a subject and all of its slots. Unknown IDs succeed as no-ops.
#[flutter_rust_bridge::frb(sync)]
pub fn subject_remove(subject_id: String) -> ActionResponse {
    let id = match parse_id(&subject_id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(format!("subject_remove failed: {message}")),
    };

    match with_service(|service| service.remove_subject(id)) {
        Ok(removal) if removal.is_noop() => ActionResponse::success("Nothing to remove.", None),
        Ok(removal) => ActionResponse::success(
            format!(
                "Subject removed with {} slot(s).",
                removal.removed_slots.len()
            ),
            Some(subject_id.trim().to_string()),
        ),
        Err(err) => ActionResponse::failure(format!("subject_remove failed: {err}")),
    }
}

/// Adds a slot. An empty `subject_id` is rejected like an unselected form field.
#[flutter_rust_bridge::frb(sync)]
pub fn slot_add(subject_id: String, day: String, start: String, end: String) -> ActionResponse {
    let subject_id = if subject_id.trim().is_empty() {
        None
    } else {
        match parse_id(&subject_id) {
            Ok(id) => Some(id),
            Err(message) => return ActionResponse::failure(format!("slot_add failed: {message}")),
        }
    };
    let day = match day.parse::<Weekday>() {
        Ok(day) => day,
        Err(err) => return ActionResponse::failure(format!("slot_add failed: {err}")),
    };
    let request = SlotRequest {
        subject_id,
        day,
        start,
        end,
    };

    match with_service(|service| service.add_slot(&request)) {
        Ok(slot) => ActionResponse::success("Slot added.", Some(slot.id.to_string())),
        Err(err) => ActionResponse::failure(format!("slot_add failed: {err}")),
    }
}

/// Removes one slot. Unknown IDs succeed as no-ops.
#[flutter_rust_bridge::frb(sync)]
pub fn slot_remove(slot_id: String) -> ActionResponse {
    let id = match parse_id(&slot_id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(format!("slot_remove failed: {message}")),
    };

    match with_service(|service| service.remove_slot(id)) {
        Ok(Some(slot)) => ActionResponse::success("Slot removed.", Some(slot.id.to_string())),
        Ok(None) => ActionResponse::success("Nothing to remove.", None),
        Err(err) => ActionResponse::failure(format!("slot_remove failed: {err}")),
    }
}

/// Clears all subjects and slots. The UI must confirm before calling.
#[flutter_rust_bridge::frb(sync)]
pub fn timetable_clear() -> ActionResponse {
    match with_service(|service| service.clear_all()) {
        Ok(()) => ActionResponse::success("Timetable cleared.", None),
        Err(err) => ActionResponse::failure(format!("timetable_clear failed: {err}")),
    }
}

/// Computes the weekly grid for `[start_hour, end_hour]`.
#[flutter_rust_bridge::frb(sync)]
pub fn timetable_grid(start_hour: u8, end_hour: u8) -> GridResponse {
    let failure = |message: String| GridResponse {
        ok: false,
        hour_labels: Vec::new(),
        columns: Vec::new(),
        message,
    };
    let window = match VisibleWindow::new(start_hour, end_hour) {
        Ok(window) => window,
        Err(err) => return failure(format!("timetable_grid failed: {err}")),
    };

    let result = with_service(|service| {
        let layout = service.layout(&window);
        let columns = layout
            .days
            .iter()
            .map(|column| GridColumnItem {
                day: column.day.to_string(),
                blocks: column
                    .blocks
                    .iter()
                    .map(|block| {
                        let label = service.subject_label(block.subject_id);
                        GridBlockItem {
                            slot_id: block.slot_id.to_string(),
                            subject_name: label.name,
                            color: label.color.to_string(),
                            start: block.start.to_string(),
                            end: block.end.to_string(),
                            top_percent: block.top_percent(),
                            height_percent: block.height_percent(),
                        }
                    })
                    .collect(),
            })
            .collect::<Vec<_>>();
        Ok(columns)
    });

    match result {
        Ok(columns) => GridResponse {
            ok: true,
            hour_labels: window.hour_labels(),
            columns,
            message: String::new(),
        },
        Err(err) => failure(format!("timetable_grid failed: {err}")),
    }
}

/// Returns the pretty-printed export document; fails when there is nothing
/// to export.
#[flutter_rust_bridge::frb(sync)]
pub fn timetable_export_json() -> ExportResponse {
    let result = with_service(|service| Ok((service.can_export(), service.export_document())));
    match result {
        Ok((false, _)) => ExportResponse::failure("Nothing to export."),
        Ok((true, document)) => match document.to_pretty_json() {
            Ok(json) => ExportResponse {
                ok: true,
                file_name: EXPORT_FILE_NAME.to_string(),
                json: Some(json),
                message: "Exported.".to_string(),
            },
            Err(err) => ExportResponse::failure(format!("timetable_export_json failed: {err}")),
        },
        Err(err) => ExportResponse::failure(format!("timetable_export_json failed: {err}")),
    }
}

fn snapshot_of(service: &FfiService<'_>) -> TimetableSnapshot {
    let subjects = service
        .subjects()
        .iter()
        .map(|subject| SubjectItem {
            id: subject.id.to_string(),
            name: subject.name.clone(),
            color: subject.color.to_string(),
        })
        .collect();
    let slots = service
        .slots()
        .iter()
        .map(|slot| {
            let label = service.subject_label(slot.subject_id);
            SlotItem {
                id: slot.id.to_string(),
                subject_id: slot.subject_id.to_string(),
                subject_name: label.name,
                color: label.color.to_string(),
                day: slot.day.to_string(),
                start: slot.start.to_string(),
                end: slot.end.to_string(),
                label: slot_line(service.subjects(), slot),
            }
        })
        .collect();

    TimetableSnapshot {
        subjects,
        slots,
        can_export: service.can_export(),
        message: String::new(),
    }
}

fn parse_id(value: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid id `{}`", value.trim()))
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_service<T>(f: impl FnOnce(&mut FfiService<'_>) -> ServiceResult<T>) -> Result<T, String> {
    let conn = open_db(resolve_db_path()).map_err(|err| {
        warn!("event=ffi_call module=ffi status=error error_code=db_open_failed");
        format!("timetable DB open failed: {err}")
    })?;
    let mut service = TimetableService::load(SqliteKeyValueStore::new(&conn))
        .map_err(|err| format!("timetable load failed: {err}"))?;
    f(&mut service).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{
        configure_storage, core_version, init_logging, ping, slot_add, slot_remove, subject_add,
        subject_remove, timetable_clear, timetable_export_json, timetable_grid,
        timetable_snapshot,
    };
    use std::sync::Mutex;

    // All tests share one process-wide database file.
    static DB_LOCK: Mutex<()> = Mutex::new(());

    fn setup() -> std::sync::MutexGuard<'static, ()> {
        let guard = DB_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let path = std::env::temp_dir().join(format!(
            "timetable-ffi-test-{}.sqlite3",
            std::process::id()
        ));
        let _ = configure_storage(path.to_string_lossy().into_owned());
        guard
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn configure_storage_rejects_empty_path() {
        assert!(!configure_storage("  ".to_string()).is_empty());
    }

    #[test]
    fn subject_and_slot_flow_updates_snapshot_and_grid() {
        let _guard = setup();
        let subject = subject_add("Math".to_string(), "#3B82F6".to_string());
        assert!(subject.ok, "{}", subject.message);
        let subject_id = subject.id.expect("subject id");

        let slot = slot_add(
            subject_id.clone(),
            "Mon".to_string(),
            "09:00".to_string(),
            "10:00".to_string(),
        );
        assert!(slot.ok, "{}", slot.message);
        let slot_id = slot.id.expect("slot id");

        let snapshot = timetable_snapshot();
        let item = snapshot
            .slots
            .iter()
            .find(|item| item.id == slot_id)
            .expect("slot listed");
        assert_eq!(item.label, "Math — Mon 09:00 - 10:00");
        assert_eq!(item.color, "#3b82f6");
        assert!(snapshot.can_export);

        let grid = timetable_grid(8, 18);
        assert!(grid.ok, "{}", grid.message);
        assert_eq!(grid.columns.len(), 7);
        let block = grid.columns[0]
            .blocks
            .iter()
            .find(|block| block.slot_id == slot_id)
            .expect("block on Monday");
        assert!((block.top_percent - 10.0).abs() < 1e-9);
        assert!((block.height_percent - 10.0).abs() < 1e-9);

        let export = timetable_export_json();
        assert!(export.ok, "{}", export.message);
        assert_eq!(export.file_name, "timetable.json");
        assert!(export.json.as_deref().unwrap_or_default().contains(&slot_id));
        assert!(!export.message.contains(&slot_id));

        let removed = subject_remove(subject_id);
        assert!(removed.ok, "{}", removed.message);
        let snapshot = timetable_snapshot();
        assert!(snapshot.slots.iter().all(|item| item.id != slot_id));
    }

    #[test]
    fn export_of_cleared_timetable_has_no_payload() {
        let _guard = setup();
        let cleared = timetable_clear();
        assert!(cleared.ok, "{}", cleared.message);

        let export = timetable_export_json();
        assert!(!export.ok);
        assert_eq!(export.json, None);
        assert_eq!(export.message, "Nothing to export.");
    }

    #[test]
    fn slot_add_rejects_empty_subject_and_reversed_range() {
        let _guard = setup();
        let missing = slot_add(
            String::new(),
            "Mon".to_string(),
            "09:00".to_string(),
            "10:00".to_string(),
        );
        assert!(!missing.ok);

        let subject = subject_add("Physics".to_string(), String::new());
        let subject_id = subject.id.expect("subject id");
        let reversed = slot_add(
            subject_id.clone(),
            "Tue".to_string(),
            "10:00".to_string(),
            "09:00".to_string(),
        );
        assert!(!reversed.ok);
        assert!(reversed.message.contains("after start"));

        assert!(subject_remove(subject_id).ok);
    }

    #[test]
    fn remove_unknown_ids_is_noop() {
        let _guard = setup();
        let response = slot_remove(uuid::Uuid::new_v4().to_string());
        assert!(response.ok);
        assert!(response.id.is_none());
        assert!(!slot_remove("not-a-uuid".to_string()).ok);
    }

    #[test]
    fn grid_rejects_invalid_window() {
        let grid = timetable_grid(18, 8);
        assert!(!grid.ok);
    }
}
