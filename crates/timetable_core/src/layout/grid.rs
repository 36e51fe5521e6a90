//! Grid layout engine.
//!
//! # Invariants
//! - Seven day columns are always produced, Mon..Sun, even when empty.
//! - Blocks in a column are sorted by start; ties keep insertion order.
//! - `top` is never negative; a slot starting after the window has `top > 1`.
//! - `height >= MIN_VISIBLE_FRACTION`.

use crate::model::slot::{Slot, SlotId, Weekday};
use crate::model::subject::SubjectId;
use crate::model::ValidationError;
use crate::time::TimeOfDay;

/// Smallest rendered height, so very short slots stay visible.
pub const MIN_VISIBLE_FRACTION: f64 = 0.02;
pub const DEFAULT_START_HOUR: u8 = 8;
pub const DEFAULT_END_HOUR: u8 = 18;

/// Whole-hour range rendered by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleWindow {
    start_hour: u8,
    end_hour: u8,
}

impl VisibleWindow {
    /// # Errors
    /// - `ValidationError::InvalidWindow` unless `start_hour < end_hour <= 24`.
    pub fn new(start_hour: u8, end_hour: u8) -> Result<Self, ValidationError> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(ValidationError::InvalidWindow {
                start_hour,
                end_hour,
            });
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    pub fn start_hour(&self) -> u8 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u8 {
        self.end_hour
    }

    /// Minute offset of the window top from midnight.
    pub fn origin_minutes(&self) -> i32 {
        i32::from(self.start_hour) * 60
    }

    pub fn total_minutes(&self) -> i32 {
        i32::from(self.end_hour - self.start_hour) * 60
    }

    /// Hour marks from `start_hour` to `end_hour` inclusive, as `HH:MM`.
    ///
    /// `24` is rendered as `24:00` since it only appears as the grid bottom.
    pub fn hour_labels(&self) -> Vec<String> {
        (self.start_hour..=self.end_hour)
            .map(|hour| format!("{hour:02}:00"))
            .collect()
    }
}

impl Default for VisibleWindow {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_START_HOUR,
            end_hour: DEFAULT_END_HOUR,
        }
    }
}

/// Render rectangle for one slot, as fractions of the window height.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotBlock {
    pub slot_id: SlotId,
    pub subject_id: SubjectId,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub top: f64,
    pub height: f64,
    /// Slot extends past at least one window bound.
    pub clipped: bool,
}

impl SlotBlock {
    pub fn top_percent(&self) -> f64 {
        self.top * 100.0
    }

    pub fn height_percent(&self) -> f64 {
        self.height * 100.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    pub day: Weekday,
    pub blocks: Vec<SlotBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayout {
    pub window: VisibleWindow,
    /// Always seven columns in `Weekday::ALL` order.
    pub days: Vec<DayColumn>,
}

impl WeekLayout {
    pub fn day(&self, day: Weekday) -> &DayColumn {
        &self.days[day.index()]
    }

    pub fn block_count(&self) -> usize {
        self.days.iter().map(|column| column.blocks.len()).sum()
    }
}

/// Lays out all slots into seven day columns.
pub fn layout_week<'a>(
    slots: impl IntoIterator<Item = &'a Slot>,
    window: &VisibleWindow,
) -> WeekLayout {
    let mut buckets: Vec<Vec<&Slot>> = vec![Vec::new(); Weekday::ALL.len()];
    for slot in slots {
        buckets[slot.day.index()].push(slot);
    }

    let days = Weekday::ALL
        .iter()
        .zip(buckets)
        .map(|(day, bucket)| build_column(*day, bucket, window))
        .collect();

    WeekLayout {
        window: *window,
        days,
    }
}

/// Lays out one day; slots on other days are ignored.
pub fn layout_day<'a>(
    slots: impl IntoIterator<Item = &'a Slot>,
    day: Weekday,
    window: &VisibleWindow,
) -> DayColumn {
    let bucket = slots.into_iter().filter(|slot| slot.day == day).collect();
    build_column(day, bucket, window)
}

/// Computes `(top, height)` fractions for a time range inside `window`.
///
/// The start is clamped to the window top and the end to the window bottom.
/// A range entirely outside the window gets the minimum visible height; its
/// `top` is `0` before the window and past `1` after it.
pub fn block_geometry(start: TimeOfDay, end: TimeOfDay, window: &VisibleWindow) -> (f64, f64) {
    let total = window.total_minutes();
    let origin = window.origin_minutes();
    let clamped_start = (i32::from(start.minutes()) - origin).max(0);
    let clamped_end = (i32::from(end.minutes()) - origin).min(total);

    let total = f64::from(total);
    let top = f64::from(clamped_start) / total;
    let height = (f64::from(clamped_end - clamped_start) / total).max(MIN_VISIBLE_FRACTION);
    (top, height)
}

fn build_column(day: Weekday, mut bucket: Vec<&Slot>, window: &VisibleWindow) -> DayColumn {
    // Stable sort keeps insertion order among equal starts.
    bucket.sort_by_key(|slot| slot.start);

    let origin = window.origin_minutes();
    let bottom = origin + window.total_minutes();
    let blocks = bucket
        .into_iter()
        .map(|slot| {
            let (top, height) = block_geometry(slot.start, slot.end, window);
            SlotBlock {
                slot_id: slot.id,
                subject_id: slot.subject_id,
                start: slot.start,
                end: slot.end,
                top,
                height,
                clipped: i32::from(slot.start.minutes()) < origin
                    || i32::from(slot.end.minutes()) > bottom,
            }
        })
        .collect();

    DayColumn { day, blocks }
}
