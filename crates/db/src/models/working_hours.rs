//! Working-hours entity model and DTOs.

use medera_core::error::CoreError;
use medera_core::types::{DbId, Timestamp};
use medera_core::working_hours::{DayOfWeek, DaySchedule};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `working_hours` table, keyed by
/// `(entity_type, entity_id, day_of_week)`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkingHoursRecord {
    pub id: DbId,
    pub entity_type: String,
    pub entity_id: DbId,
    pub day_of_week: String,
    pub is_working_day: bool,
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
    pub break_start_time: Option<String>,
    pub break_end_time: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl WorkingHoursRecord {
    /// Reshape the row into the core day-schedule vocabulary.
    pub fn to_day_schedule(&self) -> Result<DaySchedule, CoreError> {
        Ok(DaySchedule {
            day_of_week: DayOfWeek::from_str_db(&self.day_of_week)?,
            is_working_day: self.is_working_day,
            opening_time: self.opening_time.clone(),
            closing_time: self.closing_time.clone(),
            break_start_time: self.break_start_time.clone(),
            break_end_time: self.break_end_time.clone(),
        })
    }
}

/// Reshape a full set of rows, preserving row order.
pub fn to_day_schedules(rows: &[WorkingHoursRecord]) -> Result<Vec<DaySchedule>, CoreError> {
    rows.iter().map(WorkingHoursRecord::to_day_schedule).collect()
}
