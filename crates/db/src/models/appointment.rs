//! Appointment entity model.
//!
//! Appointments are external to the rule engine: read for conflict
//! detection, mutated only to flag `requires_rescheduling`.

use chrono::{NaiveDate, NaiveTime};
use medera_core::types::{DbId, Timestamp};
use medera_core::working_hours::AppointmentSlot;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `appointments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Appointment {
    pub id: DbId,
    pub clinic_id: DbId,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub status: String,
    pub requires_rescheduling: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Appointment {
    /// Project the row into the slot shape conflict validation consumes.
    pub fn to_slot(&self) -> AppointmentSlot {
        AppointmentSlot {
            id: self.id,
            date: self.appointment_date,
            time: self.appointment_time,
        }
    }
}
