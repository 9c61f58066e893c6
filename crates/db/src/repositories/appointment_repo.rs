//! Repository for the `appointments` table.
//!
//! The rule engine only reads bookings and flags them for rescheduling; it
//! never creates, moves, or cancels them.

use medera_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::appointment::Appointment;

/// Column list for `appointments` queries.
const COLUMNS: &str = "id, clinic_id, appointment_date, appointment_time, status, \
     requires_rescheduling, created_at, updated_at";

/// Read/flag access to appointment bookings.
pub struct AppointmentRepo;

impl AppointmentRepo {
    /// Future non-cancelled bookings for a clinic, soonest first.
    pub async fn future_for_clinic(
        pool: &PgPool,
        clinic_id: DbId,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM appointments \
             WHERE clinic_id = $1 AND appointment_date >= CURRENT_DATE \
               AND status <> 'cancelled' \
             ORDER BY appointment_date, appointment_time"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(clinic_id)
            .fetch_all(pool)
            .await
    }

    /// Count future non-cancelled bookings within a caller-owned transaction.
    pub async fn count_future_for_clinic(
        conn: &mut PgConnection,
        clinic_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM appointments \
             WHERE clinic_id = $1 AND appointment_date >= CURRENT_DATE \
               AND status <> 'cancelled'",
        )
        .bind(clinic_id)
        .fetch_one(conn)
        .await?;
        Ok(row.0)
    }

    /// Flag every future non-cancelled booking of a clinic as requiring
    /// rescheduling. Returns the number of bookings flagged.
    pub async fn flag_rescheduling_for_clinic(
        conn: &mut PgConnection,
        clinic_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE appointments \
             SET requires_rescheduling = true, updated_at = now() \
             WHERE clinic_id = $1 AND appointment_date >= CURRENT_DATE \
               AND status <> 'cancelled'",
        )
        .bind(clinic_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }
}
