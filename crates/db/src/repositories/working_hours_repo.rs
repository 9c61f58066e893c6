//! Repository for the `working_hours` table.

use medera_core::types::DbId;
use medera_core::working_hours::DaySchedule;
use sqlx::{PgConnection, PgPool};

use crate::models::working_hours::WorkingHoursRecord;

/// Column list for `working_hours` queries.
const COLUMNS: &str = "id, entity_type, entity_id, day_of_week, is_working_day, \
     opening_time, closing_time, break_start_time, break_end_time, created_at, updated_at";

/// Fixed row order for listings (Postgres has no weekday sort on TEXT).
const DAY_ORDER: &str = "array_position(\
     ARRAY['monday','tuesday','wednesday','thursday','friday','saturday','sunday'], day_of_week)";

/// Provides CRUD operations for per-day working-hours schedules.
pub struct WorkingHoursRepo;

impl WorkingHoursRepo {
    /// List an entity's schedule rows, ordered monday..sunday.
    pub async fn list_for_entity(
        pool: &PgPool,
        entity_type: &str,
        entity_id: DbId,
    ) -> Result<Vec<WorkingHoursRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM working_hours \
             WHERE entity_type = $1 AND entity_id = $2 \
             ORDER BY {DAY_ORDER}"
        );
        sqlx::query_as::<_, WorkingHoursRecord>(&query)
            .bind(entity_type)
            .bind(entity_id)
            .fetch_all(pool)
            .await
    }

    /// Replace an entity's full schedule within a caller-owned transaction.
    pub async fn replace_schedule(
        conn: &mut PgConnection,
        entity_type: &str,
        entity_id: DbId,
        schedule: &[DaySchedule],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM working_hours WHERE entity_type = $1 AND entity_id = $2")
            .bind(entity_type)
            .bind(entity_id)
            .execute(&mut *conn)
            .await?;

        for day in schedule {
            sqlx::query(
                "INSERT INTO working_hours \
                 (entity_type, entity_id, day_of_week, is_working_day, \
                  opening_time, closing_time, break_start_time, break_end_time) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(entity_type)
            .bind(entity_id)
            .bind(day.day_of_week.as_str())
            .bind(day.is_working_day)
            .bind(&day.opening_time)
            .bind(&day.closing_time)
            .bind(&day.break_start_time)
            .bind(&day.break_end_time)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }
}
