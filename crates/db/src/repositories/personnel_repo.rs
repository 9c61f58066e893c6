//! Repository for the `doctors` and `staff_members` tables.

use medera_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::personnel::Doctor;

/// Column list for `doctors` queries.
const DOCTOR_COLUMNS: &str = "id, clinic_id, name, is_active, created_at, updated_at";

/// Lookup and bulk-reassignment of clinic personnel.
pub struct PersonnelRepo;

impl PersonnelRepo {
    /// Active doctors assigned to a clinic.
    pub async fn list_active_doctors(
        pool: &PgPool,
        clinic_id: DbId,
    ) -> Result<Vec<Doctor>, sqlx::Error> {
        let query = format!(
            "SELECT {DOCTOR_COLUMNS} FROM doctors \
             WHERE clinic_id = $1 AND is_active \
             ORDER BY id"
        );
        sqlx::query_as::<_, Doctor>(&query)
            .bind(clinic_id)
            .fetch_all(pool)
            .await
    }

    /// Count active doctors within a caller-owned transaction.
    pub async fn count_active_doctors(
        conn: &mut PgConnection,
        clinic_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM doctors WHERE clinic_id = $1 AND is_active")
                .bind(clinic_id)
                .fetch_one(conn)
                .await?;
        Ok(row.0)
    }

    /// Move every ACTIVE doctor from one clinic to another. Inactive doctors
    /// are left untouched. Returns the number of doctors moved.
    pub async fn reassign_active_doctors(
        conn: &mut PgConnection,
        from_clinic_id: DbId,
        to_clinic_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE doctors SET clinic_id = $2, updated_at = now() \
             WHERE clinic_id = $1 AND is_active",
        )
        .bind(from_clinic_id)
        .bind(to_clinic_id)
        .execute(conn)
        .await?;
        tracing::debug!(
            from_clinic_id,
            to_clinic_id,
            moved = result.rows_affected(),
            "Active doctors reassigned"
        );
        Ok(result.rows_affected())
    }

    /// Move every ACTIVE staff member from one clinic to another. Returns the
    /// number of staff moved.
    pub async fn reassign_active_staff(
        conn: &mut PgConnection,
        from_clinic_id: DbId,
        to_clinic_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE staff_members SET clinic_id = $2, updated_at = now() \
             WHERE clinic_id = $1 AND is_active",
        )
        .bind(from_clinic_id)
        .bind(to_clinic_id)
        .execute(conn)
        .await?;
        tracing::debug!(
            from_clinic_id,
            to_clinic_id,
            moved = result.rows_affected(),
            "Active staff reassigned"
        );
        Ok(result.rows_affected())
    }
}
