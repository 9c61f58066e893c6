//! Repository for the `clinics` table.

use medera_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::clinic::Clinic;

/// Column list for `clinics` queries.
const COLUMNS: &str =
    "id, subscription_id, complex_id, name, status, deleted_at, created_at, updated_at";

/// Provides CRUD operations for clinics.
pub struct ClinicRepo;

impl ClinicRepo {
    /// Insert a new clinic (status defaults to `active`) within a
    /// caller-owned transaction, so the count-then-create sequence commits
    /// atomically.
    pub async fn create(
        conn: &mut PgConnection,
        subscription_id: DbId,
        complex_id: Option<DbId>,
        name: &str,
    ) -> Result<Clinic, sqlx::Error> {
        let query = format!(
            "INSERT INTO clinics (subscription_id, complex_id, name) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let clinic = sqlx::query_as::<_, Clinic>(&query)
            .bind(subscription_id)
            .bind(complex_id)
            .bind(name)
            .fetch_one(conn)
            .await?;
        tracing::debug!(clinic_id = clinic.id, subscription_id, "Clinic row inserted");
        Ok(clinic)
    }

    /// Find a non-deleted clinic by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Clinic>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clinics WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Clinic>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a non-deleted clinic by ID, locking the row for the duration of
    /// the surrounding transaction. Used by the status-transition sequence
    /// so the check-then-transfer steps see a stable row.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Clinic>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM clinics \
             WHERE id = $1 AND deleted_at IS NULL \
             FOR UPDATE"
        );
        sqlx::query_as::<_, Clinic>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Update a clinic's status within a caller-owned transaction.
    pub async fn update_status(
        conn: &mut PgConnection,
        id: DbId,
        status: &str,
    ) -> Result<Option<Clinic>, sqlx::Error> {
        let query = format!(
            "UPDATE clinics SET status = $2, updated_at = now() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Clinic>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(conn)
            .await
    }

    /// Count non-deleted clinics owned by a subscription. Runs on a
    /// caller-owned connection so creation paths can count inside their
    /// transaction.
    pub async fn count_by_subscription(
        conn: &mut PgConnection,
        subscription_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM clinics \
             WHERE subscription_id = $1 AND deleted_at IS NULL",
        )
        .bind(subscription_id)
        .fetch_one(conn)
        .await?;
        Ok(row.0)
    }
}
