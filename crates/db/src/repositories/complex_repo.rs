//! Repository for the `complexes` table.

use medera_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::complex::Complex;

/// Column list for `complexes` queries.
const COLUMNS: &str =
    "id, subscription_id, organization_id, name, deleted_at, created_at, updated_at";

/// Provides CRUD operations for complexes.
pub struct ComplexRepo;

impl ComplexRepo {
    /// Insert a new complex within a caller-owned transaction, so the
    /// count-then-create sequence commits atomically.
    pub async fn create(
        conn: &mut PgConnection,
        subscription_id: DbId,
        organization_id: Option<DbId>,
        name: &str,
    ) -> Result<Complex, sqlx::Error> {
        let query = format!(
            "INSERT INTO complexes (subscription_id, organization_id, name) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let complex = sqlx::query_as::<_, Complex>(&query)
            .bind(subscription_id)
            .bind(organization_id)
            .bind(name)
            .fetch_one(conn)
            .await?;
        tracing::debug!(
            complex_id = complex.id,
            subscription_id,
            "Complex row inserted"
        );
        Ok(complex)
    }

    /// Find a non-deleted complex by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Complex>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM complexes WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Complex>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count non-deleted complexes owned by a subscription. Runs on a
    /// caller-owned connection so creation paths can count inside their
    /// transaction.
    pub async fn count_by_subscription(
        conn: &mut PgConnection,
        subscription_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM complexes \
             WHERE subscription_id = $1 AND deleted_at IS NULL",
        )
        .bind(subscription_id)
        .fetch_one(conn)
        .await?;
        Ok(row.0)
    }
}
