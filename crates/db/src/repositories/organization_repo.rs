//! Repository for the `organizations` table.

use medera_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::organization::Organization;

/// Column list for `organizations` queries.
const COLUMNS: &str = "id, subscription_id, name, deleted_at, created_at, updated_at";

/// Provides CRUD operations for organizations.
pub struct OrganizationRepo;

impl OrganizationRepo {
    /// Insert a new organization within a caller-owned transaction, so the
    /// count-then-create sequence commits atomically.
    pub async fn create(
        conn: &mut PgConnection,
        subscription_id: DbId,
        name: &str,
    ) -> Result<Organization, sqlx::Error> {
        let query = format!(
            "INSERT INTO organizations (subscription_id, name) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        let organization = sqlx::query_as::<_, Organization>(&query)
            .bind(subscription_id)
            .bind(name)
            .fetch_one(conn)
            .await?;
        tracing::debug!(
            organization_id = organization.id,
            subscription_id,
            "Organization row inserted"
        );
        Ok(organization)
    }

    /// Find a non-deleted organization by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Organization>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM organizations WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Organization>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the organization owned by a subscription, if any.
    pub async fn find_by_subscription(
        pool: &PgPool,
        subscription_id: DbId,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM organizations \
             WHERE subscription_id = $1 AND deleted_at IS NULL \
             ORDER BY id \
             LIMIT 1"
        );
        sqlx::query_as::<_, Organization>(&query)
            .bind(subscription_id)
            .fetch_optional(pool)
            .await
    }

    /// Count non-deleted organizations owned by a subscription. Runs on a
    /// caller-owned connection so creation paths can count inside their
    /// transaction.
    pub async fn count_by_subscription(
        conn: &mut PgConnection,
        subscription_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM organizations \
             WHERE subscription_id = $1 AND deleted_at IS NULL",
        )
        .bind(subscription_id)
        .fetch_one(conn)
        .await?;
        Ok(row.0)
    }
}
