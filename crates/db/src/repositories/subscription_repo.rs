//! Repository for the `subscriptions` table.

use medera_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::subscription::Subscription;

/// Column list for `subscriptions` queries.
const COLUMNS: &str = "id, tenant_id, plan_type, created_at, updated_at";

/// Read-only access to subscriptions.
pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// Find a subscription by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Subscription>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subscriptions WHERE id = $1");
        sqlx::query_as::<_, Subscription>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a subscription by ID, locking the row for the duration of the
    /// surrounding transaction. Entity-creation paths take this lock so
    /// concurrent creations under the same subscription serialize and the
    /// plan-limit count each of them sees is the count it commits against.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subscriptions WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Subscription>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Find the subscription held by a tenant.
    pub async fn find_by_tenant(
        pool: &PgPool,
        tenant_id: DbId,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subscriptions WHERE tenant_id = $1");
        sqlx::query_as::<_, Subscription>(&query)
            .bind(tenant_id)
            .fetch_optional(pool)
            .await
    }
}
