//! Repository for the `step_progress` table.

use medera_core::types::DbId;
use sqlx::PgPool;

use crate::models::step_progress::StepProgress;

/// Column list for `step_progress` queries.
const COLUMNS: &str = "id, tenant_id, subscription_id, current_step, completed_steps, \
     skipped_steps, step_data, created_at, updated_at";

/// Provides CRUD operations for tenant step progress.
pub struct StepProgressRepo;

impl StepProgressRepo {
    /// Insert a fresh progress row for a tenant, positioned at `initial_step`.
    pub async fn create(
        pool: &PgPool,
        tenant_id: DbId,
        subscription_id: DbId,
        initial_step: &str,
    ) -> Result<StepProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO step_progress (tenant_id, subscription_id, current_step) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StepProgress>(&query)
            .bind(tenant_id)
            .bind(subscription_id)
            .bind(initial_step)
            .fetch_one(pool)
            .await
    }

    /// Find a tenant's progress row.
    pub async fn find_by_tenant(
        pool: &PgPool,
        tenant_id: DbId,
    ) -> Result<Option<StepProgress>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM step_progress WHERE tenant_id = $1");
        sqlx::query_as::<_, StepProgress>(&query)
            .bind(tenant_id)
            .fetch_optional(pool)
            .await
    }

    /// Set the current step without touching the step sets.
    pub async fn update_current_step(
        pool: &PgPool,
        tenant_id: DbId,
        step: &str,
    ) -> Result<Option<StepProgress>, sqlx::Error> {
        let query = format!(
            "UPDATE step_progress SET current_step = $2, updated_at = now() \
             WHERE tenant_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StepProgress>(&query)
            .bind(tenant_id)
            .bind(step)
            .fetch_optional(pool)
            .await
    }

    /// Persist a full progress state (current step plus both step sets) in a
    /// single statement. The skip cascade relies on this being one UPDATE so
    /// no partial-failure state is ever visible to readers.
    pub async fn save_state(
        pool: &PgPool,
        tenant_id: DbId,
        current_step: &str,
        completed_steps: &[String],
        skipped_steps: &[String],
    ) -> Result<Option<StepProgress>, sqlx::Error> {
        let query = format!(
            "UPDATE step_progress \
             SET current_step = $2, completed_steps = $3, skipped_steps = $4, \
                 updated_at = now() \
             WHERE tenant_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StepProgress>(&query)
            .bind(tenant_id)
            .bind(current_step)
            .bind(completed_steps)
            .bind(skipped_steps)
            .fetch_optional(pool)
            .await
    }

    /// Merge a per-step payload into the step-data cache.
    pub async fn merge_step_data(
        pool: &PgPool,
        tenant_id: DbId,
        step_data: &serde_json::Value,
    ) -> Result<Option<StepProgress>, sqlx::Error> {
        let query = format!(
            "UPDATE step_progress \
             SET step_data = step_data || $2, updated_at = now() \
             WHERE tenant_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StepProgress>(&query)
            .bind(tenant_id)
            .bind(step_data)
            .fetch_optional(pool)
            .await
    }
}
