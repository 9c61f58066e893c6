//! Subscription entity model.

use medera_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `subscriptions` table. Immutable once issued; read-only
/// input to the rule engine.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subscription {
    pub id: DbId,
    pub tenant_id: DbId,
    pub plan_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
