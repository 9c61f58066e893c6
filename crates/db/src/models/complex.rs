//! Medical complex entity model and DTOs.

use medera_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `complexes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Complex {
    pub id: DbId,
    pub subscription_id: DbId,
    pub organization_id: Option<DbId>,
    pub name: String,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new complex.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComplex {
    pub subscription_id: DbId,
    pub organization_id: Option<DbId>,
    pub name: String,
}
