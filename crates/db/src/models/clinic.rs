//! Clinic entity model and DTOs.

use medera_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `clinics` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Clinic {
    pub id: DbId,
    pub subscription_id: DbId,
    pub complex_id: Option<DbId>,
    pub name: String,
    pub status: String,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new clinic.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClinic {
    pub subscription_id: DbId,
    pub complex_id: Option<DbId>,
    pub name: String,
}
