//! Step-progress entity model and DTOs.

use medera_core::error::CoreError;
use medera_core::progress::ProgressState;
use medera_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `step_progress` table. One per tenant; created on first
/// onboarding interaction, never deleted during onboarding.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StepProgress {
    pub id: DbId,
    pub tenant_id: DbId,
    pub subscription_id: DbId,
    pub current_step: String,
    pub completed_steps: Vec<String>,
    pub skipped_steps: Vec<String>,
    pub step_data: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StepProgress {
    /// Parse the persisted step arrays into the core progress state,
    /// validating every token and reconciling any completed/skipped overlap.
    pub fn to_state(&self) -> Result<ProgressState, CoreError> {
        ProgressState::from_parts(
            &self.current_step,
            &self.completed_steps,
            &self.skipped_steps,
        )
    }
}

/// DTO for setting the wizard's current step.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCurrentStep {
    pub step: String,
}

/// DTO for marking a step completed.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkStepComplete {
    pub step: String,
    /// Optional per-step payload merged into the cache.
    #[serde(default)]
    pub step_data: Option<serde_json::Value>,
}
