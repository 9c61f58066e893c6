//! Handlers for clinic status transitions.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use serde::{Deserialize, Serialize};

use medera_core::clinic_status::{
    check_transition, ClinicStatus, TransferDecision, TransferPlan,
};
use medera_core::error::CoreError;
use medera_core::types::DbId;
use medera_db::models::clinic::Clinic;
use medera_db::repositories::{AppointmentRepo, ClinicRepo, PersonnelRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request and response bodies
// ---------------------------------------------------------------------------

/// Body for a status transition. The transfer decision defaults to "no
/// transfer", which the rules reject when the clinic still has active
/// doctors or upcoming appointments.
#[derive(Debug, Deserialize)]
pub struct UpdateClinicStatus {
    pub status: String,
    #[serde(default)]
    pub transfer: TransferDecision,
}

/// Outcome of a completed transition, including what moved.
#[derive(Debug, Serialize)]
pub struct StatusTransitionOutcome {
    pub clinic: Clinic,
    pub doctors_transferred: u64,
    pub staff_transferred: u64,
    pub appointments_flagged: u64,
}

// ---------------------------------------------------------------------------
// GET /clinics/{id}/doctors
// ---------------------------------------------------------------------------

/// List the active doctors assigned to a clinic.
///
/// Callers planning a deactivation use this to see who a transfer would
/// move before submitting the status change.
pub async fn list_doctors(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ClinicRepo::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Clinic",
            id,
        })
    })?;

    let doctors = PersonnelRepo::list_active_doctors(&state.pool, id).await?;
    Ok(Json(DataResponse { data: doctors }))
}

// ---------------------------------------------------------------------------
// PUT /clinics/{id}/status
// ---------------------------------------------------------------------------

/// Transition a clinic's status, transferring personnel when required.
///
/// The whole read-check-write sequence runs in one transaction with the
/// clinic row locked, so the doctor and appointment counts the rules see
/// are the counts the transfer acts on.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateClinicStatus>,
) -> AppResult<impl IntoResponse> {
    let target = ClinicStatus::from_str_db(&body.status).map_err(AppError::Core)?;

    let mut tx = state.pool.begin().await?;

    let clinic = ClinicRepo::find_by_id_for_update(&mut *tx, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Clinic",
                id,
            })
        })?;
    let current = ClinicStatus::from_str_db(&clinic.status).map_err(AppError::Core)?;

    let assigned_doctors = PersonnelRepo::count_active_doctors(&mut *tx, id).await?;
    let upcoming_appointments = AppointmentRepo::count_future_for_clinic(&mut *tx, id).await?;

    let plan = check_transition(
        current,
        target,
        assigned_doctors,
        upcoming_appointments,
        &body.transfer,
    )
    .map_err(AppError::Core)?;

    let mut doctors_transferred = 0;
    let mut staff_transferred = 0;
    let mut appointments_flagged = 0;

    if let TransferPlan::Transfer {
        target_clinic_id,
        transfer_doctors,
        transfer_staff,
    } = plan
    {
        if target_clinic_id == id {
            return Err(AppError::Core(CoreError::Conflict(
                "Transfer target must be a different clinic".to_string(),
            )));
        }

        let target_clinic = ClinicRepo::find_by_id_for_update(&mut *tx, target_clinic_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::NotFound {
                    entity: "Clinic",
                    id: target_clinic_id,
                })
            })?;
        if target_clinic.status != ClinicStatus::Active.as_str() {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Transfer target clinic {target_clinic_id} is not active"
            ))));
        }

        if transfer_doctors {
            doctors_transferred =
                PersonnelRepo::reassign_active_doctors(&mut *tx, id, target_clinic_id).await?;
        }
        if transfer_staff {
            staff_transferred =
                PersonnelRepo::reassign_active_staff(&mut *tx, id, target_clinic_id).await?;
        }
        appointments_flagged = AppointmentRepo::flag_rescheduling_for_clinic(&mut *tx, id).await?;
    }

    let updated = ClinicRepo::update_status(&mut *tx, id, target.as_str())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Clinic",
                id,
            })
        })?;

    tx.commit().await?;

    tracing::info!(
        clinic_id = id,
        from = current.as_str(),
        to = target.as_str(),
        doctors_transferred,
        staff_transferred,
        appointments_flagged,
        "Clinic status updated"
    );

    Ok(Json(DataResponse {
        data: StatusTransitionOutcome {
            clinic: updated,
            doctors_transferred,
            staff_transferred,
            appointments_flagged,
        },
    }))
}
