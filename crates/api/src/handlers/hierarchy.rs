//! Handlers for creating hierarchy entities (organizations, complexes,
//! clinics) under a subscription's plan limits.
//!
//! Each creation runs count-then-create inside one transaction, with the
//! subscription row locked first. Concurrent creations under the same
//! subscription therefore serialize, and the count a request validates
//! against is the count it commits against.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use sqlx::PgConnection;

use medera_core::error::CoreError;
use medera_core::limits::evaluate_limit;
use medera_core::plan::{EntityKind, PlanType};
use medera_core::types::DbId;
use medera_db::models::clinic::CreateClinic;
use medera_db::models::complex::CreateComplex;
use medera_db::models::organization::CreateOrganization;
use medera_db::repositories::{ClinicRepo, ComplexRepo, OrganizationRepo, SubscriptionRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Lock the subscription row and resolve its plan type.
async fn lock_subscription(conn: &mut PgConnection, id: DbId) -> AppResult<PlanType> {
    let subscription = SubscriptionRepo::find_by_id_for_update(conn, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Subscription",
                id,
            })
        })?;
    PlanType::from_str_db(&subscription.plan_type).map_err(AppError::Core)
}

/// Enforce the plan cap against a count taken in the same transaction.
fn ensure_capacity(plan: PlanType, kind: EntityKind, current_count: i64) -> Result<(), CoreError> {
    let verdict = evaluate_limit(plan, kind, current_count);
    if verdict.can_create {
        Ok(())
    } else {
        Err(CoreError::LimitExceeded {
            entity: kind.as_str(),
            current: current_count,
            max: verdict.max_allowed.unwrap_or(0),
            plan,
        })
    }
}

// ---------------------------------------------------------------------------
// POST /organizations
// ---------------------------------------------------------------------------

/// Create an organization if the subscription's plan still has room.
pub async fn create_organization(
    State(state): State<AppState>,
    Json(body): Json<CreateOrganization>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;

    let plan = lock_subscription(&mut *tx, body.subscription_id).await?;
    let count = OrganizationRepo::count_by_subscription(&mut *tx, body.subscription_id).await?;
    ensure_capacity(plan, EntityKind::Organization, count).map_err(AppError::Core)?;

    let organization =
        OrganizationRepo::create(&mut *tx, body.subscription_id, &body.name).await?;

    tx.commit().await?;

    tracing::info!(
        organization_id = organization.id,
        subscription_id = body.subscription_id,
        plan_type = plan.as_str(),
        "Organization created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: organization })))
}

// ---------------------------------------------------------------------------
// POST /complexes
// ---------------------------------------------------------------------------

/// Create a complex if the subscription's plan still has room.
///
/// A supplied parent organization must exist; the company plan links its
/// complexes under the organization, the complex plan leaves the parent
/// unset.
pub async fn create_complex(
    State(state): State<AppState>,
    Json(body): Json<CreateComplex>,
) -> AppResult<impl IntoResponse> {
    if let Some(organization_id) = body.organization_id {
        OrganizationRepo::find_by_id(&state.pool, organization_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::NotFound {
                    entity: "Organization",
                    id: organization_id,
                })
            })?;
    }

    let mut tx = state.pool.begin().await?;

    let plan = lock_subscription(&mut *tx, body.subscription_id).await?;
    let count = ComplexRepo::count_by_subscription(&mut *tx, body.subscription_id).await?;
    ensure_capacity(plan, EntityKind::Complex, count).map_err(AppError::Core)?;

    let complex =
        ComplexRepo::create(&mut *tx, body.subscription_id, body.organization_id, &body.name)
            .await?;

    tx.commit().await?;

    tracing::info!(
        complex_id = complex.id,
        subscription_id = body.subscription_id,
        plan_type = plan.as_str(),
        "Complex created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: complex })))
}

// ---------------------------------------------------------------------------
// POST /clinics
// ---------------------------------------------------------------------------

/// Create a clinic if the subscription's plan still has room.
///
/// A supplied parent complex must exist; the clinic plan leaves the parent
/// unset.
pub async fn create_clinic(
    State(state): State<AppState>,
    Json(body): Json<CreateClinic>,
) -> AppResult<impl IntoResponse> {
    if let Some(complex_id) = body.complex_id {
        ComplexRepo::find_by_id(&state.pool, complex_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::NotFound {
                    entity: "Complex",
                    id: complex_id,
                })
            })?;
    }

    let mut tx = state.pool.begin().await?;

    let plan = lock_subscription(&mut *tx, body.subscription_id).await?;
    let count = ClinicRepo::count_by_subscription(&mut *tx, body.subscription_id).await?;
    ensure_capacity(plan, EntityKind::Clinic, count).map_err(AppError::Core)?;

    let clinic =
        ClinicRepo::create(&mut *tx, body.subscription_id, body.complex_id, &body.name).await?;

    tx.commit().await?;

    tracing::info!(
        clinic_id = clinic.id,
        subscription_id = body.subscription_id,
        plan_type = plan.as_str(),
        "Clinic created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: clinic })))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
