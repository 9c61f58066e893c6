//! Handlers for onboarding progress, step validation, and plan limits.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use serde::Deserialize;

use medera_core::error::CoreError;
use medera_core::limits::evaluate_limit;
use medera_core::plan::{EntityKind, PlanType};
use medera_core::progress::ProgressState;
use medera_core::steps::{
    self, cascade_skipped_steps, evaluate_dependencies, OnboardingStep,
};
use medera_core::types::DbId;
use medera_db::models::step_progress::{MarkStepComplete, StepProgress, UpdateCurrentStep};
use medera_db::models::subscription::Subscription;
use medera_db::repositories::{
    ClinicRepo, ComplexRepo, OrganizationRepo, StepProgressRepo, SubscriptionRepo,
};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters and request bodies
// ---------------------------------------------------------------------------

/// Tenant selector shared by the progress endpoints.
#[derive(Debug, Deserialize)]
pub struct TenantParams {
    pub tenant_id: DbId,
}

/// Body for starting onboarding.
#[derive(Debug, Deserialize)]
pub struct StartOnboarding {
    pub tenant_id: DbId,
}

/// Body for step-dependency validation and single-step skips.
#[derive(Debug, Deserialize)]
pub struct StepRequest {
    pub step: String,
}

/// Selector for a plan-limit check.
#[derive(Debug, Deserialize)]
pub struct PlanLimitParams {
    pub subscription_id: DbId,
    pub entity_kind: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that a tenant has a progress row, returning the full row.
async fn ensure_progress_exists(
    pool: &sqlx::PgPool,
    tenant_id: DbId,
) -> AppResult<StepProgress> {
    StepProgressRepo::find_by_tenant(pool, tenant_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "StepProgress",
                id: tenant_id,
            })
        })
}

/// Look up the tenant's subscription, which carries the plan type.
async fn ensure_subscription_for_tenant(
    pool: &sqlx::PgPool,
    tenant_id: DbId,
) -> AppResult<Subscription> {
    SubscriptionRepo::find_by_tenant(pool, tenant_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Subscription",
                id: tenant_id,
            })
        })
}

/// Write a full progress state back in a single UPDATE.
async fn persist_state(
    pool: &sqlx::PgPool,
    tenant_id: DbId,
    state: &ProgressState,
) -> AppResult<StepProgress> {
    let (current, completed, skipped) = state.to_parts();
    StepProgressRepo::save_state(pool, tenant_id, current, &completed, &skipped)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "StepProgress",
                id: tenant_id,
            })
        })
}

// ---------------------------------------------------------------------------
// POST /onboarding/progress/start
// ---------------------------------------------------------------------------

/// Start onboarding for a tenant.
///
/// Creates the progress row positioned at the plan's initial step. Idempotent:
/// if the tenant already has a row, it is returned unchanged.
pub async fn start_onboarding(
    State(state): State<AppState>,
    Json(body): Json<StartOnboarding>,
) -> AppResult<impl IntoResponse> {
    if let Some(existing) = StepProgressRepo::find_by_tenant(&state.pool, body.tenant_id).await? {
        return Ok((StatusCode::OK, Json(DataResponse { data: existing })));
    }

    let subscription = ensure_subscription_for_tenant(&state.pool, body.tenant_id).await?;
    let plan = PlanType::from_str_db(&subscription.plan_type).map_err(AppError::Core)?;
    let initial = steps::initial_step(plan);

    let progress = StepProgressRepo::create(
        &state.pool,
        body.tenant_id,
        subscription.id,
        initial.as_str(),
    )
    .await?;

    tracing::info!(
        tenant_id = body.tenant_id,
        plan_type = plan.as_str(),
        initial_step = initial.as_str(),
        "Onboarding started"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: progress })))
}

// ---------------------------------------------------------------------------
// GET /onboarding/progress
// ---------------------------------------------------------------------------

/// Load a tenant's onboarding progress.
pub async fn get_progress(
    State(state): State<AppState>,
    Query(params): Query<TenantParams>,
) -> AppResult<impl IntoResponse> {
    let progress = ensure_progress_exists(&state.pool, params.tenant_id).await?;
    Ok(Json(DataResponse { data: progress }))
}

// ---------------------------------------------------------------------------
// PUT /onboarding/progress/current-step
// ---------------------------------------------------------------------------

/// Move the wizard cursor to a new step without touching the step sets.
pub async fn update_current_step(
    State(state): State<AppState>,
    Query(params): Query<TenantParams>,
    Json(body): Json<UpdateCurrentStep>,
) -> AppResult<impl IntoResponse> {
    let step = OnboardingStep::from_str_db(&body.step).map_err(AppError::Core)?;

    let progress =
        StepProgressRepo::update_current_step(&state.pool, params.tenant_id, step.as_str())
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::NotFound {
                    entity: "StepProgress",
                    id: params.tenant_id,
                })
            })?;

    Ok(Json(DataResponse { data: progress }))
}

// ---------------------------------------------------------------------------
// POST /onboarding/progress/complete
// ---------------------------------------------------------------------------

/// Mark a step completed. Idempotent: completing a step twice, or completing
/// a previously skipped step, leaves the sets consistent.
pub async fn complete_step(
    State(state): State<AppState>,
    Query(params): Query<TenantParams>,
    Json(body): Json<MarkStepComplete>,
) -> AppResult<impl IntoResponse> {
    let step = OnboardingStep::from_str_db(&body.step).map_err(AppError::Core)?;

    let row = ensure_progress_exists(&state.pool, params.tenant_id).await?;
    let mut progress = row.to_state().map_err(AppError::Core)?;
    progress.mark_complete(step);

    let mut saved = persist_state(&state.pool, params.tenant_id, &progress).await?;

    if let Some(step_data) = &body.step_data {
        let mut map = serde_json::Map::new();
        map.insert(step.as_str().to_string(), step_data.clone());
        let payload = serde_json::Value::Object(map);
        if let Some(merged) =
            StepProgressRepo::merge_step_data(&state.pool, params.tenant_id, &payload).await?
        {
            saved = merged;
        }
    }

    tracing::info!(
        tenant_id = params.tenant_id,
        step = step.as_str(),
        "Step marked complete"
    );

    Ok(Json(DataResponse { data: saved }))
}

// ---------------------------------------------------------------------------
// POST /onboarding/steps/validate
// ---------------------------------------------------------------------------

/// Check whether a step's prerequisites are satisfied. Read-only.
pub async fn validate_step(
    State(state): State<AppState>,
    Query(params): Query<TenantParams>,
    Json(body): Json<StepRequest>,
) -> AppResult<impl IntoResponse> {
    let step = OnboardingStep::from_str_db(&body.step).map_err(AppError::Core)?;

    let row = ensure_progress_exists(&state.pool, params.tenant_id).await?;
    let progress = row.to_state().map_err(AppError::Core)?;

    let result = evaluate_dependencies(step, progress.completed(), progress.skipped());
    Ok(Json(DataResponse { data: result }))
}

// ---------------------------------------------------------------------------
// POST /onboarding/progress/skip
// ---------------------------------------------------------------------------

/// Mark a step skipped, expanding to the cascade group where one applies.
///
/// Skipping `complex-overview` is the gated case: it is only permitted on
/// the company plan and marks the whole cascade in one write.
pub async fn skip_step(
    State(state): State<AppState>,
    Query(params): Query<TenantParams>,
    Json(body): Json<StepRequest>,
) -> AppResult<impl IntoResponse> {
    let step = OnboardingStep::from_str_db(&body.step).map_err(AppError::Core)?;

    if step == OnboardingStep::ComplexOverview {
        let subscription = ensure_subscription_for_tenant(&state.pool, params.tenant_id).await?;
        let plan = PlanType::from_str_db(&subscription.plan_type).map_err(AppError::Core)?;
        if !steps::can_skip_complex(plan) {
            return Err(AppError::Core(CoreError::Forbidden(format!(
                "The {} plan cannot skip the complex stage",
                plan.as_str()
            ))));
        }
    }

    let row = ensure_progress_exists(&state.pool, params.tenant_id).await?;
    let mut progress = row.to_state().map_err(AppError::Core)?;
    for skipped in cascade_skipped_steps(step) {
        progress.mark_skipped(skipped);
    }

    let saved = persist_state(&state.pool, params.tenant_id, &progress).await?;
    Ok(Json(DataResponse { data: saved }))
}

// ---------------------------------------------------------------------------
// POST /onboarding/skip-complex
// ---------------------------------------------------------------------------

/// Skip the entire complex stage and land the tenant on the dashboard.
///
/// Only the company plan may do this. The six-step cascade and the cursor
/// move are persisted as one UPDATE, so a concurrent reader never observes
/// a half-skipped wizard.
pub async fn skip_complex(
    State(state): State<AppState>,
    Query(params): Query<TenantParams>,
) -> AppResult<impl IntoResponse> {
    let subscription = ensure_subscription_for_tenant(&state.pool, params.tenant_id).await?;
    let plan = PlanType::from_str_db(&subscription.plan_type).map_err(AppError::Core)?;

    if !steps::can_skip_complex(plan) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "The {} plan cannot skip the complex stage",
            plan.as_str()
        ))));
    }

    let row = ensure_progress_exists(&state.pool, params.tenant_id).await?;
    let mut progress = row.to_state().map_err(AppError::Core)?;
    for skipped in cascade_skipped_steps(OnboardingStep::ComplexOverview) {
        progress.mark_skipped(skipped);
    }
    progress.set_current(OnboardingStep::Dashboard);

    let saved = persist_state(&state.pool, params.tenant_id, &progress).await?;

    tracing::info!(
        tenant_id = params.tenant_id,
        plan_type = plan.as_str(),
        "Complex stage skipped; tenant moved to dashboard"
    );

    Ok(Json(DataResponse { data: saved }))
}

// ---------------------------------------------------------------------------
// GET /onboarding/plan-limit
// ---------------------------------------------------------------------------

/// Evaluate whether a subscription can create another entity of a kind.
///
/// The count excludes soft-deleted rows, so deleting an entity frees its
/// slot. The verdict is advisory outside a transaction; creation paths must
/// re-check inside one.
pub async fn plan_limit(
    State(state): State<AppState>,
    Query(params): Query<PlanLimitParams>,
) -> AppResult<impl IntoResponse> {
    let subscription = SubscriptionRepo::find_by_id(&state.pool, params.subscription_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Subscription",
                id: params.subscription_id,
            })
        })?;

    let plan = PlanType::from_str_db(&subscription.plan_type).map_err(AppError::Core)?;
    let kind = EntityKind::from_str_db(&params.entity_kind).map_err(AppError::Core)?;

    let mut conn = state.pool.acquire().await?;
    let current_count = match kind {
        EntityKind::Organization => {
            OrganizationRepo::count_by_subscription(&mut conn, subscription.id).await?
        }
        EntityKind::Complex => {
            ComplexRepo::count_by_subscription(&mut conn, subscription.id).await?
        }
        EntityKind::Clinic => {
            ClinicRepo::count_by_subscription(&mut conn, subscription.id).await?
        }
    };

    let result = evaluate_limit(plan, kind, current_count);
    Ok(Json(DataResponse { data: result }))
}
