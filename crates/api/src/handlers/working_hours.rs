//! Handlers for working-hours inheritance, validation, and persistence.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use serde::Deserialize;

use medera_core::error::CoreError;
use medera_core::plan::{EntityKind, PlanType};
use medera_core::types::DbId;
use medera_core::working_hours::{
    self, DaySchedule, InheritanceResult, InheritanceSource,
};
use medera_db::models::working_hours::to_day_schedules;
use medera_db::repositories::{
    AppointmentRepo, ClinicRepo, ComplexRepo, OrganizationRepo, SubscriptionRepo,
    WorkingHoursRepo,
};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters and request bodies
// ---------------------------------------------------------------------------

/// Selector for the inheritance endpoint. `clinic_id` is required on the
/// clinic plan, where the parent is found through the clinic's complex link.
#[derive(Debug, Deserialize)]
pub struct InheritedParams {
    pub subscription_id: DbId,
    pub clinic_id: Option<DbId>,
}

/// Body for validating a proposed clinic schedule.
#[derive(Debug, Deserialize)]
pub struct ValidateScheduleRequest {
    pub clinic_id: DbId,
    pub schedule: Vec<DaySchedule>,
}

/// Body for saving an entity's schedule.
#[derive(Debug, Deserialize)]
pub struct SaveScheduleRequest {
    pub entity_kind: String,
    pub entity_id: DbId,
    pub schedule: Vec<DaySchedule>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load an entity's stored hours as core day schedules.
async fn load_schedule(
    pool: &sqlx::PgPool,
    entity_kind: EntityKind,
    entity_id: DbId,
) -> AppResult<Vec<DaySchedule>> {
    let rows = WorkingHoursRepo::list_for_entity(pool, entity_kind.as_str(), entity_id).await?;
    to_day_schedules(&rows).map_err(AppError::Core)
}

/// Resolve the complex a clinic belongs to, failing when the clinic is not
/// linked to one.
async fn parent_complex_of(
    pool: &sqlx::PgPool,
    clinic_id: DbId,
) -> AppResult<medera_db::models::complex::Complex> {
    let clinic = ClinicRepo::find_by_id(pool, clinic_id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Clinic",
            id: clinic_id,
        })
    })?;

    let complex_id = clinic.complex_id.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(format!(
            "Clinic {clinic_id} is not linked to a complex"
        )))
    })?;

    ComplexRepo::find_by_id(pool, complex_id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Complex",
            id: complex_id,
        })
    })
}

// ---------------------------------------------------------------------------
// GET /working-hours/inherited
// ---------------------------------------------------------------------------

/// Fetch the parent entity's schedule reshaped for the child.
///
/// Clinics inherit from their complex; complexes inherit from the
/// subscription's organization. The result is a starting point the child
/// may edit freely, never a locked reference.
pub async fn get_inherited(
    State(state): State<AppState>,
    Query(params): Query<InheritedParams>,
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

    let (parent_kind, parent_id, parent_name) = match plan {
        PlanType::Clinic => {
            let clinic_id = params.clinic_id.ok_or_else(|| {
                AppError::BadRequest("clinic_id is required on the clinic plan".to_string())
            })?;
            let complex = parent_complex_of(&state.pool, clinic_id).await?;
            (EntityKind::Complex, complex.id, complex.name)
        }
        PlanType::Complex => {
            let organization =
                OrganizationRepo::find_by_subscription(&state.pool, subscription.id)
                    .await?
                    .ok_or_else(|| {
                        AppError::Core(CoreError::NotFoundNamed {
                            entity: "Organization",
                            name: format!("subscription {}", subscription.id),
                        })
                    })?;
            (EntityKind::Organization, organization.id, organization.name)
        }
        PlanType::Company => {
            return Err(AppError::Core(CoreError::Validation(
                "The company plan has no parent to inherit working hours from".to_string(),
            )));
        }
    };

    let schedule = load_schedule(&state.pool, parent_kind, parent_id).await?;
    if schedule.is_empty() {
        return Err(AppError::Core(CoreError::NotFoundNamed {
            entity: "WorkingHours",
            name: parent_name,
        }));
    }

    let result = InheritanceResult::editable(
        schedule,
        InheritanceSource {
            id: parent_id,
            name: parent_name,
        },
    );
    Ok(Json(DataResponse { data: result }))
}

// ---------------------------------------------------------------------------
// POST /working-hours/validate
// ---------------------------------------------------------------------------

/// Validate a proposed clinic schedule against the parent complex's hours
/// and the clinic's future appointments. Read-only; nothing is persisted.
pub async fn validate_schedule(
    State(state): State<AppState>,
    Json(body): Json<ValidateScheduleRequest>,
) -> AppResult<impl IntoResponse> {
    let complex = parent_complex_of(&state.pool, body.clinic_id).await?;
    let parent_schedule = load_schedule(&state.pool, EntityKind::Complex, complex.id).await?;

    let appointments = AppointmentRepo::future_for_clinic(&state.pool, body.clinic_id).await?;
    let slots: Vec<_> = appointments.iter().map(|a| a.to_slot()).collect();

    let result = working_hours::validate_schedule(&body.schedule, &parent_schedule, &slots)
        .map_err(AppError::Core)?;

    Ok(Json(DataResponse { data: result }))
}

// ---------------------------------------------------------------------------
// PUT /working-hours
// ---------------------------------------------------------------------------

/// Replace an entity's stored schedule.
///
/// Each day is validated for internal consistency first; the delete-insert
/// swap runs in one transaction so readers never see a partial week.
pub async fn save_schedule(
    State(state): State<AppState>,
    Json(body): Json<SaveScheduleRequest>,
) -> AppResult<impl IntoResponse> {
    let kind = EntityKind::from_str_db(&body.entity_kind).map_err(AppError::Core)?;

    for day in &body.schedule {
        working_hours::validate_day_schedule(day).map_err(AppError::Core)?;
    }

    let mut tx = state.pool.begin().await?;
    WorkingHoursRepo::replace_schedule(&mut *tx, kind.as_str(), body.entity_id, &body.schedule)
        .await?;
    tx.commit().await?;

    tracing::info!(
        entity_kind = kind.as_str(),
        entity_id = body.entity_id,
        days = body.schedule.len(),
        "Working hours replaced"
    );

    Ok(Json(DataResponse {
        data: body.schedule,
    }))
}
