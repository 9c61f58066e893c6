//! Route definitions.
//!
//! Each module owns one slice of the route tree; `api_routes()` assembles
//! them under `/api/v1`. The health route mounts at the root instead.

pub mod clinics;
pub mod health;
pub mod hierarchy;
pub mod onboarding;
pub mod working_hours;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /onboarding/progress/start        start_onboarding (POST)
/// /onboarding/progress              get_progress (GET)
/// /onboarding/progress/current-step update_current_step (PUT)
/// /onboarding/progress/complete     complete_step (POST)
/// /onboarding/progress/skip         skip_step (POST)
/// /onboarding/steps/validate        validate_step (POST)
/// /onboarding/skip-complex          skip_complex (POST)
/// /onboarding/plan-limit            plan_limit (GET)
///
/// /working-hours/inherited          get_inherited (GET)
/// /working-hours/validate           validate_schedule (POST)
/// /working-hours                    save_schedule (PUT)
///
/// /organizations                    create_organization (POST)
/// /complexes                        create_complex (POST)
///
/// /clinics                          create_clinic (POST)
/// /clinics/{id}/doctors             list_doctors (GET)
/// /clinics/{id}/status              update_status (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/onboarding", onboarding::router())
        .nest("/working-hours", working_hours::router())
        .nest("/organizations", hierarchy::organizations_router())
        .nest("/complexes", hierarchy::complexes_router())
        .nest("/clinics", clinics::router())
}
