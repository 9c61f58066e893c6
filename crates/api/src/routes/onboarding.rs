//! Route definitions for onboarding progress and plan limits.
//!
//! Mounted at `/onboarding` by `api_routes()`.
//!
//! ```text
//! POST /progress/start           start_onboarding
//! GET  /progress                 get_progress (?tenant_id)
//! PUT  /progress/current-step    update_current_step (?tenant_id)
//! POST /progress/complete        complete_step (?tenant_id)
//! POST /progress/skip            skip_step (?tenant_id)
//! POST /steps/validate           validate_step (?tenant_id)
//! POST /skip-complex             skip_complex (?tenant_id)
//! GET  /plan-limit               plan_limit (?subscription_id, entity_kind)
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Onboarding routes — mounted at `/onboarding`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/progress/start", post(onboarding::start_onboarding))
        .route("/progress", get(onboarding::get_progress))
        .route(
            "/progress/current-step",
            put(onboarding::update_current_step),
        )
        .route("/progress/complete", post(onboarding::complete_step))
        .route("/progress/skip", post(onboarding::skip_step))
        .route("/steps/validate", post(onboarding::validate_step))
        .route("/skip-complex", post(onboarding::skip_complex))
        .route("/plan-limit", get(onboarding::plan_limit))
}
