//! Route definitions for working hours.
//!
//! Mounted at `/working-hours` by `api_routes()`.
//!
//! ```text
//! GET  /inherited    get_inherited (?subscription_id, clinic_id)
//! POST /validate     validate_schedule
//! PUT  /             save_schedule
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::working_hours;
use crate::state::AppState;

/// Working-hours routes — mounted at `/working-hours`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/inherited", get(working_hours::get_inherited))
        .route("/validate", post(working_hours::validate_schedule))
        .route("/", put(working_hours::save_schedule))
}
