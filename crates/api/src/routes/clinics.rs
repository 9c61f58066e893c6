//! Route definitions for clinic operations.
//!
//! Mounted at `/clinics` by `api_routes()`.
//!
//! ```text
//! POST /               create_clinic
//! GET  /{id}/doctors   list_doctors
//! PUT  /{id}/status    update_status
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{clinics, hierarchy};
use crate::state::AppState;

/// Clinic routes — mounted at `/clinics`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(hierarchy::create_clinic))
        .route("/{id}/doctors", get(clinics::list_doctors))
        .route("/{id}/status", put(clinics::update_status))
}
