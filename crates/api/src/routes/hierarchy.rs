//! Route definitions for hierarchy entity creation.
//!
//! Two slices, mounted at `/organizations` and `/complexes` by
//! `api_routes()` (clinic creation lives under `/clinics`).
//!
//! ```text
//! POST /organizations    create_organization
//! POST /complexes        create_complex
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::hierarchy;
use crate::state::AppState;

/// Organization routes — mounted at `/organizations`.
pub fn organizations_router() -> Router<AppState> {
    Router::new().route("/", post(hierarchy::create_organization))
}

/// Complex routes — mounted at `/complexes`.
pub fn complexes_router() -> Router<AppState> {
    Router::new().route("/", post(hierarchy::create_complex))
}
