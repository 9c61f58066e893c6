//! Medera core business rules.
//!
//! Pure decision logic for tenant onboarding: plan-limit policy, the wizard
//! step graph, skip cascades, working-hours inheritance and conflict
//! validation, and clinic status transitions. This crate has zero internal
//! deps and never touches the database; the api/repository layers feed it
//! counts, rows, and payloads and act on its structured results.

pub mod clinic_status;
pub mod error;
pub mod limits;
pub mod messages;
pub mod plan;
pub mod progress;
pub mod steps;
pub mod types;
pub mod working_hours;
