//! Request handlers.
//!
//! Handlers stay thin: load rows through the repositories, apply the rules
//! from `medera_core`, persist the outcome. All business decisions live in
//! the core crate so they stay unit-testable without a database.

pub mod clinics;
pub mod hierarchy;
pub mod onboarding;
pub mod working_hours;
