//! Row models and DTOs, one module per table group.

pub mod appointment;
pub mod clinic;
pub mod complex;
pub mod organization;
pub mod personnel;
pub mod step_progress;
pub mod subscription;
pub mod working_hours;
