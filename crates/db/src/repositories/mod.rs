//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&PgPool` as the first argument. Methods that must participate in
//! a caller-owned transaction take `&mut PgConnection` instead.

pub mod appointment_repo;
pub mod clinic_repo;
pub mod complex_repo;
pub mod organization_repo;
pub mod personnel_repo;
pub mod step_progress_repo;
pub mod subscription_repo;
pub mod working_hours_repo;

pub use appointment_repo::AppointmentRepo;
pub use clinic_repo::ClinicRepo;
pub use complex_repo::ComplexRepo;
pub use organization_repo::OrganizationRepo;
pub use personnel_repo::PersonnelRepo;
pub use step_progress_repo::StepProgressRepo;
pub use subscription_repo::SubscriptionRepo;
pub use working_hours_repo::WorkingHoursRepo;
