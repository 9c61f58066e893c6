use crate::plan::PlanType;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Not-found for records addressed by something other than a numeric id
    /// (tenant keys, day names, parent working-hours sets).
    #[error("Entity not found: {entity} '{name}'")]
    NotFoundNamed { entity: &'static str, name: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Plan limit exceeded: {entity} count {current} has reached the {plan} plan maximum of {max}")]
    LimitExceeded {
        entity: &'static str,
        current: i64,
        max: i64,
        plan: PlanType,
    },

    /// A clinic leaving the active state still has personnel or bookings and
    /// the caller supplied no transfer decision. Counts are reported so the
    /// caller can re-submit with an explicit decision.
    #[error("Transfer required: clinic has {assigned_doctors} assigned doctor(s) and {upcoming_appointments} upcoming appointment(s)")]
    TransferRequired {
        assigned_doctors: i64,
        upcoming_appointments: i64,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}
