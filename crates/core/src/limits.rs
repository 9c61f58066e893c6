//! Plan-limit enforcement.
//!
//! `evaluate_limit` is a pure decision over a live entity count supplied by
//! the caller. Because the count and the subsequent create are separate
//! statements, the check-then-create sequence MUST run inside a single
//! serializable transaction (or be re-validated immediately before commit);
//! the api layer owns that boundary, this module only decides.

use serde::Serialize;

use crate::messages::{limit_exceeded_message, LocalizedText};
use crate::plan::{max_allowed, EntityKind, PlanType};

/// Outcome of a plan-limit check. Ephemeral; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct LimitResult {
    pub can_create: bool,
    pub current_count: i64,
    /// `None` means the plan places no cap on this entity kind.
    pub max_allowed: Option<i64>,
    pub plan_type: PlanType,
    pub entity_kind: EntityKind,
    /// Canonical bilingual limit message, attached only when blocked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<LocalizedText>,
}

/// Decide whether a subscription on `plan` may create another `kind` entity
/// given `current_count` existing (non-soft-deleted) ones.
pub fn evaluate_limit(plan: PlanType, kind: EntityKind, current_count: i64) -> LimitResult {
    let max = max_allowed(plan, kind);
    let can_create = match max {
        Some(max) => current_count < max,
        None => true,
    };
    let message = if can_create {
        None
    } else {
        // max is always Some here: an unbounded kind can never block.
        Some(limit_exceeded_message(kind, max.unwrap_or(0)))
    };

    LimitResult {
        can_create,
        current_count,
        max_allowed: max,
        plan_type: plan,
        entity_kind: kind,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Scenario A: clinic plan, zero existing clinics.
    #[test]
    fn clinic_plan_first_clinic_allowed() {
        let result = evaluate_limit(PlanType::Clinic, EntityKind::Clinic, 0);
        assert!(result.can_create);
        assert_eq!(result.current_count, 0);
        assert_eq!(result.max_allowed, Some(1));
        assert!(result.message.is_none());
    }

    // Scenario B: clinic plan, one existing clinic.
    #[test]
    fn clinic_plan_second_clinic_blocked_with_message() {
        let result = evaluate_limit(PlanType::Clinic, EntityKind::Clinic, 1);
        assert!(!result.can_create);
        assert_eq!(result.current_count, 1);
        assert_eq!(result.max_allowed, Some(1));
        let msg = result.message.expect("blocked result carries a message");
        assert!(!msg.en.is_empty());
        assert!(!msg.ar.is_empty());
    }

    #[test]
    fn unbounded_kind_always_allows() {
        for count in [0, 1, 100, 10_000] {
            let result = evaluate_limit(PlanType::Company, EntityKind::Clinic, count);
            assert!(result.can_create, "count {count} should be allowed");
            assert_eq!(result.max_allowed, None);
        }
    }

    #[test]
    fn zero_cap_blocks_immediately() {
        let result = evaluate_limit(PlanType::Clinic, EntityKind::Organization, 0);
        assert!(!result.can_create);
        assert_eq!(result.max_allowed, Some(0));
    }

    /// `can_create` is never true once the count reaches the cap, across the
    /// whole policy table.
    #[test]
    fn never_allows_at_or_above_cap() {
        for plan in [PlanType::Company, PlanType::Complex, PlanType::Clinic] {
            for kind in [
                EntityKind::Organization,
                EntityKind::Complex,
                EntityKind::Clinic,
            ] {
                if let Some(max) = crate::plan::max_allowed(plan, kind) {
                    for count in [max, max + 1, max + 50] {
                        let result = evaluate_limit(plan, kind, count);
                        assert!(
                            !result.can_create,
                            "{plan:?}/{kind:?} at count {count} must be blocked"
                        );
                    }
                    if max > 0 {
                        assert!(evaluate_limit(plan, kind, max - 1).can_create);
                    }
                }
            }
        }
    }
}
