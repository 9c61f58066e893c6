//! Subscription plan types and the entity hierarchy policy.
//!
//! The policy is a pure lookup table: per plan type, which hierarchy levels
//! (organization → complex → clinic) a tenant must create, in what order,
//! and how many of each the subscription allows.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Plan type
// ---------------------------------------------------------------------------

/// Subscription plan types, named after the topmost hierarchy level the
/// tenant manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    Company,
    Complex,
    Clinic,
}

impl PlanType {
    /// Parse a plan type string from the database. Matching is
    /// case-insensitive.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s.to_ascii_lowercase().as_str() {
            "company" => Ok(Self::Company),
            "complex" => Ok(Self::Complex),
            "clinic" => Ok(Self::Clinic),
            _ => Err(CoreError::Validation(format!(
                "Invalid plan type '{s}'. Must be one of: company, complex, clinic"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Complex => "complex",
            Self::Clinic => "clinic",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Entity kinds
// ---------------------------------------------------------------------------

/// The three hierarchy levels a subscription may own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Organization,
    Complex,
    Clinic,
}

impl EntityKind {
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s.to_ascii_lowercase().as_str() {
            "organization" => Ok(Self::Organization),
            "complex" => Ok(Self::Complex),
            "clinic" => Ok(Self::Clinic),
            _ => Err(CoreError::Validation(format!(
                "Invalid entity kind '{s}'. Must be one of: organization, complex, clinic"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::Complex => "complex",
            Self::Clinic => "clinic",
        }
    }
}

// ---------------------------------------------------------------------------
// Hierarchy policy tables
// ---------------------------------------------------------------------------

/// Entity kinds a plan requires, in creation order.
pub fn required_entities(plan: PlanType) -> &'static [EntityKind] {
    match plan {
        PlanType::Company => &[
            EntityKind::Organization,
            EntityKind::Complex,
            EntityKind::Clinic,
        ],
        PlanType::Complex => &[EntityKind::Complex, EntityKind::Clinic],
        PlanType::Clinic => &[EntityKind::Clinic],
    }
}

/// Maximum number of entities of `kind` a plan may create.
///
/// `None` means unbounded. Authoritative table:
///
/// | plan    | organization | complex   | clinic    |
/// |---------|--------------|-----------|-----------|
/// | company | 1            | unbounded | unbounded |
/// | complex | 0            | 1         | unbounded |
/// | clinic  | 0            | 0         | 1         |
pub fn max_allowed(plan: PlanType, kind: EntityKind) -> Option<i64> {
    match (plan, kind) {
        (PlanType::Company, EntityKind::Organization) => Some(1),
        (PlanType::Company, _) => None,
        (PlanType::Complex, EntityKind::Organization) => Some(0),
        (PlanType::Complex, EntityKind::Complex) => Some(1),
        (PlanType::Complex, EntityKind::Clinic) => None,
        (PlanType::Clinic, EntityKind::Clinic) => Some(1),
        (PlanType::Clinic, _) => Some(0),
    }
}

/// Per-kind live counts of entities owned by a subscription.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EntityCounts {
    pub organizations: i64,
    pub complexes: i64,
    pub clinics: i64,
}

impl EntityCounts {
    pub fn count_of(&self, kind: EntityKind) -> i64 {
        match kind {
            EntityKind::Organization => self.organizations,
            EntityKind::Complex => self.complexes,
            EntityKind::Clinic => self.clinics,
        }
    }
}

/// Check that every entity kind the plan requires is present, and that a
/// dependent kind is non-empty whenever its parent kind is non-empty
/// (complexes under an organization need clinics, and so on down the chain).
///
/// The plan string is matched case-insensitively; an unknown plan returns
/// `false` rather than an error, mirroring the boolean contract of the
/// policy table.
pub fn validate_entity_hierarchy(plan: &str, present: EntityCounts) -> bool {
    let Ok(plan) = PlanType::from_str_db(plan) else {
        return false;
    };
    let required = required_entities(plan);
    if required.iter().any(|kind| present.count_of(*kind) == 0) {
        return false;
    }
    // Parent kinds with children missing: complexes imply clinics, and an
    // organization implies complexes.
    if present.organizations > 0 && present.complexes == 0 {
        return false;
    }
    if present.complexes > 0 && present.clinics == 0 {
        return false;
    }
    true
}

// ---------------------------------------------------------------------------
// Plan inference
// ---------------------------------------------------------------------------

/// Derive a plan type from the entity references present on a tenant.
///
/// Precedence is authoritative and order-sensitive: organization > complex >
/// clinic, defaulting to clinic when no reference is set. A tenant holding
/// both an organization and a complex reference is classified as `Company`.
pub fn infer_plan_type(has_organization: bool, has_complex: bool, has_clinic: bool) -> PlanType {
    if has_organization {
        PlanType::Company
    } else if has_complex {
        PlanType::Complex
    } else if has_clinic {
        PlanType::Clinic
    } else {
        PlanType::Clinic
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- PlanType parsing --

    #[test]
    fn plan_from_str_valid() {
        assert_eq!(PlanType::from_str_db("company").unwrap(), PlanType::Company);
        assert_eq!(PlanType::from_str_db("complex").unwrap(), PlanType::Complex);
        assert_eq!(PlanType::from_str_db("clinic").unwrap(), PlanType::Clinic);
    }

    #[test]
    fn plan_from_str_is_case_insensitive() {
        assert_eq!(PlanType::from_str_db("Company").unwrap(), PlanType::Company);
        assert_eq!(PlanType::from_str_db("CLINIC").unwrap(), PlanType::Clinic);
    }

    #[test]
    fn plan_from_str_invalid() {
        assert!(PlanType::from_str_db("enterprise").is_err());
        assert!(PlanType::from_str_db("").is_err());
    }

    #[test]
    fn plan_as_str_roundtrip() {
        for plan in [PlanType::Company, PlanType::Complex, PlanType::Clinic] {
            assert_eq!(PlanType::from_str_db(plan.as_str()).unwrap(), plan);
        }
    }

    // -- EntityKind parsing --

    #[test]
    fn kind_as_str_roundtrip() {
        for kind in [
            EntityKind::Organization,
            EntityKind::Complex,
            EntityKind::Clinic,
        ] {
            assert_eq!(EntityKind::from_str_db(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn kind_from_str_invalid() {
        assert!(EntityKind::from_str_db("department").is_err());
    }

    // -- max_allowed table --

    #[test]
    fn company_plan_caps() {
        assert_eq!(
            max_allowed(PlanType::Company, EntityKind::Organization),
            Some(1)
        );
        assert_eq!(max_allowed(PlanType::Company, EntityKind::Complex), None);
        assert_eq!(max_allowed(PlanType::Company, EntityKind::Clinic), None);
    }

    #[test]
    fn complex_plan_caps() {
        assert_eq!(
            max_allowed(PlanType::Complex, EntityKind::Organization),
            Some(0)
        );
        assert_eq!(max_allowed(PlanType::Complex, EntityKind::Complex), Some(1));
        assert_eq!(max_allowed(PlanType::Complex, EntityKind::Clinic), None);
    }

    #[test]
    fn clinic_plan_caps() {
        assert_eq!(
            max_allowed(PlanType::Clinic, EntityKind::Organization),
            Some(0)
        );
        assert_eq!(max_allowed(PlanType::Clinic, EntityKind::Complex), Some(0));
        assert_eq!(max_allowed(PlanType::Clinic, EntityKind::Clinic), Some(1));
    }

    // -- required_entities --

    #[test]
    fn required_entities_follow_creation_order() {
        assert_eq!(
            required_entities(PlanType::Company),
            &[
                EntityKind::Organization,
                EntityKind::Complex,
                EntityKind::Clinic
            ]
        );
        assert_eq!(
            required_entities(PlanType::Complex),
            &[EntityKind::Complex, EntityKind::Clinic]
        );
        assert_eq!(required_entities(PlanType::Clinic), &[EntityKind::Clinic]);
    }

    // -- validate_entity_hierarchy --

    #[test]
    fn hierarchy_valid_when_all_required_present() {
        let present = EntityCounts {
            organizations: 1,
            complexes: 2,
            clinics: 3,
        };
        assert!(validate_entity_hierarchy("company", present));
    }

    #[test]
    fn hierarchy_invalid_when_required_kind_missing() {
        let present = EntityCounts {
            organizations: 1,
            complexes: 0,
            clinics: 0,
        };
        assert!(!validate_entity_hierarchy("company", present));
    }

    #[test]
    fn hierarchy_invalid_when_parent_present_but_child_empty() {
        let present = EntityCounts {
            organizations: 0,
            complexes: 1,
            clinics: 0,
        };
        assert!(!validate_entity_hierarchy("complex", present));
    }

    #[test]
    fn hierarchy_clinic_plan_needs_only_clinic() {
        let present = EntityCounts {
            organizations: 0,
            complexes: 0,
            clinics: 1,
        };
        assert!(validate_entity_hierarchy("clinic", present));
    }

    #[test]
    fn hierarchy_plan_match_is_case_insensitive() {
        let present = EntityCounts {
            organizations: 0,
            complexes: 0,
            clinics: 1,
        };
        assert!(validate_entity_hierarchy("Clinic", present));
    }

    #[test]
    fn hierarchy_unknown_plan_is_false() {
        let present = EntityCounts {
            organizations: 1,
            complexes: 1,
            clinics: 1,
        };
        assert!(!validate_entity_hierarchy("enterprise", present));
    }

    // -- infer_plan_type --

    #[test]
    fn inference_precedence_organization_wins() {
        // Both organization and complex refs set: company, not complex.
        assert_eq!(infer_plan_type(true, true, false), PlanType::Company);
        assert_eq!(infer_plan_type(true, true, true), PlanType::Company);
        assert_eq!(infer_plan_type(true, false, false), PlanType::Company);
    }

    #[test]
    fn inference_complex_without_organization() {
        assert_eq!(infer_plan_type(false, true, true), PlanType::Complex);
        assert_eq!(infer_plan_type(false, true, false), PlanType::Complex);
    }

    #[test]
    fn inference_clinic_only() {
        assert_eq!(infer_plan_type(false, false, true), PlanType::Clinic);
    }

    #[test]
    fn inference_defaults_to_clinic() {
        assert_eq!(infer_plan_type(false, false, false), PlanType::Clinic);
    }
}
