//! Onboarding wizard step vocabulary, dependency table, and skip cascade.
//!
//! Steps form a closed enum rather than free-form strings so unknown tokens
//! are rejected at the parse boundary. The dependency table and the skip
//! cascade are static lookups; all tenant-specific evaluation takes the
//! tenant's completed/skipped sets as inputs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::CoreError;
use crate::plan::PlanType;

// ---------------------------------------------------------------------------
// Step vocabulary
// ---------------------------------------------------------------------------

/// Every step in the onboarding wizard, plus the two terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnboardingStep {
    OrganizationOverview,
    OrganizationContact,
    OrganizationLegal,
    ComplexOverview,
    ComplexContact,
    ComplexLegal,
    ComplexSchedule,
    ClinicOverview,
    ClinicContact,
    ClinicServices,
    ClinicLegal,
    ClinicSchedule,
    Completed,
    Dashboard,
}

impl OnboardingStep {
    /// Parse a step token from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "organization-overview" => Ok(Self::OrganizationOverview),
            "organization-contact" => Ok(Self::OrganizationContact),
            "organization-legal" => Ok(Self::OrganizationLegal),
            "complex-overview" => Ok(Self::ComplexOverview),
            "complex-contact" => Ok(Self::ComplexContact),
            "complex-legal" => Ok(Self::ComplexLegal),
            "complex-schedule" => Ok(Self::ComplexSchedule),
            "clinic-overview" => Ok(Self::ClinicOverview),
            "clinic-contact" => Ok(Self::ClinicContact),
            "clinic-services" => Ok(Self::ClinicServices),
            "clinic-legal" => Ok(Self::ClinicLegal),
            "clinic-schedule" => Ok(Self::ClinicSchedule),
            "completed" => Ok(Self::Completed),
            "dashboard" => Ok(Self::Dashboard),
            _ => Err(CoreError::Validation(format!(
                "Invalid onboarding step '{s}'"
            ))),
        }
    }

    /// Convert to a database-compatible token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrganizationOverview => "organization-overview",
            Self::OrganizationContact => "organization-contact",
            Self::OrganizationLegal => "organization-legal",
            Self::ComplexOverview => "complex-overview",
            Self::ComplexContact => "complex-contact",
            Self::ComplexLegal => "complex-legal",
            Self::ComplexSchedule => "complex-schedule",
            Self::ClinicOverview => "clinic-overview",
            Self::ClinicContact => "clinic-contact",
            Self::ClinicServices => "clinic-services",
            Self::ClinicLegal => "clinic-legal",
            Self::ClinicSchedule => "clinic-schedule",
            Self::Completed => "completed",
            Self::Dashboard => "dashboard",
        }
    }

    /// Terminal states accept no further wizard activity.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Dashboard)
    }
}

impl fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The wizard's entry step for a plan type.
pub fn initial_step(plan: PlanType) -> OnboardingStep {
    match plan {
        PlanType::Company => OnboardingStep::OrganizationOverview,
        PlanType::Complex => OnboardingStep::ComplexOverview,
        PlanType::Clinic => OnboardingStep::ClinicOverview,
    }
}

// ---------------------------------------------------------------------------
// Dependency table
// ---------------------------------------------------------------------------

/// Steps that must be satisfied (completed or skipped) before `step` may be
/// entered. Steps without an entry are always reachable.
pub fn required_steps(step: OnboardingStep) -> &'static [OnboardingStep] {
    use OnboardingStep::*;
    match step {
        OrganizationContact | OrganizationLegal => &[OrganizationOverview],
        ComplexContact | ComplexLegal | ComplexSchedule => &[ComplexOverview],
        ClinicOverview => &[ComplexOverview],
        ClinicContact | ClinicServices | ClinicLegal | ClinicSchedule => &[ClinicOverview],
        _ => &[],
    }
}

/// Outcome of a step-dependency check. Ephemeral; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct DependencyResult {
    pub can_proceed: bool,
    pub missing_steps: Vec<OnboardingStep>,
}

/// Evaluate whether `step` may be entered given the tenant's completed and
/// skipped step sets. A prerequisite counts as satisfied when it appears in
/// either set: skipping bypasses a dependency, it does not fail it.
pub fn evaluate_dependencies(
    step: OnboardingStep,
    completed: &BTreeSet<OnboardingStep>,
    skipped: &BTreeSet<OnboardingStep>,
) -> DependencyResult {
    let missing_steps: Vec<OnboardingStep> = required_steps(step)
        .iter()
        .copied()
        .filter(|required| !completed.contains(required) && !skipped.contains(required))
        .collect();

    DependencyResult {
        can_proceed: missing_steps.is_empty(),
        missing_steps,
    }
}

// ---------------------------------------------------------------------------
// Skip cascade
// ---------------------------------------------------------------------------

/// Whether a plan may skip the complex stage. Only the company plan may:
/// it owns the organization level and can run clinics directly under it
/// later, while complex/clinic plans have nothing above the stage to fall
/// back to.
pub fn can_skip_complex(plan: PlanType) -> bool {
    plan == PlanType::Company
}

/// The fixed cascade group for skipping the complex stage: the complex
/// steps followed by the clinic steps, six tokens in a fixed order. Once
/// complex is skipped, a clinic cannot exist under company-plan onboarding,
/// so the clinic stage is skipped with it. The remaining sub-steps (legal
/// and schedule entries) depend only on their own overview step, which this
/// cascade marks skipped.
pub const COMPLEX_SKIP_CASCADE: &[OnboardingStep] = &[
    OnboardingStep::ComplexOverview,
    OnboardingStep::ComplexContact,
    OnboardingStep::ComplexLegal,
    OnboardingStep::ClinicOverview,
    OnboardingStep::ClinicContact,
    OnboardingStep::ClinicServices,
];

/// Steps that become skipped when `step` is skipped.
///
/// `complex-overview` is the only cascade group; any other input falls back
/// to the identity list `[step]`.
pub fn cascade_skipped_steps(step: OnboardingStep) -> Vec<OnboardingStep> {
    match step {
        OnboardingStep::ComplexOverview => COMPLEX_SKIP_CASCADE.to_vec(),
        other => vec![other],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STEPS: &[OnboardingStep] = &[
        OnboardingStep::OrganizationOverview,
        OnboardingStep::OrganizationContact,
        OnboardingStep::OrganizationLegal,
        OnboardingStep::ComplexOverview,
        OnboardingStep::ComplexContact,
        OnboardingStep::ComplexLegal,
        OnboardingStep::ComplexSchedule,
        OnboardingStep::ClinicOverview,
        OnboardingStep::ClinicContact,
        OnboardingStep::ClinicServices,
        OnboardingStep::ClinicLegal,
        OnboardingStep::ClinicSchedule,
        OnboardingStep::Completed,
        OnboardingStep::Dashboard,
    ];

    // -- Token parsing --

    #[test]
    fn step_as_str_roundtrip() {
        for step in ALL_STEPS {
            assert_eq!(OnboardingStep::from_str_db(step.as_str()).unwrap(), *step);
        }
    }

    #[test]
    fn unknown_token_is_rejected() {
        assert!(OnboardingStep::from_str_db("clinic-billing").is_err());
        assert!(OnboardingStep::from_str_db("").is_err());
        // camelCase variants are not valid tokens.
        assert!(OnboardingStep::from_str_db("clinicOverview").is_err());
    }

    #[test]
    fn terminal_steps() {
        assert!(OnboardingStep::Completed.is_terminal());
        assert!(OnboardingStep::Dashboard.is_terminal());
        assert!(!OnboardingStep::ClinicSchedule.is_terminal());
    }

    // -- initial_step --

    #[test]
    fn initial_step_per_plan() {
        assert_eq!(
            initial_step(PlanType::Company),
            OnboardingStep::OrganizationOverview
        );
        assert_eq!(
            initial_step(PlanType::Complex),
            OnboardingStep::ComplexOverview
        );
        assert_eq!(
            initial_step(PlanType::Clinic),
            OnboardingStep::ClinicOverview
        );
    }

    // -- Dependency table --

    #[test]
    fn clinic_overview_requires_complex_overview() {
        assert_eq!(
            required_steps(OnboardingStep::ClinicOverview),
            &[OnboardingStep::ComplexOverview]
        );
    }

    #[test]
    fn sub_steps_require_their_overview() {
        assert_eq!(
            required_steps(OnboardingStep::ComplexSchedule),
            &[OnboardingStep::ComplexOverview]
        );
        assert_eq!(
            required_steps(OnboardingStep::ClinicServices),
            &[OnboardingStep::ClinicOverview]
        );
        assert_eq!(
            required_steps(OnboardingStep::OrganizationLegal),
            &[OnboardingStep::OrganizationOverview]
        );
    }

    #[test]
    fn overview_and_terminal_steps_are_always_reachable() {
        for step in [
            OnboardingStep::OrganizationOverview,
            OnboardingStep::ComplexOverview,
            OnboardingStep::Completed,
            OnboardingStep::Dashboard,
        ] {
            assert!(required_steps(step).is_empty());
        }
    }

    // -- evaluate_dependencies --

    // Scenario C: company tenant, nothing completed or skipped, requests
    // clinic-overview.
    #[test]
    fn missing_prerequisite_blocks_with_listing() {
        let completed = BTreeSet::new();
        let skipped = BTreeSet::new();
        let result = evaluate_dependencies(OnboardingStep::ClinicOverview, &completed, &skipped);
        assert!(!result.can_proceed);
        assert_eq!(result.missing_steps, vec![OnboardingStep::ComplexOverview]);
    }

    #[test]
    fn completed_prerequisite_satisfies() {
        let completed = BTreeSet::from([OnboardingStep::ComplexOverview]);
        let skipped = BTreeSet::new();
        let result = evaluate_dependencies(OnboardingStep::ClinicOverview, &completed, &skipped);
        assert!(result.can_proceed);
        assert!(result.missing_steps.is_empty());
    }

    // Scenario D: a skipped prerequisite bypasses the dependency.
    #[test]
    fn skipped_prerequisite_satisfies() {
        let completed = BTreeSet::new();
        let skipped = BTreeSet::from([OnboardingStep::ComplexOverview]);
        let result = evaluate_dependencies(OnboardingStep::ClinicOverview, &completed, &skipped);
        assert!(result.can_proceed);
    }

    #[test]
    fn step_without_entry_is_always_reachable() {
        let completed = BTreeSet::new();
        let skipped = BTreeSet::new();
        let result =
            evaluate_dependencies(OnboardingStep::OrganizationOverview, &completed, &skipped);
        assert!(result.can_proceed);
        assert!(result.missing_steps.is_empty());
    }

    // -- Skip cascade --

    #[test]
    fn can_skip_complex_only_for_company() {
        assert!(can_skip_complex(PlanType::Company));
        assert!(!can_skip_complex(PlanType::Complex));
        assert!(!can_skip_complex(PlanType::Clinic));
    }

    #[test]
    fn complex_cascade_is_six_tokens_in_fixed_order() {
        let cascade = cascade_skipped_steps(OnboardingStep::ComplexOverview);
        assert_eq!(
            cascade,
            vec![
                OnboardingStep::ComplexOverview,
                OnboardingStep::ComplexContact,
                OnboardingStep::ComplexLegal,
                OnboardingStep::ClinicOverview,
                OnboardingStep::ClinicContact,
                OnboardingStep::ClinicServices,
            ]
        );
    }

    #[test]
    fn cascade_identity_fallback_for_every_other_step() {
        for step in ALL_STEPS {
            if *step == OnboardingStep::ComplexOverview {
                continue;
            }
            assert_eq!(cascade_skipped_steps(*step), vec![*step]);
        }
    }

    /// After the cascade, every remaining sub-step's dependency is satisfied:
    /// the cascade skips both overview steps.
    #[test]
    fn cascade_unblocks_all_dependent_steps() {
        let completed = BTreeSet::new();
        let skipped: BTreeSet<_> = cascade_skipped_steps(OnboardingStep::ComplexOverview)
            .into_iter()
            .collect();
        for step in [
            OnboardingStep::ComplexLegal,
            OnboardingStep::ComplexSchedule,
            OnboardingStep::ClinicLegal,
            OnboardingStep::ClinicSchedule,
        ] {
            let result = evaluate_dependencies(step, &completed, &skipped);
            assert!(result.can_proceed, "{step} should be unblocked");
        }
    }
}
