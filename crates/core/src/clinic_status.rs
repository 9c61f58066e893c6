//! Clinic status transitions and the transfer-decision rules.
//!
//! All transitions are caller-directed; nothing here fires automatically.
//! The expensive part is leaving the active state: a clinic with assigned
//! doctors or upcoming appointments cannot go inactive/suspended until the
//! caller makes an explicit transfer decision with a target clinic.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClinicStatus {
    Active,
    Inactive,
    Suspended,
}

impl ClinicStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "suspended" => Ok(Self::Suspended),
            _ => Err(CoreError::Validation(format!(
                "Invalid clinic status '{s}'. Must be one of: active, inactive, suspended"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
        }
    }
}

impl fmt::Display for ClinicStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Statuses reachable from `from`. Every state can reach every other state;
/// self-transitions are not transitions.
pub fn valid_transitions(from: ClinicStatus) -> &'static [ClinicStatus] {
    match from {
        ClinicStatus::Active => &[ClinicStatus::Inactive, ClinicStatus::Suspended],
        ClinicStatus::Inactive => &[ClinicStatus::Active, ClinicStatus::Suspended],
        ClinicStatus::Suspended => &[ClinicStatus::Active, ClinicStatus::Inactive],
    }
}

pub fn can_transition(from: ClinicStatus, to: ClinicStatus) -> bool {
    valid_transitions(from).contains(&to)
}

// ---------------------------------------------------------------------------
// Transfer decisions
// ---------------------------------------------------------------------------

/// Caller-supplied instruction for moving personnel off a clinic that is
/// leaving the active state.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TransferDecision {
    #[serde(default)]
    pub transfer_doctors: bool,
    #[serde(default)]
    pub transfer_staff: bool,
    #[serde(default)]
    pub target_clinic_id: Option<DbId>,
}

impl TransferDecision {
    /// Whether the caller asked for any transfer at all.
    pub fn requested(&self) -> bool {
        self.transfer_doctors || self.transfer_staff
    }
}

/// What the transition orchestration must do after the rules pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferPlan {
    /// Nothing to move.
    None,
    /// Move active personnel to `target_clinic_id` per the decision flags,
    /// and flag the clinic's future appointments for rescheduling.
    Transfer {
        target_clinic_id: DbId,
        transfer_doctors: bool,
        transfer_staff: bool,
    },
}

/// Gate a status transition on the clinic's live occupancy.
///
/// Leaving `active` with assigned doctors or upcoming non-cancelled
/// appointments requires an explicit transfer decision carrying a target
/// clinic; the rejection reports the exact counts so the caller can
/// re-decide. Reactivation (any state back to `active`) never requires a
/// transfer decision.
pub fn check_transition(
    current: ClinicStatus,
    target: ClinicStatus,
    assigned_doctors: i64,
    upcoming_appointments: i64,
    decision: &TransferDecision,
) -> Result<TransferPlan, CoreError> {
    if current == target {
        return Err(CoreError::Validation(format!(
            "Clinic is already {current}"
        )));
    }
    if !can_transition(current, target) {
        return Err(CoreError::Validation(format!(
            "Invalid transition: {current} -> {target}"
        )));
    }

    // Only leaving the active state needs occupancy checks.
    if current != ClinicStatus::Active {
        return Ok(TransferPlan::None);
    }

    let occupied = assigned_doctors > 0 || upcoming_appointments > 0;
    if !occupied {
        return Ok(TransferPlan::None);
    }

    if !decision.requested() {
        return Err(CoreError::TransferRequired {
            assigned_doctors,
            upcoming_appointments,
        });
    }

    let target_clinic_id = decision.target_clinic_id.ok_or_else(|| {
        CoreError::Conflict(
            "A transfer was requested but no target clinic was supplied".to_string(),
        )
    })?;

    Ok(TransferPlan::Transfer {
        target_clinic_id,
        transfer_doctors: decision.transfer_doctors,
        transfer_staff: decision.transfer_staff,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const NO_DECISION: TransferDecision = TransferDecision {
        transfer_doctors: false,
        transfer_staff: false,
        target_clinic_id: None,
    };

    // -- Status parsing --

    #[test]
    fn status_as_str_roundtrip() {
        for status in [
            ClinicStatus::Active,
            ClinicStatus::Inactive,
            ClinicStatus::Suspended,
        ] {
            assert_eq!(ClinicStatus::from_str_db(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn status_from_str_invalid() {
        assert!(ClinicStatus::from_str_db("closed").is_err());
        assert!(ClinicStatus::from_str_db("").is_err());
    }

    // -- State machine --

    #[test]
    fn every_distinct_pair_is_reachable() {
        let all = [
            ClinicStatus::Active,
            ClinicStatus::Inactive,
            ClinicStatus::Suspended,
        ];
        for from in all {
            for to in all {
                assert_eq!(can_transition(from, to), from != to);
            }
        }
    }

    // -- check_transition --

    #[test]
    fn same_status_is_rejected() {
        assert_matches!(
            check_transition(ClinicStatus::Active, ClinicStatus::Active, 0, 0, &NO_DECISION),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn empty_clinic_deactivates_without_decision() {
        let plan =
            check_transition(ClinicStatus::Active, ClinicStatus::Inactive, 0, 0, &NO_DECISION)
                .unwrap();
        assert_eq!(plan, TransferPlan::None);
    }

    // Scenario F, first half: occupied clinic, no transfer flags.
    #[test]
    fn occupied_clinic_requires_transfer_decision_with_counts() {
        let err =
            check_transition(ClinicStatus::Active, ClinicStatus::Inactive, 1, 1, &NO_DECISION)
                .unwrap_err();
        assert_matches!(
            err,
            CoreError::TransferRequired {
                assigned_doctors: 1,
                upcoming_appointments: 1,
            }
        );
    }

    #[test]
    fn appointments_alone_require_a_decision() {
        assert_matches!(
            check_transition(ClinicStatus::Active, ClinicStatus::Suspended, 0, 3, &NO_DECISION),
            Err(CoreError::TransferRequired {
                assigned_doctors: 0,
                upcoming_appointments: 3,
            })
        );
    }

    // Scenario F, second half: retried with transfer flags and a target.
    #[test]
    fn transfer_decision_with_target_yields_plan() {
        let decision = TransferDecision {
            transfer_doctors: true,
            transfer_staff: false,
            target_clinic_id: Some(42),
        };
        let plan =
            check_transition(ClinicStatus::Active, ClinicStatus::Inactive, 1, 1, &decision)
                .unwrap();
        assert_eq!(
            plan,
            TransferPlan::Transfer {
                target_clinic_id: 42,
                transfer_doctors: true,
                transfer_staff: false,
            }
        );
    }

    #[test]
    fn transfer_without_target_is_a_conflict() {
        let decision = TransferDecision {
            transfer_doctors: true,
            transfer_staff: true,
            target_clinic_id: None,
        };
        assert_matches!(
            check_transition(ClinicStatus::Active, ClinicStatus::Inactive, 2, 0, &decision),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn reactivation_never_requires_a_decision() {
        for from in [ClinicStatus::Inactive, ClinicStatus::Suspended] {
            let plan = check_transition(from, ClinicStatus::Active, 5, 9, &NO_DECISION).unwrap();
            assert_eq!(plan, TransferPlan::None);
        }
    }

    #[test]
    fn inactive_to_suspended_skips_occupancy_checks() {
        let plan =
            check_transition(ClinicStatus::Inactive, ClinicStatus::Suspended, 4, 2, &NO_DECISION)
                .unwrap();
        assert_eq!(plan, TransferPlan::None);
    }
}
