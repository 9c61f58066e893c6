//! Tenant step-progress state.
//!
//! One record per tenant: the current step plus the completed and skipped
//! step sets. The sets are private behind mutation methods so the no-overlap
//! invariant (a step is never simultaneously completed and skipped) is
//! enforced here rather than by caller convention. All mutations are
//! idempotent; retried or duplicate calls never corrupt state.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::error::CoreError;
use crate::steps::OnboardingStep;

/// In-memory progress state for one tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressState {
    current_step: OnboardingStep,
    completed: BTreeSet<OnboardingStep>,
    skipped: BTreeSet<OnboardingStep>,
}

impl ProgressState {
    /// Fresh progress positioned at `initial`, with empty step sets.
    pub fn new(initial: OnboardingStep) -> Self {
        Self {
            current_step: initial,
            completed: BTreeSet::new(),
            skipped: BTreeSet::new(),
        }
    }

    /// Rebuild state from persisted string arrays, validating every token.
    ///
    /// A token present in both arrays is reconciled in favor of `completed`
    /// (completion is the stronger claim); the overlap is dropped from
    /// `skipped`, never duplicated.
    pub fn from_parts(
        current_step: &str,
        completed_steps: &[String],
        skipped_steps: &[String],
    ) -> Result<Self, CoreError> {
        let current_step = OnboardingStep::from_str_db(current_step)?;
        let completed = completed_steps
            .iter()
            .map(|s| OnboardingStep::from_str_db(s))
            .collect::<Result<BTreeSet<_>, _>>()?;
        let skipped = skipped_steps
            .iter()
            .map(|s| OnboardingStep::from_str_db(s))
            .collect::<Result<BTreeSet<_>, _>>()?
            .difference(&completed)
            .copied()
            .collect();

        Ok(Self {
            current_step,
            completed,
            skipped,
        })
    }

    pub fn current_step(&self) -> OnboardingStep {
        self.current_step
    }

    pub fn completed(&self) -> &BTreeSet<OnboardingStep> {
        &self.completed
    }

    pub fn skipped(&self) -> &BTreeSet<OnboardingStep> {
        &self.skipped
    }

    /// Move the wizard cursor. Does not touch the step sets.
    pub fn set_current(&mut self, step: OnboardingStep) {
        self.current_step = step;
    }

    /// Record `step` as completed. Idempotent; removes any skipped mark for
    /// the same step.
    pub fn mark_complete(&mut self, step: OnboardingStep) {
        self.skipped.remove(&step);
        self.completed.insert(step);
    }

    /// Record `step` as skipped. Idempotent; removes any completed mark for
    /// the same step.
    pub fn mark_skipped(&mut self, step: OnboardingStep) {
        self.completed.remove(&step);
        self.skipped.insert(step);
    }

    /// Serialize the step sets back to string arrays for persistence.
    pub fn to_parts(&self) -> (&'static str, Vec<String>, Vec<String>) {
        (
            self.current_step.as_str(),
            self.completed.iter().map(|s| s.as_str().into()).collect(),
            self.skipped.iter().map(|s| s.as_str().into()).collect(),
        )
    }
}
