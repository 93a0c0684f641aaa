//! Checklist review of a parsed plan.

use serde::{Deserialize, Serialize};

use super::parser::parse;
use crate::{
    error::{ResearchError, Result},
    models::ParsedPlan,
};

/// Reserved response meaning unconditional plan approval.
pub const ACCEPT: &str = "accept";

/// Sentence introducing a partial selection of steps.
pub const PARTIAL_SELECTION_PREAMBLE: &str = "Please update the plan to include ONLY these steps:";

/// Outbound answer to a plan review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum PlanResponse {
    /// Every step approved
    Accept,
    /// Only some steps kept; carries the regenerated instruction
    Partial(String),
    /// Free-text change request
    Feedback(String),
}

impl PlanResponse {
    /// The message sent to the planner.
    pub fn as_message(&self) -> &str {
        match self {
            PlanResponse::Accept => ACCEPT,
            PlanResponse::Partial(text) | PlanResponse::Feedback(text) => text,
        }
    }

    pub fn into_message(self) -> String {
        match self {
            PlanResponse::Accept => ACCEPT.to_string(),
            PlanResponse::Partial(text) | PlanResponse::Feedback(text) => text,
        }
    }
}

/// Toggle state over one parsed plan.
///
/// A review is built once per distinct planner text; building it again from
/// the same text starts with every step enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanReview {
    plan: ParsedPlan,
}

impl PlanReview {
    /// Parses planner text and enables every step.
    pub fn new(plan_text: &str) -> Self {
        Self::from_plan(parse(plan_text))
    }

    pub fn from_plan(mut plan: ParsedPlan) -> Self {
        for step in &mut plan.steps {
            step.enabled = true;
        }
        Self { plan }
    }

    pub fn plan(&self) -> &ParsedPlan {
        &self.plan
    }

    pub fn enabled_count(&self) -> usize {
        self.plan.enabled_count()
    }

    pub fn total_count(&self) -> usize {
        self.plan.steps.len()
    }

    /// Flips one step and returns its new state.
    ///
    /// # Errors
    ///
    /// Returns `ResearchError::InvalidInput` if `index` is out of range.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        let total = self.total_count();
        let step = self.plan.steps.get_mut(index).ok_or_else(|| {
            ResearchError::invalid_input("index")
                .with_reason(format!("step {index} does not exist (plan has {total} steps)"))
        })?;
        step.enabled = !step.enabled;
        Ok(step.enabled)
    }

    /// Sets one step's state explicitly.
    ///
    /// # Errors
    ///
    /// Returns `ResearchError::InvalidInput` if `index` is out of range.
    pub fn set_enabled(&mut self, index: usize, enabled: bool) -> Result<()> {
        if self.toggle(index)? != enabled {
            self.toggle(index)?;
        }
        Ok(())
    }

    /// Whether confirming is allowed: structured plans need at least one
    /// enabled step.
    pub fn can_confirm(&self) -> bool {
        self.plan.is_unstructured() || self.enabled_count() > 0
    }

    /// Builds the response for the current selection.
    ///
    /// All steps enabled (or an unstructured plan) yields [`PlanResponse::Accept`];
    /// otherwise the enabled steps are renumbered from 1 under a fixed
    /// instruction sentence.
    pub fn confirm(&self) -> PlanResponse {
        if self.enabled_count() == self.total_count() {
            return PlanResponse::Accept;
        }

        let lines: Vec<String> = self
            .plan
            .steps
            .iter()
            .filter(|step| step.enabled)
            .enumerate()
            .map(|(i, step)| format!("{}. {}", i + 1, step.description))
            .collect();

        PlanResponse::Partial(format!(
            "{PARTIAL_SELECTION_PREAMBLE}\n{}",
            lines.join("\n")
        ))
    }

    /// Wraps free-text feedback, ignoring blank input.
    pub fn request_changes(&self, feedback: &str) -> Option<PlanResponse> {
        if feedback.trim().is_empty() {
            return None;
        }
        Some(PlanResponse::Feedback(feedback.to_string()))
    }
}
