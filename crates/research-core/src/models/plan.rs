//! Checklist model derived from planner text.

use serde::{Deserialize, Serialize};

/// Marker the planner prefixes its plan block with.
pub const PLAN_MARKER: &str = "Current Plan:";

/// One toggleable entry of a parsed plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanStep {
    /// Position within the plan (0-indexed, insertion order)
    pub index: usize,

    /// Step text with the leading ordinal marker stripped
    pub description: String,

    /// Whether the step is kept when the plan is confirmed
    pub enabled: bool,

    /// The untouched source line
    pub original_line: String,
}

impl PlanStep {
    /// Creates an enabled step.
    pub fn new(index: usize, description: impl Into<String>, original_line: impl Into<String>) -> Self {
        Self {
            index,
            description: description.into(),
            enabled: true,
            original_line: original_line.into(),
        }
    }
}

/// Result of parsing planner text.
///
/// When `steps` is empty the plan is unstructured and `preamble` holds the
/// whole input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedPlan {
    /// Text preceding the first recognized step
    pub preamble: String,

    /// Recognized steps in source order
    pub steps: Vec<PlanStep>,
}

impl ParsedPlan {
    /// Whether no numbered step was found.
    pub fn is_unstructured(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of steps currently enabled.
    pub fn enabled_count(&self) -> usize {
        self.steps.iter().filter(|s| s.enabled).count()
    }

    /// Preamble as shown above the checklist, without the plan marker.
    pub fn display_preamble(&self) -> String {
        self.preamble.replacen(PLAN_MARKER, "", 1).trim().to_string()
    }
}

/// Planner text split into the plan block and the message that follows it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackendPayload {
    /// The plan block, if the text carried one
    pub plan: Option<String>,

    /// Remaining message and instructions
    pub message: String,
}
