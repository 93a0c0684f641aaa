//! Planner text parsing.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{BackendPayload, ParsedPlan, PlanStep, PLAN_MARKER};

static STEP_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.\s+(.*)").expect("valid step pattern"));

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n-{3,}\n").expect("valid separator pattern"));

/// Parses free-form planner text into a preamble and numbered steps.
///
/// A line is a step when, trimmed, it starts with digits, a period and
/// whitespace. Non-empty lines before the first step form the preamble.
/// Once a step has been seen, non-numbered lines are dropped.
///
/// Without any numbered line the result has no steps and the preamble is the
/// input unchanged.
///
/// # Examples
///
/// ```rust
/// use research_core::plan::parse;
///
/// let plan = parse("Plan:\n1. Search web\n2. Draft outline");
/// assert_eq!(plan.preamble, "Plan:");
/// assert_eq!(plan.steps.len(), 2);
/// assert_eq!(plan.steps[1].description, "Draft outline");
/// ```
pub fn parse(plan_text: &str) -> ParsedPlan {
    let mut steps: Vec<PlanStep> = Vec::new();
    let mut preamble = String::new();

    for line in plan_text.split('\n') {
        let trimmed = line.trim();
        if let Some(captures) = STEP_LINE.captures(trimmed) {
            let description = captures.get(2).map_or("", |m| m.as_str());
            steps.push(PlanStep::new(steps.len(), description, line));
        } else if steps.is_empty() && !trimmed.is_empty() {
            preamble.push_str(line);
            preamble.push('\n');
        }
    }

    if steps.is_empty() {
        return ParsedPlan {
            preamble: plan_text.to_string(),
            steps,
        };
    }

    ParsedPlan {
        preamble: preamble.trim().to_string(),
        steps,
    }
}

/// Splits planner output into the plan block and the trailing message.
///
/// The plan block is recognized only when the text contains the
/// `Current Plan:` marker and a separator line of at least three dashes.
pub fn split_backend_payload(text: &str) -> BackendPayload {
    if text.contains(PLAN_MARKER) && SEPARATOR.is_match(text) {
        let mut parts = SEPARATOR.split(text);
        let plan = parts
            .next()
            .unwrap_or_default()
            .replacen(PLAN_MARKER, "", 1)
            .trim()
            .to_string();
        let message = parts.collect::<Vec<_>>().join("\n").trim().to_string();
        return BackendPayload {
            plan: Some(plan),
            message,
        };
    }

    BackendPayload {
        plan: None,
        message: text.to_string(),
    }
}
