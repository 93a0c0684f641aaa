//! Status enumeration for research sessions and runs.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a research session.
///
/// The forward path is `planning → awaiting_approval → running →
/// {completed | failed}`. The two terminal states are absorbing for a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResearchStatus {
    /// The planner workflow is producing a plan
    #[default]
    Planning,

    /// A plan exists and waits for the user to approve it
    AwaitingApproval,

    /// The orchestrator is executing the approved plan
    Running,

    /// The run ended with a stop result
    Completed,

    /// The event stream ended with a transport error
    Failed,
}

impl FromStr for ResearchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "planning" => Ok(ResearchStatus::Planning),
            "awaiting_approval" | "awaiting approval" => Ok(ResearchStatus::AwaitingApproval),
            "running" => Ok(ResearchStatus::Running),
            "completed" => Ok(ResearchStatus::Completed),
            "failed" => Ok(ResearchStatus::Failed),
            _ => Err(format!("Invalid research status: {s}")),
        }
    }
}

impl ResearchStatus {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResearchStatus::Planning => "planning",
            ResearchStatus::AwaitingApproval => "awaiting_approval",
            ResearchStatus::Running => "running",
            ResearchStatus::Completed => "completed",
            ResearchStatus::Failed => "failed",
        }
    }

    /// Human-readable label, underscores replaced by spaces.
    pub fn label(&self) -> &'static str {
        match self {
            ResearchStatus::AwaitingApproval => "awaiting approval",
            other => other.as_str(),
        }
    }

    /// Whether no further event may change the run's status or report.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ResearchStatus::Completed | ResearchStatus::Failed)
    }
}
