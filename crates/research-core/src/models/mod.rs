//! Data models for plans, workflow events and research sessions.
//!
//! Each model implements [`std::fmt::Display`] in [`crate::display`] so the
//! CLI can print it as Markdown.

pub mod event;
pub mod plan;
pub mod session;
pub mod status;


pub use event::{
    AgentInputData, AgentOutputData, AgentStreamData, ChatMessage, EventKind, HumanResponse,
    StopEventData, ToolCallData, ToolCallRef, ToolCallResultData, ToolOutput,
    WorkflowCancelledData, WorkflowEvent, UPDATE_REPORT_TOOL,
};
pub use plan::{BackendPayload, ParsedPlan, PlanStep, PLAN_MARKER};
pub use session::{ArtifactKind, ResearchArtifact, ResearchPlan, ResearchSession, ResearchSource};
pub use status::ResearchStatus;
