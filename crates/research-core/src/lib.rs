//! Core library for deep research runs.
//!
//! This crate turns planner text into a reviewable checklist and folds the
//! asynchronous event stream of a research workflow into a report, a status
//! and an ordered log. It does not talk to any network service itself: the
//! workflow service is reached through the [`run::WorkflowTransport`] trait.
//!
//! # Layers
//!
//! - **Plans** ([`plan`]): parse planner output, toggle steps, produce the
//!   confirmation message
//! - **Events** ([`events`]): decode `{ type, data }` envelopes into typed
//!   [`WorkflowEvent`]s at the boundary
//! - **Reduction** ([`reducer`], [`state`]): fold events into [`RunState`]
//! - **Runs** ([`run`]): supersession of stale runs, scripted streams and an
//!   async runner over a transport
//! - **Sessions** ([`store`], [`export`]): fixture sessions and export files
//!
//! # Quick Start
//!
//! ```rust
//! use research_core::{
//!     fixtures::mock_research_run, reducer, state::RunId, RunState, SessionStore,
//!     ResearchStatus,
//! };
//!
//! let store = SessionStore::with_fixtures();
//! let session = store.get("research_mock_001").unwrap();
//!
//! let events = mock_research_run(&session).events().cloned().collect::<Vec<_>>();
//! let state = reducer::replay(RunState::new(RunId(1), session.report_markdown.clone()), events);
//!
//! assert_eq!(state.status(), ResearchStatus::Completed);
//! assert!(state.report_text().contains("## Recommended architecture"));
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod export;
pub mod fixtures;
pub mod models;
pub mod plan;
pub mod reducer;
pub mod run;
pub mod state;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigBuilder, ResearchConfig};
pub use error::{ResearchError, Result};
pub use export::ExportFormat;
pub use models::{
    EventKind, HumanResponse, ParsedPlan, PlanStep, ResearchSession, ResearchStatus,
    WorkflowEvent,
};
pub use plan::{PlanResponse, PlanReview};
pub use run::{MockTransport, RunController, RunRunner, ScriptedStream, WorkflowTransport};
pub use state::{LogEntry, RunId, RunState};
pub use store::SessionStore;
