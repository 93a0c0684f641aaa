//! Folding workflow events into [`RunState`].
//!
//! [`reduce`] is applied once per event, in arrival order, for a single run.
//! It never sends anything: answering the agent goes through
//! [`submit_response`], which only records the answer locally and hands back
//! the outbound message for the transport.

use jiff::Timestamp;
use log::{debug, info};

use crate::{
    models::{EventKind, HumanResponse, WorkflowEvent},
    state::{LogEntry, RunState},
};

/// Folds one event into the run state.
///
/// | kind | effect |
/// |------|--------|
/// | `AgentInput`, `AgentOutput`, `AgentStream`, `ToolCall`, unrecognized | appended |
/// | `ToolCallResult` | appended; an `update_report` result with a non-empty body replaces the report |
/// | `InputRequired` | agent-attributed entry; run waits for the human |
/// | `StopEvent` | appended; a result completes the run |
/// | `WorkflowCancelled` | appended |
pub fn reduce(state: &mut RunState, event: WorkflowEvent) {
    match &event.kind {
        EventKind::ToolCallResult(result) => {
            if let Some(body) = result.report_update() {
                if !state.is_terminal() {
                    debug!("{}: report replaced ({} bytes)", state.run_id(), body.len());
                }
                state.replace_report(body, event.timestamp);
            }
        }
        EventKind::InputRequired { prompt } => {
            state.push(LogEntry::Agent {
                timestamp: event.timestamp,
                content: prompt.clone(),
            });
            state.set_awaiting_human(true);
            return;
        }
        EventKind::StopEvent(stop) => {
            if let Some(result) = &stop.result {
                if !state.is_terminal() {
                    info!("{}: completed", state.run_id());
                }
                state.complete(result.clone(), event.timestamp);
            }
        }
        EventKind::WorkflowCancelled(cancelled) => {
            info!(
                "{}: cancelled by workflow ({})",
                state.run_id(),
                cancelled.reason.as_deref().unwrap_or("no reason given")
            );
        }
        EventKind::AgentInput(_)
        | EventKind::AgentStream(_)
        | EventKind::ToolCall(_)
        | EventKind::AgentOutput(_)
        | EventKind::Unrecognized { .. } => {}
    }

    state.push(LogEntry::Event { event });
}

/// Records a transport-level stream error.
///
/// The log and report stay as last observed; no stop entry is fabricated.
pub fn fail(state: &mut RunState, message: impl Into<String>) {
    state.fail(message.into());
}

/// Records the user's answer and returns the message to send.
pub fn submit_response(state: &mut RunState, response: &str) -> HumanResponse {
    state.set_awaiting_human(false);
    state.push(LogEntry::User {
        timestamp: Timestamp::now(),
        content: response.to_string(),
    });
    HumanResponse::new(response)
}

/// Folds a whole recorded stream from a fresh state.
pub fn replay<I>(mut state: RunState, events: I) -> RunState
where
    I: IntoIterator<Item = WorkflowEvent>,
{
    for event in events {
        reduce(&mut state, event);
    }
    state
}
