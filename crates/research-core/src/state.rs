//! Derived state of one workflow run.

use std::fmt;

use jiff::Timestamp;
use serde::Serialize;
use serde_json::Value;

use crate::models::{EventKind, ResearchStatus, WorkflowEvent};

/// Identifier of a run within one controller; strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct RunId(pub u64);

impl RunId {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

/// One line of the run log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum LogEntry {
    /// A workflow event recorded verbatim
    Event {
        #[serde(flatten)]
        event: WorkflowEvent,
    },
    /// A question the agent asked, extracted from an input-required event
    Agent {
        #[serde(rename = "ts")]
        timestamp: Timestamp,
        content: String,
    },
    /// A response the user submitted
    User {
        #[serde(rename = "ts")]
        timestamp: Timestamp,
        content: String,
    },
}

impl LogEntry {
    pub fn timestamp(&self) -> Timestamp {
        match self {
            LogEntry::Event { event } => event.timestamp,
            LogEntry::Agent { timestamp, .. } | LogEntry::User { timestamp, .. } => *timestamp,
        }
    }

    /// Kind label shown in the log: the literal event type, or the author.
    pub fn label(&self) -> &str {
        match self {
            LogEntry::Event { event } => &event.type_name,
            LogEntry::Agent { .. } => "agent",
            LogEntry::User { .. } => "user",
        }
    }

    pub fn as_event(&self) -> Option<&WorkflowEvent> {
        match self {
            LogEntry::Event { event } => Some(event),
            _ => None,
        }
    }
}

/// Reduction of a run's event stream up to the latest folded event.
///
/// The log only grows. Once the status is terminal, neither the status, the
/// report nor the waiting flag change again.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunState {
    run_id: RunId,
    status: ResearchStatus,
    report_text: String,
    awaiting_human: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    updated_at: Timestamp,
    log: Vec<LogEntry>,
}

impl RunState {
    /// Starts a running state seeded with the session's baseline report.
    pub fn new(run_id: RunId, baseline_report: impl Into<String>) -> Self {
        Self {
            run_id,
            status: ResearchStatus::Running,
            report_text: baseline_report.into(),
            awaiting_human: false,
            result: None,
            error: None,
            updated_at: Timestamp::now(),
            log: Vec::new(),
        }
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn status(&self) -> ResearchStatus {
        self.status
    }

    pub fn report_text(&self) -> &str {
        &self.report_text
    }

    pub fn awaiting_human(&self) -> bool {
        self.awaiting_human
    }

    /// Result carried by the stop event, once completed.
    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    /// Transport error message, once failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Label for the status badge; a pending question shows as waiting while
    /// the run is still logically running.
    pub fn status_label(&self) -> &'static str {
        if self.awaiting_human && !self.is_terminal() {
            "waiting for input"
        } else {
            self.status.label()
        }
    }

    /// Whether the stream was cancelled by the workflow service.
    pub fn was_cancelled(&self) -> bool {
        self.log.iter().any(|entry| {
            matches!(
                entry.as_event().map(|e| &e.kind),
                Some(EventKind::WorkflowCancelled(_))
            )
        })
    }

    pub(crate) fn push(&mut self, entry: LogEntry) {
        self.log.push(entry);
    }

    pub(crate) fn replace_report(&mut self, body: &str, at: Timestamp) {
        if self.is_terminal() {
            return;
        }
        self.report_text = body.to_string();
        self.updated_at = at;
    }

    pub(crate) fn set_awaiting_human(&mut self, awaiting: bool) {
        if !self.is_terminal() {
            self.awaiting_human = awaiting;
        }
    }

    pub(crate) fn complete(&mut self, result: Value, at: Timestamp) {
        if self.is_terminal() {
            return;
        }
        self.status = ResearchStatus::Completed;
        self.awaiting_human = false;
        self.result = Some(result);
        self.updated_at = at;
    }

    pub(crate) fn fail(&mut self, message: String) {
        if self.is_terminal() {
            return;
        }
        self.status = ResearchStatus::Failed;
        self.error = Some(message);
        self.updated_at = Timestamp::now();
    }
}
