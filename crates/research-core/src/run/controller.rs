//! Run supersession and session phase bookkeeping.

use log::debug;

use crate::{
    error::{ResearchError, Result},
    models::{HumanResponse, ResearchStatus, WorkflowEvent},
    reducer,
    state::{RunId, RunState},
};

/// Outcome of offering an item to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The item belonged to the current run and was folded
    Folded,
    /// The item belonged to a superseded run and was dropped
    Discarded,
}

/// Owns the state of the latest run of one session.
///
/// Every [`start_run`](Self::start_run) hands out a larger [`RunId`] and
/// throws away the previous state. Items tagged with an older id are
/// discarded without error.
#[derive(Debug, Clone)]
pub struct RunController {
    latest: RunId,
    phase: ResearchStatus,
    state: Option<RunState>,
}

impl RunController {
    /// Creates a controller for a session in the given phase.
    pub fn new(phase: ResearchStatus) -> Self {
        Self {
            latest: RunId::default(),
            phase,
            state: None,
        }
    }

    /// Effective status: the run's status once a run exists, otherwise the
    /// session phase.
    pub fn status(&self) -> ResearchStatus {
        self.state.as_ref().map_or(self.phase, RunState::status)
    }

    /// Sets the pre-run phase (`planning` or `awaiting_approval`).
    pub fn set_phase(&mut self, phase: ResearchStatus) {
        self.phase = phase;
    }

    /// Starts a new run, invalidating the previous one.
    pub fn start_run(&mut self, baseline_report: &str) -> RunId {
        self.latest = self.latest.next();
        if let Some(previous) = &self.state {
            debug!("{} superseded by {}", previous.run_id(), self.latest);
        }
        self.state = Some(RunState::new(self.latest, baseline_report));
        self.latest
    }

    pub fn current_run(&self) -> Option<RunId> {
        self.state.as_ref().map(RunState::run_id)
    }

    pub fn is_current(&self, run_id: RunId) -> bool {
        self.current_run() == Some(run_id)
    }

    pub fn state(&self) -> Option<&RunState> {
        self.state.as_ref()
    }

    fn current_state(&mut self, run_id: RunId) -> Option<&mut RunState> {
        self.state.as_mut().filter(|state| state.run_id() == run_id)
    }

    /// Folds an event if it belongs to the current run.
    pub fn apply(&mut self, run_id: RunId, event: WorkflowEvent) -> Applied {
        match self.current_state(run_id) {
            Some(state) => {
                reducer::reduce(state, event);
                Applied::Folded
            }
            None => {
                debug!("Discarding {} event from {run_id}", event.type_name);
                Applied::Discarded
            }
        }
    }

    /// Records a stream error if it belongs to the current run.
    pub fn fail(&mut self, run_id: RunId, message: impl Into<String>) -> Applied {
        match self.current_state(run_id) {
            Some(state) => {
                reducer::fail(state, message);
                Applied::Folded
            }
            None => Applied::Discarded,
        }
    }

    /// Records the user's answer on the current run.
    ///
    /// # Errors
    ///
    /// Returns `ResearchError::InvalidInput` if no run has been started.
    pub fn submit_response(&mut self, response: &str) -> Result<HumanResponse> {
        let state = self.state.as_mut().ok_or_else(|| {
            ResearchError::invalid_input("response").with_reason("no run has been started")
        })?;
        Ok(reducer::submit_response(state, response))
    }
}

impl Default for RunController {
    fn default() -> Self {
        Self::new(ResearchStatus::Planning)
    }
}
