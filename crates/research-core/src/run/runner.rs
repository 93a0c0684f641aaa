//! Async driver tying a transport to a [`RunController`].

use log::{info, warn};
use serde_json::Value;

use super::{
    controller::{Applied, RunController},
    stream::StreamItem,
    transport::{EventSubscription, HandlerId, WorkflowTransport},
};
use crate::{
    error::{ResearchError, Result},
    models::ResearchStatus,
    state::{RunId, RunState},
};

pub const STATUS_STARTING: &str = "Starting workflow...";
pub const STATUS_THINKING: &str = "Agent is thinking...";
pub const STATUS_WAITING: &str = "Waiting for your response...";
pub const STATUS_COMPLETE: &str = "Run complete.";
pub const STATUS_STREAM_ERROR: &str = "Stream error occurred.";
pub const STATUS_SEND_ERROR: &str = "Error sending response.";

/// Drives one session's runs against a workflow transport.
///
/// At most one subscription is held at a time. Starting a new run drops the
/// previous subscription before anything else happens, and dropping the
/// runner drops the current one.
pub struct RunRunner<T> {
    transport: T,
    workflow: String,
    controller: RunController,
    handler: Option<HandlerId>,
    subscription: Option<(RunId, EventSubscription)>,
    status_line: String,
}

impl<T: WorkflowTransport> RunRunner<T> {
    /// Creates a runner for the named workflow.
    pub fn new(transport: T, workflow: impl Into<String>, phase: ResearchStatus) -> Self {
        Self {
            transport,
            workflow: workflow.into(),
            controller: RunController::new(phase),
            handler: None,
            subscription: None,
            status_line: STATUS_STARTING.to_string(),
        }
    }

    /// Starts a new run and subscribes to its events.
    ///
    /// # Errors
    ///
    /// Returns the transport's error when the workflow cannot be created or
    /// subscribed to. The failure is also reflected in
    /// [`status_line`](Self::status_line); the runner stays usable.
    pub async fn start(&mut self, input: Value, baseline_report: &str) -> Result<RunId> {
        self.unsubscribe();
        self.handler = None;
        let run_id = self.controller.start_run(baseline_report);
        self.status_line = STATUS_STARTING.to_string();

        let handler = match self.transport.create_handler(&self.workflow, input).await {
            Ok(handler) => handler,
            Err(e) => {
                warn!("Failed to start {} workflow: {e}", self.workflow);
                self.status_line = format!("Error starting workflow: {e}");
                return Err(e);
            }
        };

        let subscription = match self.transport.subscribe(&handler).await {
            Ok(subscription) => subscription,
            Err(e) => {
                warn!("Failed to subscribe to {handler}: {e}");
                self.status_line = format!("Error starting workflow: {e}");
                return Err(e);
            }
        };

        info!("{run_id} started on handler {handler}");
        self.handler = Some(handler);
        self.subscription = Some((run_id, subscription));
        self.status_line = STATUS_THINKING.to_string();
        Ok(run_id)
    }

    /// Waits for the next stream item and folds it.
    ///
    /// Returns `None` once there is no subscription or the stream has ended.
    pub async fn next(&mut self) -> Option<Applied> {
        let (run_id, subscription) = self.subscription.as_mut()?;
        let run_id = *run_id;
        let item = subscription.recv().await;

        match item {
            Some(StreamItem::Event(event)) => {
                let applied = self.controller.apply(run_id, event);
                self.refresh_status_line();
                Some(applied)
            }
            Some(StreamItem::Error(message)) => {
                warn!("{run_id} stream error: {message}");
                let applied = self.controller.fail(run_id, message);
                self.status_line = STATUS_STREAM_ERROR.to_string();
                self.unsubscribe();
                Some(applied)
            }
            None => {
                self.unsubscribe();
                None
            }
        }
    }

    /// Folds items until the stream ends, returning how many were folded.
    pub async fn run_to_end(&mut self) -> usize {
        let mut folded = 0;
        while let Some(applied) = self.next().await {
            if applied == Applied::Folded {
                folded += 1;
            }
        }
        folded
    }

    /// Records the user's answer and sends it to the active handler.
    ///
    /// # Errors
    ///
    /// Returns `ResearchError::InvalidInput` when no run is active and the
    /// transport's error when sending fails.
    pub async fn respond(&mut self, response: &str) -> Result<()> {
        let message = self.controller.submit_response(response)?;
        self.status_line = STATUS_THINKING.to_string();

        let Some(handler) = self.handler.as_ref() else {
            self.status_line = STATUS_SEND_ERROR.to_string();
            return Err(ResearchError::transport("no active handler"));
        };

        if let Err(e) = self.transport.send_human_response(handler, message).await {
            warn!("Failed to send response to {handler}: {e}");
            self.status_line = STATUS_SEND_ERROR.to_string();
            return Err(e);
        }
        Ok(())
    }

    /// Drops the current subscription, if any.
    pub fn unsubscribe(&mut self) {
        if let Some((run_id, subscription)) = self.subscription.take() {
            info!("{run_id} unsubscribed from {}", subscription.handler_id());
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn state(&self) -> Option<&RunState> {
        self.controller.state()
    }

    pub fn controller(&self) -> &RunController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut RunController {
        &mut self.controller
    }

    pub fn handler_id(&self) -> Option<&HandlerId> {
        self.handler.as_ref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// One-line description of what the run is doing.
    pub fn status_line(&self) -> &str {
        &self.status_line
    }

    fn refresh_status_line(&mut self) {
        let Some(state) = self.controller.state() else {
            return;
        };
        let line = match state.status() {
            ResearchStatus::Completed => STATUS_COMPLETE,
            ResearchStatus::Failed => STATUS_STREAM_ERROR,
            _ if state.awaiting_human() => STATUS_WAITING,
            _ => STATUS_THINKING,
        };
        self.status_line = line.to_string();
    }
}
