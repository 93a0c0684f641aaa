//! In-process transport that replays a scripted stream.

use std::{
    sync::{
        atomic::{AtomicU64, AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use log::{debug, info};
use serde_json::Value;

use super::{
    stream::ScriptedStream,
    transport::{EventSubscription, HandlerId, WorkflowTransport, SUBSCRIPTION_CAPACITY},
};
use crate::{
    error::{ResearchError, Result},
    models::HumanResponse,
};

/// Transport that serves the same scripted stream to every handler.
///
/// Each subscription replays its own copy of the script on a spawned task,
/// optionally pausing between items. Responses sent to any handler are
/// recorded for inspection. Must be used inside a tokio runtime.
#[derive(Debug, Clone)]
pub struct MockTransport {
    script: ScriptedStream,
    delay: Option<Duration>,
    create_error: Option<String>,
    next_handler: Arc<AtomicU64>,
    abandoned: Arc<AtomicUsize>,
    responses: Arc<Mutex<Vec<HumanResponse>>>,
}

impl MockTransport {
    pub fn new(script: ScriptedStream) -> Self {
        Self {
            script,
            delay: None,
            create_error: None,
            next_handler: Arc::new(AtomicU64::new(0)),
            abandoned: Arc::new(AtomicUsize::new(0)),
            responses: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pauses for `delay` before delivering each item.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = (!delay.is_zero()).then_some(delay);
        self
    }

    /// Makes every `create_handler` call fail with `message`.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.create_error = Some(message.into());
        self
    }

    /// Responses received so far, oldest first.
    pub fn responses(&self) -> Vec<HumanResponse> {
        self.responses
            .lock()
            .map(|responses| responses.clone())
            .unwrap_or_default()
    }

    /// Number of streams that stopped early because their subscriber left.
    pub fn abandoned_streams(&self) -> usize {
        self.abandoned.load(Ordering::SeqCst)
    }

    /// Number of handlers created so far.
    pub fn handlers_created(&self) -> u64 {
        self.next_handler.load(Ordering::SeqCst)
    }
}

impl WorkflowTransport for MockTransport {
    async fn create_handler(&self, workflow: &str, _input: Value) -> Result<HandlerId> {
        if let Some(message) = &self.create_error {
            return Err(ResearchError::transport(message.clone()));
        }
        let n = self.next_handler.fetch_add(1, Ordering::SeqCst) + 1;
        let handler = HandlerId(format!("mock-handler-{n}"));
        debug!("Created {handler} for workflow {workflow}");
        Ok(handler)
    }

    async fn subscribe(&self, handler: &HandlerId) -> Result<EventSubscription> {
        let (sender, subscription) =
            EventSubscription::channel(handler.clone(), SUBSCRIPTION_CAPACITY);
        let script = self.script.clone();
        let delay = self.delay;
        let abandoned = Arc::clone(&self.abandoned);
        let handler = handler.clone();

        tokio::spawn(async move {
            for item in script {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                if !sender.send(item).await {
                    info!("Subscriber of {handler} went away; stopping stream");
                    abandoned.fetch_add(1, Ordering::SeqCst);
                    return;
                }
            }
            debug!("Stream of {handler} finished");
        });

        Ok(subscription)
    }

    async fn send_human_response(&self, handler: &HandlerId, response: HumanResponse) -> Result<()> {
        debug!("{handler} received response {:?}", response.response);
        self.responses
            .lock()
            .map_err(|_| ResearchError::transport("response log poisoned"))?
            .push(response);
        Ok(())
    }
}
