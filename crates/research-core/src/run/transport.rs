//! Boundary to the external workflow service.

use std::{fmt, future::Future};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc;

use super::stream::StreamItem;
use crate::{error::Result, models::HumanResponse};

/// Default buffer of an event subscription channel.
pub const SUBSCRIPTION_CAPACITY: usize = 64;

/// Identifier the workflow service assigns to a running handler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandlerId(pub String);

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Receiving end of a handler's event stream.
///
/// Dropping the subscription unsubscribes: the producing side sees a closed
/// channel on its next send and stops.
#[derive(Debug)]
pub struct EventSubscription {
    handler_id: HandlerId,
    receiver: mpsc::Receiver<StreamItem>,
}

/// Producing end of a handler's event stream.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<StreamItem>,
}

impl EventSubscription {
    /// Creates a connected sender/subscription pair.
    pub fn channel(handler_id: HandlerId, capacity: usize) -> (EventSender, Self) {
        let (sender, receiver) = mpsc::channel(capacity);
        (
            EventSender { sender },
            Self {
                handler_id,
                receiver,
            },
        )
    }

    pub fn handler_id(&self) -> &HandlerId {
        &self.handler_id
    }

    /// Waits for the next item; `None` once the producer is gone.
    pub async fn recv(&mut self) -> Option<StreamItem> {
        self.receiver.recv().await
    }
}

impl EventSender {
    /// Delivers one item. Returns `false` once the subscriber has gone away.
    pub async fn send(&self, item: StreamItem) -> bool {
        self.sender.send(item).await.is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Client of the workflow service.
///
/// Implementations create handlers for a named workflow, expose each
/// handler's event stream and relay human responses back to it.
pub trait WorkflowTransport {
    /// Starts a workflow and returns its handler.
    fn create_handler(
        &self,
        workflow: &str,
        input: Value,
    ) -> impl Future<Output = Result<HandlerId>> + Send;

    /// Opens the event stream of a handler.
    fn subscribe(&self, handler: &HandlerId)
        -> impl Future<Output = Result<EventSubscription>> + Send;

    /// Sends the user's answer to a waiting handler.
    fn send_human_response(
        &self,
        handler: &HandlerId,
        response: HumanResponse,
    ) -> impl Future<Output = Result<()>> + Send;
}
