//! Deterministic event sequences.

use std::collections::VecDeque;

use crate::models::WorkflowEvent;

/// One item delivered by an event subscription.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamItem {
    Event(WorkflowEvent),
    /// Transport-level failure; ends the stream
    Error(String),
}

/// A queue of stream items a test or a mock transport steps through one at a
/// time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptedStream {
    items: VecDeque<StreamItem>,
}

impl ScriptedStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = WorkflowEvent>,
    {
        Self {
            items: events.into_iter().map(StreamItem::Event).collect(),
        }
    }

    pub fn push_event(&mut self, event: WorkflowEvent) -> &mut Self {
        self.items.push_back(StreamItem::Event(event));
        self
    }

    pub fn push_error(&mut self, message: impl Into<String>) -> &mut Self {
        self.items.push_back(StreamItem::Error(message.into()));
        self
    }

    /// Takes the next item, if any.
    pub fn next_item(&mut self) -> Option<StreamItem> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Events still queued, skipping errors.
    pub fn events(&self) -> impl Iterator<Item = &WorkflowEvent> {
        self.items.iter().filter_map(|item| match item {
            StreamItem::Event(event) => Some(event),
            StreamItem::Error(_) => None,
        })
    }
}

impl Iterator for ScriptedStream {
    type Item = StreamItem;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_item()
    }
}
