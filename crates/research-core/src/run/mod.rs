//! Run lifecycle: supersession, scripted streams and the transport boundary.
//!
//! A [`RunController`] owns the state of the latest run and discards events
//! from runs it has superseded. [`RunRunner`] drives a controller from a
//! [`WorkflowTransport`], holding at most one [`EventSubscription`].
//! [`ScriptedStream`] and [`MockTransport`] provide deterministic sequences
//! for tests and local development.

pub mod controller;
pub mod mock;
pub mod runner;
pub mod stream;
pub mod transport;

pub use controller::{Applied, RunController};
pub use mock::MockTransport;
pub use runner::{
    RunRunner, STATUS_COMPLETE, STATUS_SEND_ERROR, STATUS_STARTING, STATUS_STREAM_ERROR,
    STATUS_THINKING, STATUS_WAITING,
};
pub use stream::{ScriptedStream, StreamItem};
pub use transport::{
    EventSender, EventSubscription, HandlerId, WorkflowTransport, SUBSCRIPTION_CAPACITY,
};

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{
        EventKind, ResearchStatus, StopEventData, ToolCallResultData, WorkflowEvent,
        UPDATE_REPORT_TOOL,
    };

    fn report_event(body: &str) -> WorkflowEvent {
        WorkflowEvent::now(EventKind::ToolCallResult(ToolCallResultData {
            tool_name: UPDATE_REPORT_TOOL.to_string(),
            new_report_markdown: Some(body.to_string()),
            ..ToolCallResultData::default()
        }))
    }

    #[test]
    fn test_controller_reports_phase_before_first_run() {
        let mut controller = RunController::new(ResearchStatus::AwaitingApproval);
        assert_eq!(controller.status(), ResearchStatus::AwaitingApproval);
        assert_eq!(controller.current_run(), None);

        controller.start_run("");
        assert_eq!(controller.status(), ResearchStatus::Running);
    }

    #[test]
    fn test_controller_discards_superseded_run() {
        let mut controller = RunController::default();
        let first = controller.start_run("base");
        let second = controller.start_run("base");
        assert!(second > first);

        assert_eq!(
            controller.apply(first, report_event("# stale")),
            Applied::Discarded
        );
        assert_eq!(controller.fail(first, "boom"), Applied::Discarded);

        let state = controller.state().unwrap();
        assert_eq!(state.report_text(), "base");
        assert_eq!(state.status(), ResearchStatus::Running);
        assert!(state.log().is_empty());

        assert_eq!(
            controller.apply(second, report_event("# fresh")),
            Applied::Folded
        );
        assert_eq!(controller.state().unwrap().report_text(), "# fresh");
    }

    #[test]
    fn test_controller_submit_without_run_is_rejected() {
        let mut controller = RunController::default();
        assert!(controller.submit_response("accept").is_err());
    }

    #[test]
    fn test_scripted_stream_steps_in_order() {
        let mut stream = ScriptedStream::new();
        stream
            .push_event(report_event("# one"))
            .push_error("dropped")
            .push_event(WorkflowEvent::now(EventKind::StopEvent(
                StopEventData::default(),
            )));

        assert_eq!(stream.len(), 3);
        assert_eq!(stream.events().count(), 2);

        assert!(matches!(stream.next_item(), Some(StreamItem::Event(_))));
        assert_eq!(
            stream.next_item(),
            Some(StreamItem::Error("dropped".to_string()))
        );
        assert!(matches!(stream.next_item(), Some(StreamItem::Event(_))));
        assert!(stream.is_empty());
        assert_eq!(stream.next_item(), None);
    }

    #[tokio::test]
    async fn test_dropped_subscription_closes_sender() {
        let (sender, subscription) =
            EventSubscription::channel(HandlerId("h-1".to_string()), 4);
        assert!(!sender.is_closed());
        drop(subscription);
        assert!(sender.is_closed());
        assert!(
            !sender
                .send(StreamItem::Error("late".to_string()))
                .await
        );
    }
}
