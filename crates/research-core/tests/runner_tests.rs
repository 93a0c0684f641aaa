mod common;

use std::time::Duration;

use common::*;
use pretty_assertions::assert_eq;
use research_core::{
    config::ORCHESTRATOR_WORKFLOW,
    fixtures::mock_research_run,
    run::{
        Applied, STATUS_COMPLETE, STATUS_STREAM_ERROR, STATUS_THINKING, STATUS_WAITING,
    },
    HumanResponse, MockTransport, ResearchError, ResearchStatus, RunRunner, ScriptedStream,
    SessionStore,
};
use serde_json::json;

fn runner(transport: MockTransport) -> RunRunner<MockTransport> {
    RunRunner::new(transport, ORCHESTRATOR_WORKFLOW, ResearchStatus::AwaitingApproval)
}

#[tokio::test]
async fn test_mock_research_run_completes() {
    let session = SessionStore::with_fixtures()
        .get("research_mock_001")
        .expect("fixture session");
    let mut runner = runner(MockTransport::new(mock_research_run(&session)));
    assert_eq!(runner.controller().status(), ResearchStatus::AwaitingApproval);

    runner
        .start(json!({ "research_id": session.research_id }), &session.report_markdown)
        .await
        .expect("Failed to start run");
    assert!(runner.is_subscribed());
    assert_eq!(runner.status_line(), STATUS_THINKING);

    let folded = runner.run_to_end().await;
    assert_eq!(folded, 9);

    let state = runner.state().expect("run state");
    assert_eq!(state.status(), ResearchStatus::Completed);
    assert_eq!(state.log().len(), 9);
    assert!(state.report_text().starts_with(&session.report_markdown));
    assert!(state.report_text().contains("## Landscape overview"));
    assert!(state.report_text().ends_with("retention policies."));
    assert_eq!(runner.status_line(), STATUS_COMPLETE);
    assert!(!runner.is_subscribed());
    assert_eq!(runner.transport().handlers_created(), 1);
}

#[tokio::test]
async fn test_new_run_supersedes_previous() {
    let transport = MockTransport::new(scripted(six_event_run()))
        .with_delay(Duration::from_millis(5));
    let mut runner = runner(transport);

    let first = runner.start(json!({}), "").await.expect("first run");
    assert_eq!(runner.next().await, Some(Applied::Folded));

    let second = runner.start(json!({}), "").await.expect("second run");
    assert!(second > first);
    assert_eq!(runner.handler_id().map(ToString::to_string).as_deref(), Some("mock-handler-2"));

    let state = runner.state().expect("run state");
    assert_eq!(state.run_id(), second);
    assert!(state.log().is_empty());

    assert_eq!(runner.run_to_end().await, 6);
    let state = runner.state().expect("run state");
    assert_eq!(state.log().len(), 6);
    assert_eq!(state.report_text(), "# R");

    // The first stream notices its subscriber is gone on its next send.
    let abandoned = tokio::time::timeout(Duration::from_secs(5), async {
        while runner.transport().abandoned_streams() == 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        runner.transport().abandoned_streams()
    })
    .await
    .expect("first stream was never abandoned");
    assert_eq!(abandoned, 1);
}

#[tokio::test]
async fn test_respond_sends_human_response() {
    let script = scripted(vec![input_required("Current Plan:\n1. Search\n2. Write")]);
    let mut runner = runner(MockTransport::new(script));

    runner.start(json!({}), "").await.expect("Failed to start run");
    assert_eq!(runner.next().await, Some(Applied::Folded));
    assert!(runner.state().expect("run state").awaiting_human());
    assert_eq!(runner.status_line(), STATUS_WAITING);

    runner.respond("accept").await.expect("Failed to respond");
    assert_eq!(runner.status_line(), STATUS_THINKING);
    assert!(!runner.state().expect("run state").awaiting_human());
    assert_eq!(
        runner.transport().responses(),
        vec![HumanResponse::new("accept")]
    );
}

#[tokio::test]
async fn test_stream_error_fails_run() {
    let mut script = ScriptedStream::new();
    script
        .push_event(agent_input("q"))
        .push_error("connection reset")
        .push_event(stop_completed());
    let mut runner = runner(MockTransport::new(script));

    runner.start(json!({}), "baseline").await.expect("Failed to start run");
    assert_eq!(runner.run_to_end().await, 2);

    let state = runner.state().expect("run state");
    assert_eq!(state.status(), ResearchStatus::Failed);
    assert_eq!(state.error(), Some("connection reset"));
    assert_eq!(state.log().len(), 1);
    assert_eq!(state.report_text(), "baseline");
    assert_eq!(runner.status_line(), STATUS_STREAM_ERROR);
    assert!(!runner.is_subscribed());
}

#[tokio::test]
async fn test_start_failure_is_reported_on_status_line() {
    let transport = MockTransport::new(scripted(six_event_run())).failing("deployment unavailable");
    let mut runner = runner(transport);

    let err = runner.start(json!({}), "").await.unwrap_err();
    assert!(matches!(err, ResearchError::Transport { .. }));
    assert!(runner
        .status_line()
        .starts_with("Error starting workflow: "));
    assert!(runner.status_line().contains("deployment unavailable"));
    assert!(!runner.is_subscribed());

    let state = runner.state().expect("run state");
    assert_eq!(state.status(), ResearchStatus::Running);
    assert!(state.log().is_empty());
}

#[tokio::test]
async fn test_respond_without_run_is_rejected() {
    let mut runner = runner(MockTransport::new(ScriptedStream::new()));
    let err = runner.respond("accept").await.unwrap_err();
    assert!(matches!(err, ResearchError::InvalidInput { .. }));
    assert!(runner.transport().responses().is_empty());
}
