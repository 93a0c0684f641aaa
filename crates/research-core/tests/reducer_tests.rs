mod common;

use common::*;
use pretty_assertions::assert_eq;
use research_core::{
    events::{decode_lines, decode_value},
    models::{EventKind, UPDATE_REPORT_TOOL},
    reducer,
    run::{Applied, StreamItem},
    LogEntry, ResearchStatus, RunController, RunId, RunState,
};

#[test]
fn test_six_event_run_completes_with_report() {
    let state = reducer::replay(RunState::new(RunId(1), ""), six_event_run());

    assert_eq!(state.status(), ResearchStatus::Completed);
    assert_eq!(state.report_text(), "# R");
    assert_eq!(state.log().len(), 6);
    assert!(!state.awaiting_human());
}

#[test]
fn test_log_preserves_arrival_order() {
    let events = six_event_run();
    let expected: Vec<String> = events.iter().map(|e| e.type_name.clone()).collect();

    let state = reducer::replay(RunState::new(RunId(1), ""), events);
    let labels: Vec<String> = state.log().iter().map(|e| e.label().to_string()).collect();

    assert_eq!(labels, expected);
}

#[test]
fn test_report_last_write_wins() {
    let state = reducer::replay(
        RunState::new(RunId(1), "baseline"),
        [report_update("X"), agent_input("more"), report_update("Y")],
    );
    assert_eq!(state.report_text(), "Y");
    assert_eq!(state.status(), ResearchStatus::Running);
}

#[test]
fn test_empty_or_foreign_results_keep_report() {
    let state = reducer::replay(
        RunState::new(RunId(1), "baseline"),
        [
            tool_result(UPDATE_REPORT_TOOL, "call_1", Some("")),
            tool_result("web_search", "call_2", Some("# Not a report")),
        ],
    );
    assert_eq!(state.report_text(), "baseline");
    assert_eq!(state.log().len(), 2);
}

#[test]
fn test_cancelled_event_is_only_logged() {
    let mut state = reducer::replay(RunState::new(RunId(1), "baseline"), [agent_input("q")]);
    reducer::reduce(&mut state, cancelled("user closed the session"));

    assert_eq!(state.status(), ResearchStatus::Running);
    assert_eq!(state.report_text(), "baseline");
    assert_eq!(state.log().len(), 2);
    assert!(state.was_cancelled());
}

#[test]
fn test_stop_without_result_keeps_running() {
    let state = reducer::replay(
        RunState::new(RunId(1), ""),
        [agent_input("q"), stop_without_result()],
    );

    assert_eq!(state.status(), ResearchStatus::Running);
    assert_eq!(state.result(), None);
    assert_eq!(state.log().len(), 2);
}

#[test]
fn test_decoded_report_update_with_null_fields_replaces_report() {
    let events = ["tool_output", "return_direct"].map(|field| {
        let mut data = serde_json::json!({
            "tool_name": "update_report",
            "new_report_markdown": format!("# R after null {field}")
        });
        data[field] = serde_json::Value::Null;
        decode_value(serde_json::json!({ "type": "ToolCallResult", "data": data })).unwrap()
    });

    let state = reducer::replay(RunState::new(RunId(1), "base"), events);
    assert_eq!(state.report_text(), "# R after null return_direct");
}

#[test]
fn test_decoded_stop_result_beside_nested_data_completes() {
    let stop = decode_value(serde_json::json!({
        "type": "StopEvent",
        "data": { "_data": {}, "result": { "status": "completed" } }
    }))
    .unwrap();

    let state = reducer::replay(RunState::new(RunId(1), ""), [stop]);
    assert_eq!(state.status(), ResearchStatus::Completed);
}

#[test]
fn test_terminal_state_is_absorbing() {
    let mut state = reducer::replay(RunState::new(RunId(1), ""), six_event_run());
    reducer::reduce(&mut state, report_update("# Late"));
    reducer::reduce(&mut state, input_required("Anything else?"));

    assert_eq!(state.status(), ResearchStatus::Completed);
    assert_eq!(state.report_text(), "# R");
    assert!(!state.awaiting_human());
    assert_eq!(state.log().len(), 8);
}

#[test]
fn test_question_and_answer_round() {
    let mut state = RunState::new(RunId(1), "");
    reducer::reduce(&mut state, input_required("Current Plan:\n1. A\n2. B"));
    assert!(state.awaiting_human());
    assert_eq!(state.status_label(), "waiting for input");

    let response = reducer::submit_response(&mut state, "accept");
    assert_eq!(response.name, "HumanResponseEvent");
    assert_eq!(response.response, "accept");
    assert!(!state.awaiting_human());

    assert!(matches!(state.log()[0], LogEntry::Agent { .. }));
    assert!(matches!(state.log()[1], LogEntry::User { .. }));
}

#[test]
fn test_stream_error_fails_run_and_keeps_log() {
    let mut state = reducer::replay(
        RunState::new(RunId(1), ""),
        [agent_input("q"), report_update("# Partial")],
    );
    reducer::fail(&mut state, "connection reset");

    assert_eq!(state.status(), ResearchStatus::Failed);
    assert_eq!(state.error(), Some("connection reset"));
    assert_eq!(state.report_text(), "# Partial");
    assert_eq!(state.log().len(), 2);
}

#[test]
fn test_superseded_run_event_is_not_logged() {
    let mut controller = RunController::default();
    let first = controller.start_run("");
    let second = controller.start_run("");

    assert_eq!(controller.apply(first, agent_input("stale")), Applied::Discarded);
    assert_eq!(controller.apply(second, agent_input("fresh")), Applied::Folded);

    let state = controller.state().unwrap();
    assert_eq!(state.run_id(), second);
    assert_eq!(state.log().len(), 1);
}

#[test]
fn test_scripted_stream_steps_deterministically() {
    let mut stream = scripted(six_event_run());
    let mut state = RunState::new(RunId(1), "");
    let mut seen = 0;

    while let Some(StreamItem::Event(event)) = stream.next_item() {
        reducer::reduce(&mut state, event);
        seen += 1;
        assert_eq!(state.log().len(), seen);
        if seen == 5 {
            assert_eq!(state.report_text(), "# R");
            assert_eq!(state.status(), ResearchStatus::Running);
        }
    }
    assert_eq!(state.status(), ResearchStatus::Completed);
}

#[test]
fn test_recorded_stream_with_unknown_kinds() {
    let recorded = r##"
{"type": "workflows.events.AgentInput", "data": {"input": [{"role": "user", "content": "q"}], "current_agent_name": "ResearchAgent"}}
{"type": "ProgressEvent", "data": {"pct": 50}}
{"type": "ToolCallResult", "data": {"tool_name": "update_report", "new_report_markdown": "# From disk"}}
{"type": "llama_index.core.workflow.events.StopEvent", "data": {"result": {"status": "completed"}}}
"##;
    let events = decode_lines(recorded).unwrap();
    let state = reducer::replay(RunState::new(RunId(1), ""), events);

    assert_eq!(state.log().len(), 4);
    assert_eq!(state.log()[1].label(), "ProgressEvent");
    assert!(matches!(
        state.log()[1].as_event().map(|e| &e.kind),
        Some(EventKind::Unrecognized { .. })
    ));
    assert_eq!(state.report_text(), "# From disk");
    assert_eq!(state.status(), ResearchStatus::Completed);
}
