#![allow(dead_code)]

use research_core::{
    models::{
        AgentInputData, ChatMessage, EventKind, StopEventData, ToolCallData, ToolCallResultData,
        ToolOutput, WorkflowCancelledData, WorkflowEvent, UPDATE_REPORT_TOOL,
    },
    ScriptedStream,
};
use serde_json::json;

/// Helper function to build a tool call event
pub fn tool_call(tool_name: &str, tool_id: &str) -> WorkflowEvent {
    WorkflowEvent::now(EventKind::ToolCall(ToolCallData {
        tool_name: tool_name.to_string(),
        tool_id: tool_id.to_string(),
        ..ToolCallData::default()
    }))
}

/// Helper function to build a tool result event, optionally carrying a report
pub fn tool_result(tool_name: &str, tool_id: &str, report: Option<&str>) -> WorkflowEvent {
    WorkflowEvent::now(EventKind::ToolCallResult(ToolCallResultData {
        tool_name: tool_name.to_string(),
        tool_id: tool_id.to_string(),
        tool_output: ToolOutput {
            content: "ok".to_string(),
            tool_name: tool_name.to_string(),
            ..ToolOutput::default()
        },
        new_report_markdown: report.map(str::to_string),
        ..ToolCallResultData::default()
    }))
}

pub fn report_update(body: &str) -> WorkflowEvent {
    tool_result(UPDATE_REPORT_TOOL, "call_update", Some(body))
}

pub fn agent_input(query: &str) -> WorkflowEvent {
    WorkflowEvent::now(EventKind::AgentInput(AgentInputData {
        input: vec![ChatMessage::new("user", query)],
        current_agent_name: "ResearchAgent".to_string(),
    }))
}

pub fn stop_completed() -> WorkflowEvent {
    WorkflowEvent::now(EventKind::StopEvent(StopEventData {
        result: Some(json!({ "status": "completed" })),
    }))
}

pub fn stop_without_result() -> WorkflowEvent {
    WorkflowEvent::now(EventKind::StopEvent(StopEventData::default()))
}

pub fn cancelled(reason: &str) -> WorkflowEvent {
    WorkflowEvent::now(EventKind::WorkflowCancelled(WorkflowCancelledData {
        reason: Some(reason.to_string()),
    }))
}

pub fn input_required(prompt: &str) -> WorkflowEvent {
    WorkflowEvent::now(EventKind::InputRequired {
        prompt: prompt.to_string(),
    })
}

/// The six-event research run: search, one report update, stop
pub fn six_event_run() -> Vec<WorkflowEvent> {
    vec![
        agent_input("q"),
        tool_call("web_search", "call_1"),
        tool_result("web_search", "call_1", None),
        tool_call(UPDATE_REPORT_TOOL, "call_2"),
        tool_result(UPDATE_REPORT_TOOL, "call_2", Some("# R")),
        stop_completed(),
    ]
}

pub fn scripted(events: Vec<WorkflowEvent>) -> ScriptedStream {
    ScriptedStream::from_events(events)
}
