//! Decoding of the workflow event protocol.
//!
//! The transport delivers `{ type: string, data: object }` envelopes. Kind
//! names may carry namespace qualifiers, so they are matched by suffix.
//! Anything outside the closed kind set decodes to
//! [`EventKind::Unrecognized`](crate::models::EventKind::Unrecognized) and is
//! still recorded in the run log.

pub mod decode;

pub use decode::{
    classify, decode_lines, decode_value, encode_lines, input_required_prompt, stop_result, KindTag,
    RawEvent,
};

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::{error::ResearchError, models::EventKind};

    #[test]
    fn test_classify_matches_by_suffix() {
        assert_eq!(classify("StopEvent"), KindTag::StopEvent);
        assert_eq!(classify("llama_index.core.workflow.StopEvent"), KindTag::StopEvent);
        assert_eq!(classify("ToolCallResult"), KindTag::ToolCallResult);
        assert_eq!(classify("agents.ToolCall"), KindTag::ToolCall);
        assert_eq!(classify("PlannerInputRequiredEvent"), KindTag::InputRequired);
        assert_eq!(classify("WorkflowCancelledEvent"), KindTag::WorkflowCancelled);
        assert_eq!(classify("ProgressEvent"), KindTag::Unrecognized);
    }

    #[test]
    fn test_prompt_read_from_nested_data() {
        let data = json!({ "_data": { "prefix": "Current Plan:\n1. A" } });
        assert_eq!(
            input_required_prompt("PlannerInputRequiredEvent", &data).as_deref(),
            Some("Current Plan:\n1. A")
        );
    }

    #[test]
    fn test_prompt_read_from_top_level() {
        let data = json!({ "prefix": "Shall I continue?" });
        assert_eq!(
            input_required_prompt("InputRequiredEvent", &data).as_deref(),
            Some("Shall I continue?")
        );
    }

    #[test]
    fn test_prompt_absent_or_empty_is_none() {
        assert_eq!(input_required_prompt("InputRequiredEvent", &json!({})), None);
        assert_eq!(
            input_required_prompt("InputRequiredEvent", &json!({ "_data": { "prefix": "" } })),
            None
        );
        assert_eq!(
            input_required_prompt("InputRequiredEvent", &json!({ "prefix": 42 })),
            None
        );
        assert_eq!(
            input_required_prompt("StopEvent", &json!({ "prefix": "x" })),
            None
        );
    }

    #[test]
    fn test_decode_tool_call_result() {
        let event = decode_value(json!({
            "ts": "2025-01-01T12:00:00Z",
            "type": "ToolCallResult",
            "data": {
                "tool_name": "update_report",
                "tool_id": "call_1",
                "tool_kwargs": { "max_update_size": 800 },
                "tool_output": { "content": "done", "tool_name": "update_report" },
                "return_direct": false,
                "new_report_markdown": "# R"
            }
        }))
        .unwrap();

        assert_eq!(event.report_update(), Some("# R"));
        assert_eq!(event.timestamp.to_string(), "2025-01-01T12:00:00Z");
        match event.kind {
            EventKind::ToolCallResult(result) => {
                assert_eq!(result.tool_id, "call_1");
                assert!(!result.tool_output.is_error);
                assert_eq!(result.tool_kwargs["max_update_size"], json!(800));
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_decode_stop_result_at_nested_depth() {
        let event = decode_value(json!({
            "type": "workflows.StopEvent",
            "data": { "_data": { "result": { "plan": "1. A" } } }
        }))
        .unwrap();

        match event.kind {
            EventKind::StopEvent(stop) => assert_eq!(stop.result, Some(json!({ "plan": "1. A" }))),
            other => panic!("unexpected kind: {other:?}"),
        }
        assert_eq!(event.type_name, "workflows.StopEvent");
    }

    #[test]
    fn test_decode_stop_result_beside_nested_data() {
        let event = decode_value(json!({
            "type": "StopEvent",
            "data": { "_data": {}, "result": { "status": "completed" } }
        }))
        .unwrap();

        match event.kind {
            EventKind::StopEvent(stop) => {
                assert_eq!(stop.result, Some(json!({ "status": "completed" })));
            }
            other => panic!("unexpected kind: {other:?}"),
        }
        assert_eq!(stop_result(&json!({ "result": null })), None);
    }

    #[test]
    fn test_decode_report_update_with_null_fields() {
        for field in ["tool_output", "return_direct", "tool_kwargs", "tool_id"] {
            let mut data = json!({
                "tool_name": "update_report",
                "new_report_markdown": "# R"
            });
            data[field] = json!(null);

            let event = decode_value(json!({ "type": "ToolCallResult", "data": data })).unwrap();
            assert_eq!(event.report_update(), Some("# R"), "null {field}");
        }

        let event = decode_value(json!({
            "type": "ToolCallResult",
            "data": {
                "tool_name": "update_report",
                "tool_output": { "content": "ok", "is_error": null },
                "new_report_markdown": "# R"
            }
        }))
        .unwrap();
        assert_eq!(event.report_update(), Some("# R"));
    }

    #[test]
    fn test_decode_report_update_survives_malformed_field() {
        let event = decode_value(json!({
            "type": "ToolCallResult",
            "data": {
                "tool_name": "update_report",
                "tool_output": "not an object",
                "new_report_markdown": "# R"
            }
        }))
        .unwrap();
        assert_eq!(event.report_update(), Some("# R"));
    }

    #[test]
    fn test_decode_unknown_kind_is_kept() {
        let event = decode_value(json!({ "type": "ProgressEvent", "data": { "pct": 40 } })).unwrap();
        assert_eq!(
            event.kind,
            EventKind::Unrecognized {
                type_name: "ProgressEvent".to_string()
            }
        );
        assert_eq!(event.data, json!({ "pct": 40 }));
    }

    #[test]
    fn test_decode_input_required_without_prompt_is_unrecognized() {
        let event = decode_value(json!({ "type": "InputRequiredEvent", "data": {} })).unwrap();
        assert!(matches!(event.kind, EventKind::Unrecognized { .. }));
    }

    #[test]
    fn test_decode_malformed_payload_uses_defaults() {
        let event = decode_value(json!({ "type": "ToolCall", "data": { "tool_name": 7 } })).unwrap();
        match event.kind {
            EventKind::ToolCall(call) => assert_eq!(call.tool_name, ""),
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_non_envelope() {
        assert!(matches!(
            decode_value(json!([1, 2])),
            Err(ResearchError::InvalidEvent { .. })
        ));
        assert!(matches!(
            decode_value(json!({ "data": {} })),
            Err(ResearchError::InvalidEvent { .. })
        ));
    }

    #[test]
    fn test_decode_lines_reports_line_number() {
        let text = "{\"type\":\"AgentInput\",\"data\":{}}\n\nnot json\n";
        match decode_lines(text) {
            Err(ResearchError::InvalidEvent { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected invalid event, got {other:?}"),
        }
    }

    #[test]
    fn test_encode_then_decode_lines_preserves_order() {
        let text = concat!(
            "{\"type\":\"AgentInput\",\"data\":{\"input\":[{\"role\":\"user\",\"content\":\"q\"}]}}\n",
            "{\"type\":\"ToolCall\",\"data\":{\"tool_name\":\"web_search\"}}\n",
            "{\"type\":\"StopEvent\",\"data\":{\"result\":{\"status\":\"completed\"}}}\n",
        );
        let events = decode_lines(text).unwrap();
        let again = decode_lines(&encode_lines(&events).unwrap()).unwrap();

        let names: Vec<&str> = again.iter().map(|e| e.type_name.as_str()).collect();
        assert_eq!(names, vec!["AgentInput", "ToolCall", "StopEvent"]);
        assert_eq!(again[0].timestamp, events[0].timestamp);
    }
}
