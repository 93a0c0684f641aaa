//! Boundary decoding of `{ type, data }` envelopes into typed events.

use jiff::Timestamp;
use log::warn;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{ResearchError, Result},
    models::{EventKind, StopEventData, ToolCallResultData, WorkflowEvent},
};

/// Key under which some transports nest the event payload.
const NESTED_DATA_KEY: &str = "_data";

/// Envelope as delivered by the workflow transport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawEvent {
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub data: Value,

    /// Observation time, when the producer recorded one
    #[serde(default, alias = "timestamp", skip_serializing_if = "Option::is_none")]
    pub ts: Option<Timestamp>,
}

/// Kind family recognized from a type string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindTag {
    AgentInput,
    AgentStream,
    ToolCall,
    ToolCallResult,
    AgentOutput,
    StopEvent,
    WorkflowCancelled,
    InputRequired,
    Unrecognized,
}

/// Suffixes are checked in order; longer names sharing a tail come first.
const SUFFIXES: &[(&str, KindTag)] = &[
    ("InputRequiredEvent", KindTag::InputRequired),
    ("StopEvent", KindTag::StopEvent),
    ("WorkflowCancelledEvent", KindTag::WorkflowCancelled),
    ("WorkflowCancelled", KindTag::WorkflowCancelled),
    ("ToolCallResult", KindTag::ToolCallResult),
    ("ToolCall", KindTag::ToolCall),
    ("AgentStream", KindTag::AgentStream),
    ("AgentInput", KindTag::AgentInput),
    ("AgentOutput", KindTag::AgentOutput),
];

/// Classifies a type string by suffix, so namespace-qualified names such as
/// `workflows.events.StopEvent` match their bare kind.
pub fn classify(type_name: &str) -> KindTag {
    SUFFIXES
        .iter()
        .find(|(suffix, _)| type_name.ends_with(suffix))
        .map_or(KindTag::Unrecognized, |(_, tag)| *tag)
}

/// The object holding the event fields: `data._data` when present,
/// otherwise `data` itself.
fn payload_object(data: &Value) -> &Value {
    match data.get(NESTED_DATA_KEY) {
        Some(nested @ Value::Object(_)) => nested,
        _ => data,
    }
}

/// Reads the human-readable prompt of an input-required event.
///
/// The prompt is looked up at `data._data.prefix` and then `data.prefix`.
/// Returns `None` for other kinds or when the prompt is missing, not a
/// string, or empty.
pub fn input_required_prompt(type_name: &str, data: &Value) -> Option<String> {
    if classify(type_name) != KindTag::InputRequired {
        return None;
    }

    [
        data.get(NESTED_DATA_KEY).and_then(|nested| nested.get("prefix")),
        data.get("prefix"),
    ]
    .into_iter()
    .flatten()
    .find_map(|value| value.as_str().filter(|s| !s.is_empty()))
    .map(str::to_string)
}

/// Reads the result of a stop event from `data._data.result`, then
/// `data.result`. A `null` result counts as missing.
pub fn stop_result(data: &Value) -> Option<Value> {
    [
        data.get(NESTED_DATA_KEY).and_then(|nested| nested.get("result")),
        data.get("result"),
    ]
    .into_iter()
    .flatten()
    .find(|value| !value.is_null())
    .cloned()
}

fn try_payload<T: DeserializeOwned + Default>(type_name: &str, fields: &Value) -> Option<T> {
    if fields.is_null() {
        return Some(T::default());
    }
    match serde_json::from_value(fields.clone()) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            warn!("Malformed {type_name} payload: {e}");
            None
        }
    }
}

fn payload<T: DeserializeOwned + Default>(type_name: &str, data: &Value) -> T {
    try_payload(type_name, payload_object(data)).unwrap_or_default()
}

fn string_field(fields: &Value, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Tool results keep their name, id and report body even when another field
/// has an unexpected shape.
fn tool_result_payload(type_name: &str, data: &Value) -> ToolCallResultData {
    let fields = payload_object(data);
    try_payload(type_name, fields).unwrap_or_else(|| ToolCallResultData {
        tool_name: string_field(fields, "tool_name").unwrap_or_default(),
        tool_id: string_field(fields, "tool_id").unwrap_or_default(),
        new_report_markdown: string_field(fields, "new_report_markdown"),
        ..ToolCallResultData::default()
    })
}

impl From<RawEvent> for WorkflowEvent {
    fn from(raw: RawEvent) -> Self {
        let RawEvent { type_name, data, ts } = raw;
        let name = type_name.as_str();

        let kind = match classify(name) {
            KindTag::AgentInput => EventKind::AgentInput(payload(name, &data)),
            KindTag::AgentStream => EventKind::AgentStream(payload(name, &data)),
            KindTag::ToolCall => EventKind::ToolCall(payload(name, &data)),
            KindTag::ToolCallResult => EventKind::ToolCallResult(tool_result_payload(name, &data)),
            KindTag::AgentOutput => EventKind::AgentOutput(payload(name, &data)),
            KindTag::StopEvent => EventKind::StopEvent(StopEventData {
                result: stop_result(&data),
            }),
            KindTag::WorkflowCancelled => EventKind::WorkflowCancelled(payload(name, &data)),
            KindTag::InputRequired => match input_required_prompt(name, &data) {
                Some(prompt) => EventKind::InputRequired { prompt },
                None => EventKind::Unrecognized {
                    type_name: type_name.clone(),
                },
            },
            KindTag::Unrecognized => EventKind::Unrecognized {
                type_name: type_name.clone(),
            },
        };

        WorkflowEvent {
            timestamp: ts.unwrap_or_else(Timestamp::now),
            type_name,
            data,
            kind,
        }
    }
}

/// Decodes one envelope from a JSON value.
///
/// # Errors
///
/// Returns `ResearchError::InvalidEvent` when the value is not an object with
/// a string `type`.
pub fn decode_value(value: Value) -> Result<WorkflowEvent> {
    decode_value_at(value, 1)
}

fn decode_value_at(value: Value, line: usize) -> Result<WorkflowEvent> {
    if !value.is_object() {
        return Err(ResearchError::InvalidEvent {
            line,
            reason: "event envelope must be a JSON object".to_string(),
        });
    }
    let raw: RawEvent = serde_json::from_value(value).map_err(|e| ResearchError::InvalidEvent {
        line,
        reason: e.to_string(),
    })?;
    Ok(raw.into())
}

/// Decodes a JSON-lines stream, one envelope per non-blank line.
///
/// # Errors
///
/// Returns `ResearchError::InvalidEvent` with the 1-based line number of the
/// first line that is not valid JSON or not an envelope.
pub fn decode_lines(text: &str) -> Result<Vec<WorkflowEvent>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            let value: Value =
                serde_json::from_str(line).map_err(|e| ResearchError::InvalidEvent {
                    line: idx + 1,
                    reason: e.to_string(),
                })?;
            decode_value_at(value, idx + 1)
        })
        .collect()
}

/// Encodes events as JSON lines, the inverse of [`decode_lines`].
///
/// # Errors
///
/// Returns `ResearchError::Serialization` if an event cannot be encoded.
pub fn encode_lines(events: &[WorkflowEvent]) -> Result<String> {
    let mut out = String::new();
    for event in events {
        out.push_str(&serde_json::to_string(event)?);
        out.push('\n');
    }
    Ok(out)
}
