//! Workflow event model.
//!
//! Events arrive from the workflow transport as `{ type, data }` envelopes.
//! They are decoded once at the boundary (see [`crate::events`]) into a
//! [`WorkflowEvent`] whose [`EventKind`] carries a typed payload. The raw
//! `data` object is kept alongside so the run log can show exactly what the
//! agent sent.

use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};

/// Name of the tool whose results carry the authoritative report body.
pub const UPDATE_REPORT_TOOL: &str = "update_report";

/// Reads an explicit `null` as the field's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A role/content pair exchanged with the agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChatMessage {
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Reference to a tool call announced by the agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToolCallRef {
    #[serde(deserialize_with = "null_as_default")]
    pub tool_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tool_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AgentInputData {
    #[serde(deserialize_with = "null_as_default")]
    pub input: Vec<ChatMessage>,
    #[serde(deserialize_with = "null_as_default")]
    pub current_agent_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AgentStreamData {
    #[serde(deserialize_with = "null_as_default")]
    pub delta: String,
    #[serde(deserialize_with = "null_as_default")]
    pub response: String,
    #[serde(deserialize_with = "null_as_default")]
    pub current_agent_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCallRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking_delta: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToolCallData {
    #[serde(deserialize_with = "null_as_default")]
    pub tool_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tool_kwargs: Map<String, Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub tool_id: String,
}

/// Output of a tool invocation as reported by the agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToolOutput {
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tool_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_input: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_error: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToolCallResultData {
    #[serde(deserialize_with = "null_as_default")]
    pub tool_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tool_kwargs: Map<String, Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub tool_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tool_output: ToolOutput,
    #[serde(deserialize_with = "null_as_default")]
    pub return_direct: bool,
    /// Full report body after an `update_report` call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_report_markdown: Option<String>,
}

impl ToolCallResultData {
    /// The replacement report body, if this result is a non-empty report
    /// update.
    pub fn report_update(&self) -> Option<&str> {
        if self.tool_name != UPDATE_REPORT_TOOL {
            return None;
        }
        self.new_report_markdown
            .as_deref()
            .filter(|body| !body.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AgentOutputData {
    #[serde(deserialize_with = "null_as_default")]
    pub response: ChatMessage,
    #[serde(deserialize_with = "null_as_default")]
    pub current_agent_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCallRef>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StopEventData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkflowCancelledData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Closed set of event kinds, each with its own payload.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    AgentInput(AgentInputData),
    AgentStream(AgentStreamData),
    ToolCall(ToolCallData),
    ToolCallResult(ToolCallResultData),
    AgentOutput(AgentOutputData),
    StopEvent(StopEventData),
    WorkflowCancelled(WorkflowCancelledData),
    /// The agent asks the human a question
    InputRequired { prompt: String },
    /// Any kind outside the closed set; recorded but otherwise ignored
    Unrecognized { type_name: String },
}

impl EventKind {
    /// Canonical wire name for this kind.
    pub fn wire_name(&self) -> &str {
        match self {
            EventKind::AgentInput(_) => "AgentInput",
            EventKind::AgentStream(_) => "AgentStream",
            EventKind::ToolCall(_) => "ToolCall",
            EventKind::ToolCallResult(_) => "ToolCallResult",
            EventKind::AgentOutput(_) => "AgentOutput",
            EventKind::StopEvent(_) => "StopEvent",
            EventKind::WorkflowCancelled(_) => "WorkflowCancelledEvent",
            EventKind::InputRequired { .. } => "InputRequiredEvent",
            EventKind::Unrecognized { type_name } => type_name,
        }
    }

    /// Renders the payload back into its wire `data` object.
    pub fn to_data(&self) -> Value {
        let encoded = match self {
            EventKind::AgentInput(data) => serde_json::to_value(data),
            EventKind::AgentStream(data) => serde_json::to_value(data),
            EventKind::ToolCall(data) => serde_json::to_value(data),
            EventKind::ToolCallResult(data) => serde_json::to_value(data),
            EventKind::AgentOutput(data) => serde_json::to_value(data),
            EventKind::StopEvent(data) => serde_json::to_value(data),
            EventKind::WorkflowCancelled(data) => serde_json::to_value(data),
            EventKind::InputRequired { prompt } => Ok(json!({ "_data": { "prefix": prompt } })),
            EventKind::Unrecognized { .. } => Ok(Value::Object(Map::new())),
        };
        // Payload structs only hold strings, maps and JSON values.
        encoded.unwrap_or_else(|_| Value::Object(Map::new()))
    }
}

/// A single item of an agent event stream.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkflowEvent {
    /// When the event was observed; display and ordering only
    #[serde(rename = "ts")]
    pub timestamp: Timestamp,

    /// Literal kind string as received, including any namespace prefix
    #[serde(rename = "type")]
    pub type_name: String,

    /// Raw payload as received
    pub data: Value,

    /// Typed view of the payload
    #[serde(skip)]
    pub kind: EventKind,
}

impl WorkflowEvent {
    /// Builds an event from a typed kind, deriving its wire name and data.
    pub fn new(timestamp: Timestamp, kind: EventKind) -> Self {
        Self {
            timestamp,
            type_name: kind.wire_name().to_string(),
            data: kind.to_data(),
            kind,
        }
    }

    /// Builds an event stamped with the current time.
    pub fn now(kind: EventKind) -> Self {
        Self::new(Timestamp::now(), kind)
    }

    /// The report body this event replaces the current report with, if any.
    pub fn report_update(&self) -> Option<&str> {
        match &self.kind {
            EventKind::ToolCallResult(result) => result.report_update(),
            _ => None,
        }
    }
}

/// Outbound message answering an input-required event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HumanResponse {
    /// Event name understood by the workflow service
    pub name: String,

    /// Literal response text; `"accept"` approves a plan unconditionally
    pub response: String,
}

impl HumanResponse {
    pub const EVENT_NAME: &'static str = "HumanResponseEvent";

    pub fn new(response: impl Into<String>) -> Self {
        Self {
            name: Self::EVENT_NAME.to_string(),
            response: response.into(),
        }
    }
}
