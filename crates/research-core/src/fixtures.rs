//! Fixture sessions and the scripted research run used for local
//! development.

use jiff::Timestamp;
use serde_json::{json, Map, Value};

use crate::{
    models::{
        AgentInputData, AgentStreamData, ArtifactKind, ChatMessage, EventKind, ResearchArtifact,
        ResearchPlan, ResearchSession, ResearchSource, ResearchStatus, StopEventData,
        ToolCallData, ToolCallResultData, ToolOutput, WorkflowEvent, UPDATE_REPORT_TOOL,
    },
    run::ScriptedStream,
};

pub const AGENT_NAME: &str = "ResearchAgent";
pub const WEB_SEARCH_TOOL: &str = "web_search";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// The two fixture sessions, sharing one creation timestamp.
pub fn fixture_sessions(created_at: Timestamp) -> Vec<ResearchSession> {
    vec![
        ResearchSession {
            research_id: "research_mock_001".to_string(),
            created_at,
            updated_at: created_at,
            status: ResearchStatus::AwaitingApproval,
            initial_query: "Assess the current state of open-source LLM observability tooling and recommend a stack for a 5-person team.".to_string(),
            plan: ResearchPlan {
                clarifying_questions: strings(&[
                    "What is the primary environment (Kubernetes, serverless, on-prem)?",
                    "Do you need PII redaction and audit logs?",
                    "Which LLM providers/models are you using today?",
                ]),
                expanded_queries: strings(&[
                    "open source LLM observability tracing evals",
                    "Langfuse vs OpenTelemetry LLM tracing",
                    "prompt evaluation frameworks open source",
                    "LLM security governance open source",
                ]),
                outline: strings(&[
                    "## Executive summary",
                    "## Requirements",
                    "## Landscape overview",
                    "## Recommended architecture",
                    "## Implementation plan",
                    "## Risks and mitigations",
                    "## References",
                ]),
            },
            report_markdown: "# Deep Research Report\n\n## Executive summary\n\n(Report will update live once execution starts.)\n".to_string(),
            sources: vec![ResearchSource {
                url: "https://example.com/llm-observability-overview".to_string(),
                title: Some("LLM Observability Overview".to_string()),
                snippet: Some(
                    "A survey of tracing, evaluation, and monitoring options for LLM apps."
                        .to_string(),
                ),
                retrieved_at: Some(created_at),
                ..ResearchSource::default()
            }],
            artifacts: vec![ResearchArtifact {
                file_id: "file_mock_001".to_string(),
                name: "observability-landscape.pdf".to_string(),
                kind: ArtifactKind::Pdf,
                created_at: Some(created_at),
                source_url: Some("https://example.com/observability-landscape.pdf".to_string()),
            }],
        },
        ResearchSession {
            research_id: "research_mock_002".to_string(),
            created_at,
            updated_at: created_at,
            status: ResearchStatus::Completed,
            initial_query: "Summarize the latest approaches for RAG evaluation and propose a lightweight evaluation protocol.".to_string(),
            plan: ResearchPlan {
                clarifying_questions: strings(&[
                    "Do you evaluate in offline datasets, online A/B tests, or both?",
                ]),
                expanded_queries: strings(&[
                    "RAG evaluation metrics faithfulness answer relevancy",
                    "LLM-as-judge reliability and calibration",
                    "retrieval evaluation MRR nDCG RAG",
                ]),
                outline: strings(&[
                    "## Goal",
                    "## Metrics and failure modes",
                    "## Offline evaluation protocol",
                    "## Online evaluation protocol",
                    "## Suggested tooling",
                    "## References",
                ]),
            },
            report_markdown: "# Deep Research Report\n\n## Goal\n\nThis report summarizes current RAG evaluation practices...\n\n## References\n\n- ...\n".to_string(),
            sources: vec![ResearchSource {
                url: "https://example.com/rag-evals".to_string(),
                title: Some("RAG Evaluation Notes".to_string()),
                snippet: Some("A practical overview of evaluation approaches.".to_string()),
                retrieved_at: Some(created_at),
                ..ResearchSource::default()
            }],
            artifacts: vec![],
        },
    ]
}

fn kwargs(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn tool_call(tool_name: &str, tool_id: &str, tool_kwargs: &Map<String, Value>) -> WorkflowEvent {
    WorkflowEvent::now(EventKind::ToolCall(ToolCallData {
        tool_name: tool_name.to_string(),
        tool_kwargs: tool_kwargs.clone(),
        tool_id: tool_id.to_string(),
    }))
}

fn tool_result(
    tool_name: &str,
    tool_id: &str,
    tool_kwargs: &Map<String, Value>,
    content: &str,
    new_report_markdown: Option<String>,
) -> WorkflowEvent {
    WorkflowEvent::now(EventKind::ToolCallResult(ToolCallResultData {
        tool_name: tool_name.to_string(),
        tool_kwargs: tool_kwargs.clone(),
        tool_id: tool_id.to_string(),
        tool_output: ToolOutput {
            content: content.to_string(),
            tool_name: tool_name.to_string(),
            ..ToolOutput::default()
        },
        return_direct: false,
        new_report_markdown,
    }))
}

/// Builds the scripted event sequence of a research run over `session`.
///
/// The sequence mirrors the live handler contract: agent input, a streamed
/// delta, one web search, two report updates and a stop event. Each report
/// update carries the full report so far.
pub fn mock_research_run(session: &ResearchSession) -> ScriptedStream {
    let query = session
        .plan
        .expanded_queries
        .first()
        .unwrap_or(&session.initial_query);
    let search_kwargs = kwargs(json!({ "query": query, "max_results": 5 }));
    let update_kwargs = kwargs(json!({ "max_update_size": 800 }));
    let id = &session.research_id;

    let report1 = format!(
        "{}\n\n## Landscape overview\n\n- Tooling typically spans tracing, evals, and feedback loops.\n- Strong choices integrate OpenTelemetry semantics and LLM-specific spans.",
        session.report_markdown
    );
    let report2 = format!(
        "{report1}\n\n## Recommended architecture\n\n1. Capture traces + metrics with OpenTelemetry.\n2. Add LLM-specific eval harnesses for regression testing.\n3. Record prompts/responses with redaction and retention policies."
    );
    let streamed = "Starting web research and synthesizing findings...";

    ScriptedStream::from_events([
        WorkflowEvent::now(EventKind::AgentInput(AgentInputData {
            input: vec![ChatMessage::new("user", &session.initial_query)],
            current_agent_name: AGENT_NAME.to_string(),
        })),
        WorkflowEvent::now(EventKind::AgentStream(AgentStreamData {
            delta: streamed.to_string(),
            response: streamed.to_string(),
            current_agent_name: AGENT_NAME.to_string(),
            ..AgentStreamData::default()
        })),
        tool_call(WEB_SEARCH_TOOL, &format!("call_{id}_search"), &search_kwargs),
        tool_result(
            WEB_SEARCH_TOOL,
            &format!("call_{id}_search"),
            &search_kwargs,
            "Found 2 results:\n1. Source 1 - https://example.com/source-1\n2. Source 2 - https://example.com/source-2",
            None,
        ),
        tool_call(UPDATE_REPORT_TOOL, &format!("call_{id}_update_1"), &update_kwargs),
        tool_result(
            UPDATE_REPORT_TOOL,
            &format!("call_{id}_update_1"),
            &update_kwargs,
            "Report updated with Landscape overview section.",
            Some(report1),
        ),
        tool_call(UPDATE_REPORT_TOOL, &format!("call_{id}_update_2"), &update_kwargs),
        tool_result(
            UPDATE_REPORT_TOOL,
            &format!("call_{id}_update_2"),
            &update_kwargs,
            "Report updated with Recommended architecture section.",
            Some(report2),
        ),
        WorkflowEvent::now(EventKind::StopEvent(StopEventData {
            result: Some(json!({ "status": "completed", "research_id": id })),
        })),
    ])
}
