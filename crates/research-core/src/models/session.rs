//! Research session record.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::ResearchStatus;

/// Structured plan attached to a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResearchPlan {
    pub clarifying_questions: Vec<String>,
    pub expanded_queries: Vec<String>,
    pub outline: Vec<String>,
}

/// A web source consulted during research.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResearchSource {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieved_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Kind of a stored artifact file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Pdf,
    Html,
    Text,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Pdf => "pdf",
            ArtifactKind::Html => "html",
            ArtifactKind::Text => "text",
        }
    }
}

/// A file collected during research.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResearchArtifact {
    pub file_id: String,
    pub name: String,
    pub kind: ArtifactKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// A research session as exported and listed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResearchSession {
    /// Unique identifier of the session
    pub research_id: String,

    /// Timestamp when the session was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the session was last updated (UTC)
    pub updated_at: Timestamp,

    /// Current lifecycle phase
    pub status: ResearchStatus,

    /// The query the user started with
    pub initial_query: String,

    pub plan: ResearchPlan,

    /// Baseline report body
    pub report_markdown: String,

    #[serde(default)]
    pub sources: Vec<ResearchSource>,

    #[serde(default)]
    pub artifacts: Vec<ResearchArtifact>,
}
