//! Display implementations for domain models.
//!
//! Every implementation produces Markdown for the terminal renderer.

use std::fmt;

use super::datetime::{LocalDateTime, LocalTime};
use crate::{
    models::{ParsedPlan, PlanStep, ResearchSession, ResearchStatus},
    state::{LogEntry, RunState},
};

impl fmt::Display for ResearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.enabled { "x" } else { " " };
        writeln!(f, "- [{mark}] {}. {}", self.index + 1, self.description)
    }
}

impl fmt::Display for ParsedPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Unstructured plans are shown as received.
        if self.is_unstructured() {
            return writeln!(f, "{}", self.preamble);
        }

        let preamble = self.display_preamble();

        writeln!(
            f,
            "## Plan ({}/{} Selected)",
            self.enabled_count(),
            self.steps.len()
        )?;
        writeln!(f)?;

        if !preamble.is_empty() {
            writeln!(f, "{preamble}")?;
            writeln!(f)?;
        }

        for step in &self.steps {
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {} ({})",
            self.label(),
            LocalTime(&self.timestamp())
        )?;
        writeln!(f)?;

        match self {
            LogEntry::Event { event } => {
                let data = serde_json::to_string_pretty(&event.data).map_err(|_| fmt::Error)?;
                writeln!(f, "```json")?;
                writeln!(f, "{data}")?;
                writeln!(f, "```")?;
            }
            LogEntry::Agent { content, .. } | LogEntry::User { content, .. } => {
                writeln!(f, "{content}")?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.run_id())?;
        writeln!(f)?;
        writeln!(f, "- Status: {}", self.status_label())?;
        writeln!(f, "- Events: {}", self.log().len())?;
        writeln!(
            f,
            "- Awaiting input: {}",
            if self.awaiting_human() { "yes" } else { "no" }
        )?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at()))?;
        if self.was_cancelled() {
            writeln!(f, "- Cancelled by workflow")?;
        }
        if let Some(error) = self.error() {
            writeln!(f, "- Error: {error}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ResearchSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.research_id)?;
        writeln!(f)?;
        writeln!(f, "- Status: {}", self.status)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;
        writeln!(f, "- Sources: {}", self.sources.len())?;
        writeln!(f, "- Artifacts: {}", self.artifacts.len())?;
        writeln!(f)?;
        writeln!(f, "{}", self.initial_query)?;

        let sections = [
            ("Clarifying questions", &self.plan.clarifying_questions),
            ("Expanded queries", &self.plan.expanded_queries),
            ("Outline", &self.plan.outline),
        ];
        for (title, items) in sections {
            if items.is_empty() {
                continue;
            }
            writeln!(f, "\n## {title}")?;
            writeln!(f)?;
            for item in items {
                writeln!(f, "- {item}")?;
            }
        }

        if !self.sources.is_empty() {
            writeln!(f, "\n## Sources")?;
            writeln!(f)?;
            for source in &self.sources {
                match &source.title {
                    Some(title) => writeln!(f, "- [{title}]({})", source.url)?,
                    None => writeln!(f, "- {}", source.url)?,
                }
            }
        }

        if !self.artifacts.is_empty() {
            writeln!(f, "\n## Artifacts")?;
            writeln!(f)?;
            for artifact in &self.artifacts {
                writeln!(f, "- {} ({})", artifact.name, artifact.kind.as_str())?;
            }
        }

        Ok(())
    }
}
