//! Report and session export files.

use std::{
    fmt,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use log::info;

use crate::{
    error::{ResearchError, Result},
    models::ResearchSession,
    state::RunState,
};

/// File format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// The report body as Markdown
    #[default]
    Markdown,
    /// The whole session record as pretty JSON
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Json => "json",
        }
    }

    pub fn file_name(&self, research_id: &str) -> String {
        format!("research-{research_id}.{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ResearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ResearchError::invalid_input("format")
                .with_reason(format!("unknown export format '{s}' (expected md or json)"))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

pub fn report_file_name(research_id: &str) -> String {
    ExportFormat::Markdown.file_name(research_id)
}

pub fn session_file_name(research_id: &str) -> String {
    ExportFormat::Json.file_name(research_id)
}

/// The session as it stands after `run`: the run's status, last update time
/// and report replace the stored ones.
pub fn effective_session(session: &ResearchSession, run: Option<&RunState>) -> ResearchSession {
    let mut effective = session.clone();
    if let Some(run) = run {
        effective.status = run.status();
        effective.updated_at = run.updated_at();
        effective.report_markdown = run.report_text().to_string();
    }
    effective
}

pub fn report_markdown(session: &ResearchSession, run: Option<&RunState>) -> String {
    run.map_or_else(
        || session.report_markdown.clone(),
        |run| run.report_text().to_string(),
    )
}

/// Pretty JSON of the effective session.
///
/// # Errors
///
/// Returns `ResearchError::Serialization` if the record cannot be encoded.
pub fn session_json(session: &ResearchSession, run: Option<&RunState>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&effective_session(session, run))?)
}

/// Writes an export file into `dir`, creating it if needed, and returns the
/// written path.
///
/// # Errors
///
/// Returns `ResearchError::FileSystem` if the directory or file cannot be
/// written.
pub fn write_export(
    dir: &Path,
    session: &ResearchSession,
    run: Option<&RunState>,
    format: ExportFormat,
) -> Result<PathBuf> {
    let contents = match format {
        ExportFormat::Markdown => report_markdown(session, run),
        ExportFormat::Json => session_json(session, run)?,
    };

    fs::create_dir_all(dir).map_err(|e| ResearchError::file_system(dir, e))?;
    let path = dir.join(format.file_name(&session.research_id));
    fs::write(&path, contents).map_err(|e| ResearchError::file_system(&path, e))?;

    info!("Exported {} to {}", session.research_id, path.display());
    Ok(path)
}
