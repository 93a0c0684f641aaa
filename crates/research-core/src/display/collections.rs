//! Collection wrappers for lists of sessions and run logs.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{models::ResearchSession, state::LogEntry};

/// Newtype wrapper for displaying the session list.
///
/// Each session is shown as a short summary rather than the full record.
///
/// # Examples
///
/// ```rust
/// use research_core::{display::Sessions, store::SessionStore};
///
/// let sessions = Sessions(SessionStore::with_fixtures().list());
/// let output = sessions.to_string();
/// assert!(output.contains("## research_mock_001 (awaiting approval)"));
/// ```
pub struct Sessions(pub Vec<ResearchSession>);

impl Sessions {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResearchSession> {
        self.0.iter()
    }
}

impl fmt::Display for Sessions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No sessions found.");
        }
        for session in &self.0 {
            writeln!(f, "## {} ({})", session.research_id, session.status)?;
            writeln!(f)?;
            writeln!(f, "- **Query**: {}", session.initial_query)?;
            writeln!(f, "- **Updated**: {}", LocalDateTime(&session.updated_at))?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Borrowing wrapper for displaying a run log in order.
pub struct RunLog<'a>(pub &'a [LogEntry]);

impl fmt::Display for RunLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No events yet.");
        }
        for entry in self.0 {
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}
