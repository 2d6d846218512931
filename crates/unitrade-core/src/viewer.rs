//! # Log Viewer
//!
//! Read-only developer panel over the query log and the schema documents.
//!
//! ```text
//! ┌──────────────┬──────────────┬──────────────┐
//! │   Schema     │  ER Diagram  │  Query Logs  │
//! ├──────────────┴──────────────┴──────────────┤
//! │ FULL_INIT_SQL │ ErDiagram::render │ entries │
//! └────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::query_log::{LogEntry, QueryLog};
use crate::schema::{ErDiagram, FULL_INIT_SQL};

/// First line of the logs tab.
pub const LOGS_HEADER: &str = "// Real-time simulated SQL queries based on user actions";

/// Shown instead of entries when nothing has been recorded.
pub const NO_QUERIES: &str = "No queries executed yet...";

/// First line of the schema tab.
pub const SCHEMA_HEADER: &str = "// Initialization SQL for Navicat/MySQL";

// =============================================================================
// Tabs
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevToolsTab {
    #[default]
    Schema,
    ErDiagram,
    Logs,
}

impl fmt::Display for DevToolsTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DevToolsTab::Schema => "Schema Definitions",
            DevToolsTab::ErDiagram => "ER Diagram",
            DevToolsTab::Logs => "Query Logs",
        })
    }
}

impl FromStr for DevToolsTab {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "schema" => Ok(DevToolsTab::Schema),
            "er" | "erd" | "diagram" => Ok(DevToolsTab::ErDiagram),
            "logs" | "log" => Ok(DevToolsTab::Logs),
            _ => Err(ValidationError::NotAllowed {
                field: "tab".to_string(),
                allowed: vec!["schema".into(), "er".into(), "logs".into()],
            }),
        }
    }
}

// =============================================================================
// Viewer
// =============================================================================

/// Borrowed, read-only view of a session's log.
#[derive(Debug, Clone, Copy)]
pub struct LogViewer<'a> {
    log: &'a QueryLog,
    diagram: ErDiagram,
}

impl<'a> LogViewer<'a> {
    pub fn new(log: &'a QueryLog) -> Self {
        LogViewer {
            log,
            diagram: ErDiagram::market(),
        }
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &'a LogEntry> + 'a {
        self.log.entries()
    }

    pub fn schema_sql(&self) -> &'static str {
        FULL_INIT_SQL
    }

    pub fn diagram(&self) -> &ErDiagram {
        &self.diagram
    }

    pub fn render(&self, tab: DevToolsTab) -> String {
        match tab {
            DevToolsTab::Schema => format!("{SCHEMA_HEADER}\n{FULL_INIT_SQL}"),
            DevToolsTab::ErDiagram => self.diagram.render(),
            DevToolsTab::Logs => self.render_logs(),
        }
    }

    /// Header, then one `[ACTION] HH:MM:SS` block per entry.
    pub fn render_logs(&self) -> String {
        let mut out = String::from(LOGS_HEADER);
        out.push('\n');

        if self.log.is_empty() {
            out.push_str(NO_QUERIES);
            return out;
        }

        for entry in self.log.entries() {
            let _ = writeln!(out, "\n[{}] {}", entry.action, entry.timestamp_label());
            let _ = writeln!(out, "{}", entry.query());
        }
        out
    }

    /// The entries as pretty JSON, newest first.
    pub fn logs_json(&self) -> serde_json::Result<String> {
        let entries: Vec<&LogEntry> = self.log.entries().collect();
        serde_json::to_string_pretty(&entries)
    }
}
