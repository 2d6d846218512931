//! # Query Log Recorder
//!
//! Append-only record of the SQL a real backend would have executed, shown
//! newest first in the developer panel.
//!
//! ## Storage
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  record(..)  ──► push_front                                             │
//! │                                                                         │
//! │  entries:  [ newest ] [ ... ] [ ... ] [ oldest ]                        │
//! │                                                 │                       │
//! │                            max_entries reached ─┴─► pop_back            │
//! │                                                                         │
//! │  No cap by default: the log lives as long as the session.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;
use ts_rs::TS;

use crate::sql::QueryEvent;

// =============================================================================
// Statement
// =============================================================================

/// What an entry recorded: a structured event or free-form text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    Event(QueryEvent),
    Raw(String),
}

impl Statement {
    pub fn to_sql(&self) -> String {
        match self {
            Statement::Event(event) => event.to_sql(),
            Statement::Raw(text) => text.clone(),
        }
    }
}

// =============================================================================
// Log Entry
// =============================================================================

/// One recorded statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    #[ts(as = "String")]
    pub timestamp: DateTime<Local>,

    /// `INIT`, `NAVIGATE`, `INSERT_ITEM`, or a caller-chosen tag.
    pub action: String,

    pub statement: Statement,
}

impl LogEntry {
    /// The SQL text of this entry.
    pub fn query(&self) -> String {
        self.statement.to_sql()
    }

    /// Wall-clock time as `HH:MM:SS`.
    pub fn timestamp_label(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

// =============================================================================
// Query Log
// =============================================================================

/// Newest-first list of simulated statements.
#[derive(Debug, Clone, Default)]
pub struct QueryLog {
    entries: VecDeque<LogEntry>,
    max_entries: Option<usize>,
}

impl QueryLog {
    /// Creates an unbounded log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a log that keeps at most `max_entries`, dropping the oldest.
    ///
    /// A limit of zero is treated as one; the latest entry is always kept.
    pub fn with_capacity_limit(max_entries: usize) -> Self {
        QueryLog {
            entries: VecDeque::new(),
            max_entries: Some(max_entries.max(1)),
        }
    }

    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }

    /// Records a structured event under its own action tag.
    pub fn record_event(&mut self, event: QueryEvent) -> &LogEntry {
        let action = event.action().to_string();
        self.push(action, Statement::Event(event))
    }

    /// Records free-form statement text under `action`.
    pub fn record(&mut self, action: impl Into<String>, query: impl Into<String>) -> &LogEntry {
        self.push(action.into(), Statement::Raw(query.into()))
    }

    fn push(&mut self, action: String, statement: Statement) -> &LogEntry {
        debug!(action = %action, "Recording simulated query");

        self.entries.push_front(LogEntry {
            timestamp: Local::now(),
            action,
            statement,
        });

        if let Some(max) = self.max_entries {
            self.entries.truncate(max);
        }

        &self.entries[0]
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &LogEntry> + '_ {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut log = QueryLog::new();
        log.record_event(QueryEvent::Init);
        log.record_event(QueryEvent::BrowseListings);

        let actions: Vec<&str> = log.entries().map(|e| e.action.as_str()).collect();
        assert_eq!(actions, vec!["NAVIGATE", "INIT"]);
        assert_eq!(log.latest().unwrap().query(), "SELECT * FROM products LIMIT 20;");
    }

    #[test]
    fn test_record_raw_text() {
        let mut log = QueryLog::new();
        let entry = log.record("CUSTOM", "SELECT 1;");
        assert_eq!(entry.action, "CUSTOM");
        assert_eq!(entry.query(), "SELECT 1;");
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_timestamp_label_format() {
        let mut log = QueryLog::new();
        let label = log.record_event(QueryEvent::Init).timestamp_label();
        assert_eq!(label.len(), 8);
        assert_eq!(label.matches(':').count(), 2);
    }

    #[test]
    fn test_capacity_limit_drops_oldest() {
        let mut log = QueryLog::with_capacity_limit(2);
        log.record("A", "1");
        log.record("B", "2");
        log.record("C", "3");

        let actions: Vec<&str> = log.entries().map(|e| e.action.as_str()).collect();
        assert_eq!(actions, vec!["C", "B"]);
    }

    #[test]
    fn test_zero_limit_keeps_latest() {
        let mut log = QueryLog::with_capacity_limit(0);
        log.record("A", "1");
        log.record("B", "2");
        assert_eq!(log.len(), 1);
        assert_eq!(log.latest().unwrap().action, "B");
    }

    #[test]
    fn test_entry_serializes_to_json() {
        let mut log = QueryLog::new();
        log.record_event(QueryEvent::ViewProfile { user_id: 101 });
        let json = serde_json::to_value(log.latest().unwrap()).unwrap();
        assert_eq!(json["action"], "NAVIGATE");
        assert_eq!(json["statement"]["event"]["kind"], "view_profile");
        assert_eq!(json["statement"]["event"]["user_id"], 101);
    }
}
