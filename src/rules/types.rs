//! Issue types emitted by the rule engine.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Severity of a query issue, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Low,
    Medium,
    High
}

impl std::fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high")
        }
    }
}

/// Stable issue type identifiers, shared with the persistence layer.
pub mod issue_types {
    pub const WHERE_CLAUSE_MISSING_INDEX: &str = "where_clause_missing_index";
    pub const CLAUSE_MISSING_INDEX: &str = "clause_missing_index";
    pub const COLUMN_UPDATED_IN_INDEX: &str = "column_updated_in_index";
}

/// A structured finding describing a potential performance problem in a
/// statement, independent of whether it is ever persisted or displayed.
#[derive(Debug, Clone, Serialize)]
pub struct QueryIssue {
    /// Fresh identifier for this finding
    pub id:          String,
    /// Identifier of the analyzed query; assigned by the persistence layer
    pub query_id:    String,
    pub severity:    IssueSeverity,
    pub issue_type:  &'static str,
    pub message:     String,
    /// Structured payload (`table`, `column`) for persistence and assertions
    pub data:        Value,
    pub created_at:  DateTime<Utc>,
    /// Lifecycle field owned by the persistence layer; never set here
    pub ignored_at:  Option<DateTime<Utc>>,
    /// Lifecycle field owned by the persistence layer; never set here
    pub resolved_at: Option<DateTime<Utc>>
}

impl QueryIssue {
    pub(crate) fn new(
        issue_type: &'static str,
        severity: IssueSeverity,
        message: String,
        data: Value
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            query_id: String::new(),
            severity,
            issue_type,
            message,
            data,
            created_at: Utc::now(),
            ignored_at: None,
            resolved_at: None
        }
    }
}
