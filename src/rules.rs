//! Static analysis rule engine.
//!
//! Rules are stateless evaluators over a statement model and the index
//! model derived from the same schema snapshot. The [`RuleRunner`] executes
//! every enabled rule in declaration order and concatenates their issues,
//! so output order is stable across runs. Rule evaluation itself cannot
//! fail: models are fully resolved before any rule sees them.
//!
//! Rules can be disabled or have their severity overridden via
//! [`RulesConfig`]:
//!
//! ```toml
//! [rules]
//! disabled = ["clause_missing_index"]
//!
//! [rules.severity]
//! where_clause_missing_index = "medium"
//! ```

mod indexing;
mod types;

use std::collections::HashMap;

pub use types::{IssueSeverity, QueryIssue, issue_types};

use crate::{config::RulesConfig, index::IndexModel, statement::StatementModel};

/// Trait for implementing analysis rules.
///
/// Rules must be `Send + Sync`; a runner may be shared across threads.
pub trait Rule: Send + Sync {
    /// Returns metadata about this rule.
    fn info(&self) -> RuleInfo;

    /// Evaluates the rule, returning zero or more issues.
    fn check(&self, model: &StatementModel, indexes: &IndexModel) -> Vec<QueryIssue>;
}

/// Metadata about a rule for identification and configuration.
#[derive(Debug, Clone)]
pub struct RuleInfo {
    /// Stable identifier, equal to the issue type the rule emits
    pub id:       &'static str,
    /// Human-readable rule name
    pub name:     &'static str,
    /// Default severity level
    pub severity: IssueSeverity
}

/// Rule execution engine.
pub struct RuleRunner {
    rules:          Vec<Box<dyn Rule>>,
    severity_cache: HashMap<&'static str, IssueSeverity>
}

impl Default for RuleRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleRunner {
    /// Create a runner with all default rules
    pub fn new() -> Self {
        Self::with_config(&RulesConfig::default())
    }

    /// Create a runner with configuration
    pub fn with_config(config: &RulesConfig) -> Self {
        let all_rules: Vec<Box<dyn Rule>> = vec![
            Box::new(indexing::WhereClauseMissingIndex),
            Box::new(indexing::JoinClauseMissingIndex),
            Box::new(indexing::ColumnUpdatedInIndex),
        ];

        let rules: Vec<Box<dyn Rule>> = all_rules
            .into_iter()
            .filter(|r| {
                !config
                    .disabled
                    .iter()
                    .any(|d| d.eq_ignore_ascii_case(r.info().id))
            })
            .collect();

        let mut severity_cache = HashMap::new();
        for rule in &rules {
            let rule_id = rule.info().id;
            if let Some(sev_str) = config.severity.get(rule_id)
                && let Some(sev) = parse_severity(sev_str)
            {
                severity_cache.insert(rule_id, sev);
            }
        }

        Self {
            rules,
            severity_cache
        }
    }

    /// Run all enabled rules against one statement model.
    pub fn analyze(&self, model: &StatementModel, indexes: &IndexModel) -> Vec<QueryIssue> {
        let mut issues = Vec::new();
        for rule in &self.rules {
            let mut found = rule.check(model, indexes);
            if let Some(&severity) = self.severity_cache.get(rule.info().id) {
                for issue in &mut found {
                    issue.severity = severity;
                }
            }
            issues.extend(found);
        }
        issues
    }
}

/// Parse severity string to enum
fn parse_severity(s: &str) -> Option<IssueSeverity> {
    match s.to_lowercase().as_str() {
        "low" => Some(IssueSeverity::Low),
        "medium" => Some(IssueSeverity::Medium),
        "high" => Some(IssueSeverity::High),
        _ => None
    }
}
