//! Query planning: classify a statement, extract its model, and run the
//! rule engine against the snapshot's index model.

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::{
    error::AppResult,
    index::{IndexModel, build_index_model},
    rules::{QueryIssue, RuleRunner},
    schema::SchemaSnapshot,
    statement::{
        ClassifiedStatement, SqlDialect, StatementKind, StatementModel, classify_statement,
        parse_statements
    }
};

/// Result of planning one statement.
#[derive(Debug, Clone, Serialize)]
pub struct QueryPlan {
    pub kind:   StatementKind,
    /// Extracted statement model; absent when there was nothing to analyze
    pub model:  Option<StatementModel>,
    pub issues: Vec<QueryIssue>
}

/// Analyze one statement against a schema snapshot with the default rules.
///
/// # Errors
///
/// Fails when the text cannot be parsed or when a table/column reference
/// cannot be resolved; no partial plan is produced in either case.
pub fn plan_statement(
    snapshot: &SchemaSnapshot,
    sql: &str,
    dialect: SqlDialect
) -> AppResult<QueryPlan> {
    plan_statement_with(&RuleRunner::new(), snapshot, sql, dialect)
}

/// Analyze one statement with a configured rule runner.
pub fn plan_statement_with(
    runner: &RuleRunner,
    snapshot: &SchemaSnapshot,
    sql: &str,
    dialect: SqlDialect
) -> AppResult<QueryPlan> {
    let classified = classify_statement(sql, dialect)?;
    let indexes = build_index_model(&snapshot.tables);
    plan_classified(runner, snapshot, &indexes, &classified)
}

/// Analyze every statement in a batch (parallel); result order matches
/// statement order. The index model is derived once and shared.
pub fn plan_queries(
    runner: &RuleRunner,
    snapshot: &SchemaSnapshot,
    sql: &str,
    dialect: SqlDialect
) -> AppResult<Vec<QueryPlan>> {
    let statements = parse_statements(sql, dialect)?;
    let indexes = build_index_model(&snapshot.tables);
    statements
        .par_iter()
        .map(|classified| plan_classified(runner, snapshot, &indexes, classified))
        .collect()
}

fn plan_classified(
    runner: &RuleRunner,
    snapshot: &SchemaSnapshot,
    indexes: &IndexModel,
    classified: &ClassifiedStatement
) -> AppResult<QueryPlan> {
    debug!(kind = %classified.kind, "planning statement");

    let model = classified.extract_model(snapshot)?;
    let issues = match &model {
        Some(model) => runner.analyze(model, indexes),
        None => Vec::new()
    };

    Ok(QueryPlan {
        kind: classified.kind,
        model,
        issues
    })
}
