use queryplan::{
    config::RulesConfig,
    plan::{plan_queries, plan_statement, plan_statement_with},
    rules::{IssueSeverity, RuleRunner, issue_types},
    schema::{Column, Engine, SchemaSnapshot, Table},
    statement::{SqlDialect, StatementKind}
};

fn snapshot() -> SchemaSnapshot {
    let users = Table::new("users")
        .with_column(Column::new("id", "int"))
        .with_column(Column::new("email", "varchar"))
        .with_primary_keys(["id"])
        .with_estimated_row_count(10_000);
    let orders = Table::new("orders")
        .with_column(Column::new("id", "int"))
        .with_column(Column::new("user_id", "int"))
        .with_primary_keys(["id"]);
    SchemaSnapshot::new("app", Engine::MySql, vec![users, orders])
}

#[test]
fn test_unindexed_where_column_flagged() {
    let plan = plan_statement(
        &snapshot(),
        "SELECT id FROM users WHERE email = 'x'",
        SqlDialect::Generic
    )
    .unwrap();

    assert_eq!(plan.kind, StatementKind::Select);
    assert_eq!(plan.issues.len(), 1);

    let issue = &plan.issues[0];
    assert_eq!(issue.issue_type, issue_types::WHERE_CLAUSE_MISSING_INDEX);
    assert_eq!(issue.severity, IssueSeverity::Low);
    assert_eq!(issue.data["table"], "users");
    assert_eq!(issue.data["column"], "email");
    assert!(issue.ignored_at.is_none());
    assert!(issue.resolved_at.is_none());
}

#[test]
fn test_primary_key_where_column_not_flagged() {
    let plan = plan_statement(
        &snapshot(),
        "SELECT id FROM users WHERE id = 1",
        SqlDialect::Generic
    )
    .unwrap();

    assert!(plan.issues.is_empty());
}

#[test]
fn test_unindexed_join_column_flagged() {
    let plan = plan_statement(
        &snapshot(),
        "SELECT users.id FROM users INNER JOIN orders ON users.id = orders.user_id \
         WHERE users.id = 1",
        SqlDialect::Generic
    )
    .unwrap();

    // users.id is the primary key on both sides of the statement; only
    // orders.user_id lacks coverage
    assert_eq!(plan.issues.len(), 1);
    let issue = &plan.issues[0];
    assert_eq!(issue.issue_type, issue_types::CLAUSE_MISSING_INDEX);
    assert_eq!(issue.data["table"], "orders");
    assert_eq!(issue.data["column"], "user_id");
}

#[test]
fn test_update_of_primary_key_flagged() {
    let plan = plan_statement(
        &snapshot(),
        "UPDATE users SET id = 5 WHERE id = 1",
        SqlDialect::Generic
    )
    .unwrap();

    assert_eq!(plan.kind, StatementKind::Update);
    assert_eq!(plan.issues.len(), 1);
    let issue = &plan.issues[0];
    assert_eq!(issue.issue_type, issue_types::COLUMN_UPDATED_IN_INDEX);
    assert_eq!(issue.data["table"], "users");
    assert_eq!(issue.data["column"], "id");
}

#[test]
fn test_update_of_unindexed_column_not_flagged() {
    let plan = plan_statement(
        &snapshot(),
        "UPDATE users SET email = 'x' WHERE id = 1",
        SqlDialect::Generic
    )
    .unwrap();

    assert!(plan.issues.is_empty());
}

#[test]
fn test_table_without_primary_key_covers_nothing() {
    let tasks = Table::new("tasks")
        .with_column(Column::new("id", "int"))
        .with_column(Column::new("name", "varchar"));
    let snapshot = SchemaSnapshot::new("app", Engine::Postgres, vec![tasks]);

    let select = plan_statement(
        &snapshot,
        "SELECT name FROM tasks WHERE id = 1",
        SqlDialect::Generic
    )
    .unwrap();
    assert_eq!(select.issues.len(), 1);
    assert_eq!(
        select.issues[0].issue_type,
        issue_types::WHERE_CLAUSE_MISSING_INDEX
    );

    // and the update side: nothing on this table is ever index-covered
    let update = plan_statement(&snapshot, "UPDATE tasks SET id = 2", SqlDialect::Generic).unwrap();
    assert!(update.issues.is_empty());
}

#[test]
fn test_composite_index_membership_is_unordered() {
    // coverage is unordered containment, not leftmost-prefix matching: a
    // predicate on the second key column alone still counts as covered
    let events = Table::new("events")
        .with_column(Column::new("tenant_id", "int"))
        .with_column(Column::new("occurred_at", "timestamp"))
        .with_primary_keys(["tenant_id", "occurred_at"]);
    let snapshot = SchemaSnapshot::new("app", Engine::MySql, vec![events]);

    let plan = plan_statement(
        &snapshot,
        "SELECT tenant_id FROM events WHERE occurred_at = '2024-01-01'",
        SqlDialect::Generic
    )
    .unwrap();

    assert!(plan.issues.is_empty());
}

#[test]
fn test_unsupported_statement_produces_no_plan() {
    let plan = plan_statement(&snapshot(), "TRUNCATE TABLE users", SqlDialect::Generic).unwrap();

    assert_eq!(plan.kind, StatementKind::Unsupported);
    assert!(plan.model.is_none());
    assert!(plan.issues.is_empty());
}

#[test]
fn test_information_schema_produces_no_plan() {
    let plan = plan_statement(
        &snapshot(),
        "SELECT * FROM information_schema.tables",
        SqlDialect::Generic
    )
    .unwrap();

    assert_eq!(plan.kind, StatementKind::Select);
    assert!(plan.model.is_none());
    assert!(plan.issues.is_empty());
}

#[test]
fn test_malformed_sql_is_a_parse_error() {
    let result = plan_statement(&snapshot(), "SELEC id FRM users", SqlDialect::Generic);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Query parse error"));
}

#[test]
fn test_unknown_table_in_statement_is_skipped_by_rules() {
    // resolved via its alias, but absent from the snapshot: no coverage to
    // check, no issue, no panic
    let plan = plan_statement(
        &snapshot(),
        "SELECT u.id FROM unknown_table u WHERE u.col = 1",
        SqlDialect::Generic
    )
    .unwrap();

    assert!(plan.issues.is_empty());
}

#[test]
fn test_plan_queries_batch_preserves_order() {
    let plans = plan_queries(
        &RuleRunner::new(),
        &snapshot(),
        "SELECT id FROM users WHERE email = 'x'; UPDATE users SET id = 2; TRUNCATE TABLE users",
        SqlDialect::Generic
    )
    .unwrap();

    assert_eq!(plans.len(), 3);
    assert_eq!(plans[0].kind, StatementKind::Select);
    assert_eq!(plans[0].issues.len(), 1);
    assert_eq!(plans[1].kind, StatementKind::Update);
    assert_eq!(plans[1].issues.len(), 1);
    assert_eq!(plans[2].kind, StatementKind::Unsupported);
    assert!(plans[2].issues.is_empty());
}

#[test]
fn test_disabled_rule_is_skipped() {
    let config = RulesConfig {
        disabled: vec!["where_clause_missing_index".to_string()],
        ..Default::default()
    };
    let runner = RuleRunner::with_config(&config);

    let plan = plan_statement_with(
        &runner,
        &snapshot(),
        "SELECT id FROM users WHERE email = 'x'",
        SqlDialect::Generic
    )
    .unwrap();

    assert!(plan.issues.is_empty());
}

#[test]
fn test_severity_override_applies() {
    let mut severity = std::collections::HashMap::new();
    severity.insert(
        "where_clause_missing_index".to_string(),
        "high".to_string()
    );
    let config = RulesConfig {
        disabled: vec![],
        severity
    };
    let runner = RuleRunner::with_config(&config);

    let plan = plan_statement_with(
        &runner,
        &snapshot(),
        "SELECT id FROM users WHERE email = 'x'",
        SqlDialect::Generic
    )
    .unwrap();

    assert_eq!(plan.issues.len(), 1);
    assert_eq!(plan.issues[0].severity, IssueSeverity::High);
}
