use queryplan::{
    output::{NO_ISSUES, OutputFormat, OutputOptions, format_issues, format_plan},
    plan::plan_statement,
    schema::{Column, Engine, SchemaSnapshot, Table},
    statement::SqlDialect
};

fn snapshot() -> SchemaSnapshot {
    let users = Table::new("users")
        .with_column(Column::new("id", "int"))
        .with_column(Column::new("email", "varchar"))
        .with_primary_keys(["id"]);
    let orders = Table::new("orders")
        .with_column(Column::new("id", "int"))
        .with_column(Column::new("user_id", "int"))
        .with_primary_keys(["id"]);
    SchemaSnapshot::new("app", Engine::MySql, vec![users, orders])
}

fn plain_opts(format: OutputFormat) -> OutputOptions {
    OutputOptions {
        format,
        colored: false,
        verbose: false
    }
}

#[test]
fn test_empty_issue_list_renders_sentinel() {
    assert_eq!(format_issues(&[]), NO_ISSUES);
}

#[test]
fn test_issues_render_one_message_per_line() {
    let plan = plan_statement(
        &snapshot(),
        "SELECT users.id FROM users INNER JOIN orders ON users.id = orders.user_id \
         WHERE users.email = 'x'",
        SqlDialect::Generic
    )
    .unwrap();

    let report = format_issues(&plan.issues);
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("where clause"));
    assert!(lines[1].contains("join clause"));
}

#[test]
fn test_text_plan_contains_kind_and_sentinel() {
    let plan = plan_statement(
        &snapshot(),
        "SELECT id FROM users WHERE id = 1",
        SqlDialect::Generic
    )
    .unwrap();

    let text = format_plan(&plan, &plain_opts(OutputFormat::Text));
    assert!(text.contains("Statement (SELECT):"));
    assert!(text.contains(NO_ISSUES));
}

#[test]
fn test_text_plan_lists_issue_severity() {
    let plan = plan_statement(
        &snapshot(),
        "SELECT id FROM users WHERE email = 'x'",
        SqlDialect::Generic
    )
    .unwrap();

    let text = format_plan(&plan, &plain_opts(OutputFormat::Text));
    assert!(text.contains("[low]"));
    assert!(text.contains("not indexed"));
}

#[test]
fn test_verbose_text_plan_summarizes_model() {
    let plan = plan_statement(
        &snapshot(),
        "SELECT id FROM users WHERE email = 'x'",
        SqlDialect::Generic
    )
    .unwrap();

    let opts = OutputOptions {
        format:  OutputFormat::Text,
        colored: false,
        verbose: true
    };
    let text = format_plan(&plan, &opts);
    assert!(text.contains("Tables: users"));
    assert!(text.contains("WHERE columns: users.email"));
}

#[test]
fn test_json_plan_round_trips() {
    let plan = plan_statement(
        &snapshot(),
        "SELECT id FROM users WHERE email = 'x'",
        SqlDialect::Generic
    )
    .unwrap();

    let json = format_plan(&plan, &plain_opts(OutputFormat::Json));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["kind"], "Select");
    assert_eq!(value["issues"][0]["issue_type"], "where_clause_missing_index");
}

#[test]
fn test_yaml_plan_is_nonempty() {
    let plan = plan_statement(
        &snapshot(),
        "SELECT id FROM users WHERE id = 1",
        SqlDialect::Generic
    )
    .unwrap();

    let yaml = format_plan(&plan, &plain_opts(OutputFormat::Yaml));
    assert!(yaml.contains("kind"));
}
