use colored::Colorize;

use crate::{
    plan::QueryPlan,
    rules::{IssueSeverity, QueryIssue},
    statement::{ColumnsByTable, StatementModel}
};

/// Output format for results
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool,
    pub verbose: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true,
            verbose: false
        }
    }
}

/// Sentinel returned when a statement produced no issues
pub const NO_ISSUES: &str = "No issues found";

/// Format a list of issues, one message per line in rule-then-discovery
/// order; returns the sentinel when the list is empty.
pub fn format_issues(issues: &[QueryIssue]) -> String {
    if issues.is_empty() {
        return NO_ISSUES.to_string();
    }
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a full query plan based on output options
pub fn format_plan(plan: &QueryPlan, opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(plan).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(plan).unwrap_or_default(),
        OutputFormat::Text => format_text_plan(plan, opts)
    }
}

fn format_text_plan(plan: &QueryPlan, opts: &OutputOptions) -> String {
    let mut out = String::new();

    let header = format!("Statement ({}):", plan.kind);
    if opts.colored {
        out.push_str(&header.cyan().bold().to_string());
    } else {
        out.push_str(&header);
    }
    out.push('\n');

    if opts.verbose
        && let Some(model) = &plan.model
    {
        push_model_summary(model, &mut out);
    }

    if plan.issues.is_empty() {
        out.push_str(NO_ISSUES);
        out.push('\n');
    } else {
        for issue in &plan.issues {
            let label = severity_label(issue.severity, opts.colored);
            out.push_str(&format!("[{}] {}\n", label, issue.message));
        }
    }

    out
}

fn severity_label(severity: IssueSeverity, colored: bool) -> String {
    if !colored {
        return severity.to_string();
    }
    match severity {
        IssueSeverity::Low => severity.to_string().yellow().to_string(),
        IssueSeverity::Medium => severity.to_string().red().to_string(),
        IssueSeverity::High => severity.to_string().red().bold().to_string()
    }
}

fn push_model_summary(model: &StatementModel, out: &mut String) {
    match model {
        StatementModel::Select(select) => {
            push_tables(&select.tables, out);
            push_bucket("Projected columns", &select.columns_by_table, out);
            push_bucket("WHERE columns", &select.where_by_table, out);
            push_bucket("JOIN columns", &select.join_by_table, out);
        }
        StatementModel::Update(update) => {
            push_tables(&update.tables, out);
            push_bucket("Updated columns", &update.columns_by_table, out);
            if !update.unresolved_columns.is_empty() {
                let cols: Vec<&str> =
                    update.unresolved_columns.iter().map(|c| c.as_str()).collect();
                out.push_str(&format!("Unresolved columns: {}\n", cols.join(", ")));
            }
        }
        StatementModel::Insert(insert) => {
            out.push_str(&format!("Table: {}\n", insert.table));
            if !insert.columns.is_empty() {
                let cols: Vec<&str> = insert.columns.iter().map(|c| c.as_str()).collect();
                out.push_str(&format!("Columns: {}\n", cols.join(", ")));
            }
            out.push_str(&format!("Value tuples: {}\n", insert.values.len()));
        }
        StatementModel::Delete(delete) => {
            push_tables(&delete.tables, out);
        }
    }
}

fn push_tables(tables: &[compact_str::CompactString], out: &mut String) {
    let names: Vec<&str> = tables.iter().map(|t| t.as_str()).collect();
    out.push_str(&format!("Tables: {}\n", names.join(", ")));
}

fn push_bucket(label: &str, bucket: &ColumnsByTable, out: &mut String) {
    if bucket.is_empty() {
        return;
    }
    let cols: Vec<String> = bucket
        .iter()
        .flat_map(|(table, columns)| {
            columns.iter().map(move |c| format!("{}.{}", table, c))
        })
        .collect();
    out.push_str(&format!("{}: {}\n", label, cols.join(", ")));
}
