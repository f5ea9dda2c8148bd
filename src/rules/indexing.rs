use serde_json::json;

use super::{Rule, RuleInfo};
use crate::{
    index::IndexModel,
    rules::types::{IssueSeverity, QueryIssue, issue_types},
    statement::{ColumnsByTable, StatementModel}
};

/// WHERE predicate column not covered by any index on its table
pub struct WhereClauseMissingIndex;

impl Rule for WhereClauseMissingIndex {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       issue_types::WHERE_CLAUSE_MISSING_INDEX,
            name:     "Where clause missing index",
            severity: IssueSeverity::Low
        }
    }

    fn check(&self, model: &StatementModel, indexes: &IndexModel) -> Vec<QueryIssue> {
        let StatementModel::Select(select) = model else {
            return vec![];
        };
        missing_index_issues(
            &select.where_by_table,
            indexes,
            issue_types::WHERE_CLAUSE_MISSING_INDEX,
            "where clause contains a column that is not indexed"
        )
    }
}

/// JOIN predicate column not covered by any index on its table
pub struct JoinClauseMissingIndex;

impl Rule for JoinClauseMissingIndex {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       issue_types::CLAUSE_MISSING_INDEX,
            name:     "Join clause missing index",
            severity: IssueSeverity::Low
        }
    }

    fn check(&self, model: &StatementModel, indexes: &IndexModel) -> Vec<QueryIssue> {
        let StatementModel::Select(select) = model else {
            return vec![];
        };
        missing_index_issues(
            &select.join_by_table,
            indexes,
            issue_types::CLAUSE_MISSING_INDEX,
            "join clause contains a column that is not indexed"
        )
    }
}

/// Updated column that is part of an index on its table
pub struct ColumnUpdatedInIndex;

impl Rule for ColumnUpdatedInIndex {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       issue_types::COLUMN_UPDATED_IN_INDEX,
            name:     "Column updated in index",
            severity: IssueSeverity::Low
        }
    }

    fn check(&self, model: &StatementModel, indexes: &IndexModel) -> Vec<QueryIssue> {
        let StatementModel::Update(update) = model else {
            return vec![];
        };

        let mut issues = Vec::new();
        for (table, columns) in &update.columns_by_table {
            let Some(table_indexes) = indexes.get(table.as_str()) else {
                continue;
            };
            for column in columns {
                if table_indexes.iter().any(|idx| idx.covers(column.as_str())) {
                    issues.push(QueryIssue::new(
                        issue_types::COLUMN_UPDATED_IN_INDEX,
                        IssueSeverity::Low,
                        format!("column updated is part of an index: {}.{}", table, column),
                        json!({ "table": table.as_str(), "column": column.as_str() })
                    ));
                }
            }
        }
        issues
    }
}

fn missing_index_issues(
    bucket: &ColumnsByTable,
    indexes: &IndexModel,
    issue_type: &'static str,
    description: &str
) -> Vec<QueryIssue> {
    let mut issues = Vec::new();
    for (table, columns) in bucket {
        // a table absent from the index model has no coverage to check
        let Some(table_indexes) = indexes.get(table.as_str()) else {
            continue;
        };
        for column in columns {
            if !table_indexes.iter().any(|idx| idx.covers(column.as_str())) {
                issues.push(QueryIssue::new(
                    issue_type,
                    IssueSeverity::Low,
                    format!("{}: {}.{}", description, table, column),
                    json!({ "table": table.as_str(), "column": column.as_str() })
                ));
            }
        }
    }
    issues
}
