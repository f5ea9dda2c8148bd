//! SQL statement classification and statement model extraction.
//!
//! [`classify_statement`] parses raw SQL text with the external parser and
//! maps the AST root to a [`StatementKind`]; anything outside
//! SELECT/INSERT/UPDATE/DELETE classifies as `Unsupported`, which callers
//! treat as "nothing to analyze" rather than an error.
//! [`ClassifiedStatement::extract_model`] then walks the AST against a
//! schema snapshot to build the normalized [`StatementModel`] the rule
//! engine consumes.

mod extract;
mod types;

use sqlparser::{
    ast::Statement,
    dialect::{Dialect, GenericDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect},
    parser::Parser
};
pub use types::{
    ColumnSet, ColumnVec, ColumnsByTable, DeleteModel, InsertModel, SelectModel, StatementKind,
    StatementModel, UpdateModel
};

use crate::{
    error::{AppResult, query_parse_error},
    schema::SchemaSnapshot
};

/// SQL dialect for parsing
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub enum SqlDialect {
    #[default]
    Generic,
    MySQL,
    PostgreSQL,
    SQLite
}

impl SqlDialect {
    /// Convert to sqlparser dialect for parsing
    pub fn into_parser_dialect(self) -> Box<dyn Dialect> {
        match self {
            Self::Generic => Box::new(GenericDialect {}),
            Self::MySQL => Box::new(MySqlDialect {}),
            Self::PostgreSQL => Box::new(PostgreSqlDialect {}),
            Self::SQLite => Box::new(SQLiteDialect {})
        }
    }
}

/// A parsed statement together with its classification.
#[derive(Debug)]
pub struct ClassifiedStatement {
    pub kind:  StatementKind,
    statement: Option<Box<Statement>>
}

impl ClassifiedStatement {
    /// Build the normalized statement model for this statement.
    ///
    /// Returns `Ok(None)` when there is nothing to analyze: unsupported
    /// statement kinds, set-operation bodies, and `information_schema`
    /// queries. Resolution failures abort the extraction; no partial model
    /// is ever surfaced.
    pub fn extract_model(&self, snapshot: &SchemaSnapshot) -> AppResult<Option<StatementModel>> {
        let Some(statement) = self.statement.as_deref() else {
            return Ok(None);
        };

        match statement {
            Statement::Query(query) => Ok(extract::extract_select(query, snapshot)?
                .map(StatementModel::Select)),
            Statement::Update(update) => Ok(Some(StatementModel::Update(extract::extract_update(
                &update.table,
                &update.assignments,
                snapshot
            )))),
            Statement::Insert(insert) => {
                Ok(Some(StatementModel::Insert(extract::extract_insert(insert))))
            }
            Statement::Delete(delete) => {
                Ok(Some(StatementModel::Delete(extract::extract_delete(delete))))
            }
            _ => Ok(None)
        }
    }
}

/// Parse and classify every statement in `sql`.
///
/// # Errors
///
/// Fails with a parse error when the text cannot be parsed at all.
/// Statement shapes outside SELECT/INSERT/UPDATE/DELETE (DDL, transactions,
/// ...) classify as [`StatementKind::Unsupported`] and are not errors.
pub fn parse_statements(sql: &str, dialect: SqlDialect) -> AppResult<Vec<ClassifiedStatement>> {
    let parser_dialect = dialect.into_parser_dialect();
    let statements = Parser::parse_sql(parser_dialect.as_ref(), sql)
        .map_err(|e| query_parse_error(e.to_string()))?;
    Ok(statements.into_iter().map(classify).collect())
}

/// Classify the first statement in `sql`; empty input is `Unsupported`.
pub fn classify_statement(sql: &str, dialect: SqlDialect) -> AppResult<ClassifiedStatement> {
    let mut statements = parse_statements(sql, dialect)?;
    if statements.is_empty() {
        return Ok(ClassifiedStatement {
            kind:      StatementKind::Unsupported,
            statement: None
        });
    }
    Ok(statements.swap_remove(0))
}

fn classify(statement: Statement) -> ClassifiedStatement {
    let kind = match &statement {
        Statement::Query(_) => StatementKind::Select,
        Statement::Insert(_) => StatementKind::Insert,
        Statement::Update(_) => StatementKind::Update,
        Statement::Delete(_) => StatementKind::Delete,
        _ => StatementKind::Unsupported
    };

    ClassifiedStatement {
        kind,
        statement: Some(Box::new(statement))
    }
}
