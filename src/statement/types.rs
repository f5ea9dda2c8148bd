use compact_str::CompactString;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use smallvec::SmallVec;

/// Type alias for small column vectors (typically < 8 elements)
pub type ColumnVec = SmallVec<[CompactString; 8]>;

/// Deduplicated column names, kept in first-seen order
pub type ColumnSet = IndexSet<CompactString>;

/// Mapping of canonical table name to a column bucket.
///
/// Keys are always canonical table names present in the model's `tables`
/// list, never raw aliases; insertion order follows first use.
pub type ColumnsByTable = IndexMap<CompactString, ColumnSet>;

/// Kind of SQL statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Unsupported
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Select => write!(f, "SELECT"),
            Self::Insert => write!(f, "INSERT"),
            Self::Update => write!(f, "UPDATE"),
            Self::Delete => write!(f, "DELETE"),
            Self::Unsupported => write!(f, "UNSUPPORTED")
        }
    }
}

/// Normalized, schema-resolved summary of a SELECT statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectModel {
    /// Canonical table names in first-seen order
    pub tables:           Vec<CompactString>,
    /// Projected columns per table
    pub columns_by_table: ColumnsByTable,
    /// Columns referenced by the WHERE tree per table
    pub where_by_table:   ColumnsByTable,
    /// Columns referenced by JOIN ... ON predicates per table
    pub join_by_table:    ColumnsByTable
}

impl SelectModel {
    pub(crate) fn new(tables: Vec<CompactString>) -> Self {
        Self {
            tables,
            columns_by_table: ColumnsByTable::new(),
            where_by_table: ColumnsByTable::new(),
            join_by_table: ColumnsByTable::new()
        }
    }
}

/// Normalized summary of an UPDATE statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateModel {
    /// Target table names, flattened from the table expression (raw, not
    /// alias-resolved)
    pub tables:             Vec<CompactString>,
    /// Assigned columns per table
    pub columns_by_table:   ColumnsByTable,
    /// Assignment targets no extracted table's column set contains. Kept
    /// apart instead of being guessed onto a table; no rule consumes them.
    pub unresolved_columns: ColumnSet
}

/// Normalized summary of an INSERT statement.
///
/// Consumed for structural validation only; no rules fire on inserts yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertModel {
    pub table:   CompactString,
    pub columns: ColumnVec,
    /// One entry per value tuple, each value rendered back to SQL text
    pub values:  Vec<Vec<String>>
}

/// Normalized summary of a DELETE statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteModel {
    /// Target tables from the FROM/USING clauses
    pub tables: Vec<CompactString>
}

/// Statement model for any analyzable statement kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StatementModel {
    Select(SelectModel),
    Update(UpdateModel),
    Insert(InsertModel),
    Delete(DeleteModel)
}

impl StatementModel {
    pub fn kind(&self) -> StatementKind {
        match self {
            Self::Select(_) => StatementKind::Select,
            Self::Update(_) => StatementKind::Update,
            Self::Insert(_) => StatementKind::Insert,
            Self::Delete(_) => StatementKind::Delete
        }
    }
}
