//! Per-table index model, used as a coverage oracle by the rule engine.
//!
//! The model is derived from table metadata on each analysis run, never
//! persisted. Today the only index source is the primary key; secondary
//! indexes are not yet reported by the schema loaders.

use std::collections::BTreeMap;

use compact_str::CompactString;
use serde::Serialize;

use crate::{schema::Table, statement::ColumnVec};

/// One known index on a table.
#[derive(Debug, Clone, Serialize)]
pub struct Index {
    /// Indexed column names, in index order
    pub columns:        ColumnVec,
    pub is_primary_key: bool,
    pub is_unique:      bool
}

impl Index {
    /// Unordered membership check: a composite index `(a, b)` is treated as
    /// covering `b` alone, even though a real planner could not use it that
    /// way. An index with no columns covers nothing.
    pub fn covers(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c.as_str() == column)
    }
}

/// Mapping of table name to the indexes known for it.
pub type IndexModel = BTreeMap<String, Vec<Index>>;

/// Derive the index model for a set of tables.
///
/// Every table contributes exactly one index built from its primary key,
/// marked primary and unique, even when the table has no primary key (the
/// resulting empty index covers no column).
pub fn build_index_model(tables: &[Table]) -> IndexModel {
    let mut model = IndexModel::new();
    for table in tables {
        let primary = Index {
            columns:        table
                .primary_keys
                .iter()
                .map(|c| CompactString::from(c.as_str()))
                .collect(),
            is_primary_key: true,
            is_unique:      true
        };
        model.entry(table.name.clone()).or_default().push(primary);
    }
    model
}
