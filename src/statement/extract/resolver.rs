//! Alias and column resolution against the tables a statement references.

use compact_str::CompactString;
use indexmap::{IndexMap, IndexSet};
use sqlparser::ast::{TableFactor, TableWithJoins};

use crate::{
    error::{
        AppResult, ambiguous_table_error, column_not_found_error, unknown_table_alias_error
    },
    schema::SchemaSnapshot
};

/// Alias or bare table name mapped to its canonical table name.
///
/// Canonical means schema-qualified (`db.users`) when the statement wrote a
/// qualifier, else the bare table name. Unaliased tables map to themselves.
pub(crate) type AliasLookup = IndexMap<CompactString, CompactString>;

/// Walk a FROM/JOIN tree, collecting the alias lookup and the canonical
/// table list in first-seen order. Joins recurse over both sub-expressions
/// so nested joins of arbitrary depth are all captured.
pub(crate) fn collect_tables(from: &[TableWithJoins]) -> (AliasLookup, Vec<CompactString>) {
    let mut aliases = AliasLookup::new();
    let mut tables = IndexSet::new();

    for table in from {
        collect_from_factor(&table.relation, &mut aliases, &mut tables);
        for join in &table.joins {
            collect_from_factor(&join.relation, &mut aliases, &mut tables);
        }
    }

    (aliases, tables.into_iter().collect())
}

fn collect_from_factor(
    factor: &TableFactor,
    aliases: &mut AliasLookup,
    tables: &mut IndexSet<CompactString>
) {
    match factor {
        TableFactor::Table {
            name,
            alias,
            ..
        } => {
            let canonical = CompactString::from(name.to_string());
            match alias {
                Some(alias) => {
                    aliases.insert(alias.name.value.as_str().into(), canonical.clone());
                }
                None => {
                    aliases.insert(canonical.clone(), canonical.clone());
                }
            }
            tables.insert(canonical);
        }
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => {
            collect_from_factor(&table_with_joins.relation, aliases, tables);
            for join in &table_with_joins.joins {
                collect_from_factor(&join.relation, aliases, tables);
            }
        }
        _ => {}
    }
}

/// Resolve a table reference to its canonical name.
///
/// A known alias resolves to its target. An unknown (or empty) reference
/// resolves to the single table in scope when there is exactly one; with
/// any other table count it is an error.
pub(crate) fn resolve_table(
    name: &str,
    aliases: &AliasLookup,
    tables: &[CompactString]
) -> AppResult<CompactString> {
    if let Some(canonical) = aliases.get(name) {
        return Ok(canonical.clone());
    }
    if tables.len() == 1 {
        return Ok(tables[0].clone());
    }
    Err(ambiguous_table_error(name))
}

/// Resolve the table a column reference belongs to.
///
/// A non-empty qualifier must resolve via [`resolve_table`]. An unqualified
/// column is searched for in candidate-table order and the first table whose
/// column set contains it wins; a name present in two candidate tables is
/// attributed to the earlier one, a deliberate simplification rather than a
/// correctness guarantee.
pub(crate) fn resolve_column_table(
    tables: &[CompactString],
    qualifier: &str,
    column: &str,
    aliases: &AliasLookup,
    snapshot: &SchemaSnapshot
) -> AppResult<CompactString> {
    if !qualifier.is_empty() {
        return resolve_table(qualifier, aliases, tables)
            .map_err(|_| unknown_table_alias_error(qualifier));
    }

    for table in tables {
        if let Some(meta) = snapshot.table(table.as_str())
            && meta.has_column(column)
        {
            return Ok(table.clone());
        }
    }

    Err(column_not_found_error(column))
}
