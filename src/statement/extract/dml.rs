use compact_str::CompactString;
use indexmap::IndexSet;
use sqlparser::ast::{
    Assignment, AssignmentTarget, Delete, FromTable, Insert, ObjectName, ObjectNamePart, SetExpr,
    TableFactor, TableWithJoins
};

use crate::{
    schema::SchemaSnapshot,
    statement::types::{DeleteModel, InsertModel, UpdateModel}
};

/// Build an [`UpdateModel`] from the target table expression and the
/// assignment list.
///
/// Target tables are flattened from both sides of any join and kept raw
/// (not alias-resolved). An assignment lands under the first extracted
/// table whose column set contains it; targets no table knows go to the
/// unresolved bucket rather than being guessed onto a table.
pub(crate) fn extract_update(
    table: &TableWithJoins,
    assignments: &[Assignment],
    snapshot: &SchemaSnapshot
) -> UpdateModel {
    let mut tables = IndexSet::new();
    collect_raw_factor(&table.relation, &mut tables);
    for join in &table.joins {
        collect_raw_factor(&join.relation, &mut tables);
    }
    let tables: Vec<CompactString> = tables.into_iter().collect();

    let mut model = UpdateModel {
        tables,
        columns_by_table:   Default::default(),
        unresolved_columns: Default::default()
    };

    for assignment in assignments {
        match &assignment.target {
            AssignmentTarget::ColumnName(name) => {
                record_assignment(&object_name_tail(name), snapshot, &mut model);
            }
            AssignmentTarget::Tuple(names) => {
                for name in names {
                    record_assignment(&object_name_tail(name), snapshot, &mut model);
                }
            }
        }
    }

    model
}

fn record_assignment(column: &CompactString, snapshot: &SchemaSnapshot, model: &mut UpdateModel) {
    let owner = model
        .tables
        .iter()
        .find(|t| {
            snapshot
                .table(t.as_str())
                .is_some_and(|meta| meta.has_column(column.as_str()))
        })
        .cloned();

    match owner {
        Some(table) => {
            model
                .columns_by_table
                .entry(table)
                .or_default()
                .insert(column.clone());
        }
        None => {
            model.unresolved_columns.insert(column.clone());
        }
    }
}

/// Build an [`InsertModel`]: target table, column list, and value tuples.
///
/// Present for structural validation and future rules; nothing fires on
/// inserts today.
pub(crate) fn extract_insert(insert: &Insert) -> InsertModel {
    let mut values = Vec::new();
    if let Some(source) = &insert.source
        && let SetExpr::Values(rows) = source.body.as_ref()
    {
        for row in &rows.rows {
            values.push(row.iter().map(ToString::to_string).collect());
        }
    }

    InsertModel {
        table: insert.table.to_string().into(),
        columns: insert
            .columns
            .iter()
            .map(|c| CompactString::from(c.value.as_str()))
            .collect(),
        values
    }
}

/// Build a [`DeleteModel`]: the set of target tables from FROM and USING.
pub(crate) fn extract_delete(delete: &Delete) -> DeleteModel {
    let mut tables = IndexSet::new();

    let from_tables = match &delete.from {
        FromTable::WithFromKeyword(tables) | FromTable::WithoutKeyword(tables) => tables
    };
    for table in from_tables {
        collect_raw_factor(&table.relation, &mut tables);
        for join in &table.joins {
            collect_raw_factor(&join.relation, &mut tables);
        }
    }

    if let Some(using) = &delete.using {
        for table in using {
            collect_raw_factor(&table.relation, &mut tables);
            for join in &table.joins {
                collect_raw_factor(&join.relation, &mut tables);
            }
        }
    }

    DeleteModel {
        tables: tables.into_iter().collect()
    }
}

fn collect_raw_factor(factor: &TableFactor, tables: &mut IndexSet<CompactString>) {
    match factor {
        TableFactor::Table {
            name, ..
        } => {
            tables.insert(name.to_string().into());
        }
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => {
            collect_raw_factor(&table_with_joins.relation, tables);
            for join in &table_with_joins.joins {
                collect_raw_factor(&join.relation, tables);
            }
        }
        other => {
            tables.insert(other.to_string().into());
        }
    }
}

fn object_name_tail(name: &ObjectName) -> CompactString {
    name.0
        .last()
        .and_then(ObjectNamePart::as_ident)
        .map(|ident| CompactString::from(ident.value.as_str()))
        .unwrap_or_else(|| CompactString::from(name.to_string()))
}
