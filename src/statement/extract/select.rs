use compact_str::CompactString;
use sqlparser::ast::{
    Expr, Join, JoinConstraint, JoinOperator, Query, Select, SelectItem,
    SelectItemQualifiedWildcardKind, SetExpr, TableFactor, TableWithJoins
};

use super::{
    expr::walk_condition,
    resolver::{AliasLookup, collect_tables, resolve_column_table, resolve_table}
};
use crate::{
    error::{AppResult, ambiguous_wildcard_error, with_phase},
    schema::SchemaSnapshot,
    statement::types::SelectModel
};

/// Build a [`SelectModel`] from a parsed query.
///
/// Returns `Ok(None)` when there is nothing to analyze: set-operation and
/// VALUES bodies, and any statement referencing `information_schema`.
pub(crate) fn extract_select(
    query: &Query,
    snapshot: &SchemaSnapshot
) -> AppResult<Option<SelectModel>> {
    let SetExpr::Select(select) = query.body.as_ref() else {
        return Ok(None);
    };

    if references_information_schema(&select.from) {
        return Ok(None);
    }

    let (aliases, tables) = collect_tables(&select.from);
    let mut model = SelectModel::new(tables);

    process_projection(select, &aliases, snapshot, &mut model)
        .map_err(|e| with_phase("process select expressions", e))?;

    if let Some(selection) = &select.selection {
        walk_condition(
            selection,
            &model.tables,
            &aliases,
            snapshot,
            &mut model.where_by_table
        )
        .map_err(|e| with_phase("process where clause", e))?;
    }

    for table in &select.from {
        walk_join_tree(table, &aliases, snapshot, &mut model)
            .map_err(|e| with_phase("process join clauses", e))?;
    }

    Ok(Some(model))
}

fn references_information_schema(from: &[TableWithJoins]) -> bool {
    fn factor_references(factor: &TableFactor) -> bool {
        match factor {
            TableFactor::Table {
                name, ..
            } => {
                name.0.len() > 1
                    && name.0[0]
                        .to_string()
                        .eq_ignore_ascii_case("information_schema")
            }
            TableFactor::NestedJoin {
                table_with_joins, ..
            } => {
                factor_references(&table_with_joins.relation)
                    || table_with_joins
                        .joins
                        .iter()
                        .any(|j| factor_references(&j.relation))
            }
            _ => false
        }
    }

    from.iter().any(|table| {
        factor_references(&table.relation)
            || table.joins.iter().any(|j| factor_references(&j.relation))
    })
}

fn process_projection(
    select: &Select,
    aliases: &AliasLookup,
    snapshot: &SchemaSnapshot,
    model: &mut SelectModel
) -> AppResult<()> {
    for item in &select.projection {
        match item {
            SelectItem::Wildcard(_) => {
                if model.tables.len() != 1 {
                    return Err(ambiguous_wildcard_error());
                }
                expand_wildcard(model.tables[0].clone(), snapshot, model);
            }
            SelectItem::QualifiedWildcard(kind, _) => {
                if let SelectItemQualifiedWildcardKind::ObjectName(name) = kind {
                    let table = resolve_table(&name.to_string(), aliases, &model.tables)?;
                    expand_wildcard(table, snapshot, model);
                }
            }
            SelectItem::UnnamedExpr(expr)
            | SelectItem::ExprWithAlias {
                expr, ..
            } => {
                project_expr(expr, aliases, snapshot, model)?;
            }
        }
    }

    Ok(())
}

/// Expand a wildcard to every column of the resolved table. A table the
/// snapshot does not know contributes nothing.
fn expand_wildcard(table: CompactString, snapshot: &SchemaSnapshot, model: &mut SelectModel) {
    let Some(meta) = snapshot.table(table.as_str()) else {
        return;
    };
    let bucket = model.columns_by_table.entry(table).or_default();
    for column in meta.column_names() {
        bucket.insert(column.into());
    }
}

fn project_expr(
    expr: &Expr,
    aliases: &AliasLookup,
    snapshot: &SchemaSnapshot,
    model: &mut SelectModel
) -> AppResult<()> {
    match expr {
        Expr::Identifier(ident) => {
            let table = resolve_column_table(&model.tables, "", &ident.value, aliases, snapshot)?;
            model
                .columns_by_table
                .entry(table)
                .or_default()
                .insert(ident.value.as_str().into());
        }
        Expr::CompoundIdentifier(idents) if idents.len() >= 2 => {
            let column = &idents[idents.len() - 1].value;
            let qualifier = &idents[idents.len() - 2].value;
            let table =
                resolve_column_table(&model.tables, qualifier, column, aliases, snapshot)?;
            model
                .columns_by_table
                .entry(table)
                .or_default()
                .insert(column.as_str().into());
        }
        Expr::Function(func) => {
            // best effort: a call is attributed to the sole table in scope;
            // with several tables it goes unrecorded
            if model.tables.len() == 1 {
                let table = model.tables[0].clone();
                model
                    .columns_by_table
                    .entry(table)
                    .or_default()
                    .insert(func.name.to_string().to_uppercase().into());
            }
        }
        _ => {}
    }

    Ok(())
}

fn walk_join_tree(
    table: &TableWithJoins,
    aliases: &AliasLookup,
    snapshot: &SchemaSnapshot,
    model: &mut SelectModel
) -> AppResult<()> {
    descend_factor(&table.relation, aliases, snapshot, model)?;

    for join in &table.joins {
        descend_factor(&join.relation, aliases, snapshot, model)?;
        if let Some(on_expr) = join_on_expr(join) {
            walk_condition(
                on_expr,
                &model.tables,
                aliases,
                snapshot,
                &mut model.join_by_table
            )?;
        }
    }

    Ok(())
}

fn descend_factor(
    factor: &TableFactor,
    aliases: &AliasLookup,
    snapshot: &SchemaSnapshot,
    model: &mut SelectModel
) -> AppResult<()> {
    if let TableFactor::NestedJoin {
        table_with_joins, ..
    } = factor
    {
        walk_join_tree(table_with_joins, aliases, snapshot, model)?;
    }
    Ok(())
}

fn join_on_expr(join: &Join) -> Option<&Expr> {
    let constraint = match &join.join_operator {
        JoinOperator::Join(constraint)
        | JoinOperator::Inner(constraint)
        | JoinOperator::Left(constraint)
        | JoinOperator::LeftOuter(constraint)
        | JoinOperator::Right(constraint)
        | JoinOperator::RightOuter(constraint)
        | JoinOperator::FullOuter(constraint) => constraint,
        _ => return None
    };

    match constraint {
        JoinConstraint::On(expr) => Some(expr),
        _ => None
    }
}
