use compact_str::CompactString;
use sqlparser::ast::{BinaryOperator, Expr};

use super::resolver::{AliasLookup, resolve_column_table};
use crate::{error::AppResult, schema::SchemaSnapshot, statement::types::ColumnsByTable};

/// Recursively collect resolved column references from a predicate tree
/// into a per-table bucket.
///
/// Comparison, AND, OR, and parenthesized expressions recurse into their
/// operands. Every other expression shape (`IN`, `BETWEEN`, subqueries,
/// function predicates, ...) is not walked further and contributes nothing.
pub(crate) fn walk_condition(
    expr: &Expr,
    tables: &[CompactString],
    aliases: &AliasLookup,
    snapshot: &SchemaSnapshot,
    bucket: &mut ColumnsByTable
) -> AppResult<()> {
    match expr {
        Expr::Identifier(ident) => {
            let table = resolve_column_table(tables, "", &ident.value, aliases, snapshot)?;
            bucket
                .entry(table)
                .or_default()
                .insert(ident.value.as_str().into());
        }
        Expr::CompoundIdentifier(idents) if idents.len() >= 2 => {
            // only the immediate qualifier matters: db.users.id resolves "users"
            let column = &idents[idents.len() - 1].value;
            let qualifier = &idents[idents.len() - 2].value;
            let table = resolve_column_table(tables, qualifier, column, aliases, snapshot)?;
            bucket.entry(table).or_default().insert(column.as_str().into());
        }
        Expr::BinaryOp {
            left,
            op,
            right
        } if walkable_operator(op) => {
            walk_condition(left, tables, aliases, snapshot, bucket)?;
            walk_condition(right, tables, aliases, snapshot, bucket)?;
        }
        Expr::Nested(inner) => {
            walk_condition(inner, tables, aliases, snapshot, bucket)?;
        }
        _ => {}
    }

    Ok(())
}

fn walkable_operator(op: &BinaryOperator) -> bool {
    matches!(
        op,
        BinaryOperator::Eq
            | BinaryOperator::NotEq
            | BinaryOperator::Lt
            | BinaryOperator::LtEq
            | BinaryOperator::Gt
            | BinaryOperator::GtEq
            | BinaryOperator::And
            | BinaryOperator::Or
    )
}
