//! # queryplan
//!
//! Static analysis of SQL statements against a live schema snapshot.
//!
//! Given a raw SQL statement and the table/column/index metadata of a
//! target database, `queryplan` builds a normalized model of what the
//! statement touches (tables, projected columns, predicate columns, join
//! columns, updated columns) and runs a rule engine against the schema's
//! index model to flag performance-relevant issues before the statement is
//! ever executed: predicates and joins on unindexed columns, and updates
//! that touch indexed columns.
//!
//! # Pipeline
//!
//! ```text
//! SQL text ──▶ classify ──▶ extract model ──▶ rules ──▶ issues ──▶ report
//!                                │                ▲
//!                        schema snapshot ──▶ index model
//! ```
//!
//! Parsing is delegated to [`sqlparser`]; schema metadata comes from an
//! external loading service that normalizes MySQL and Postgres catalogs
//! into one [`schema::SchemaSnapshot`] shape. The analysis itself is
//! synchronous and side-effect-free, safe to call from any number of
//! concurrent callers.
//!
//! # Example
//!
//! ```
//! use queryplan::{
//!     plan::plan_statement,
//!     schema::{Column, Engine, SchemaSnapshot, Table},
//!     statement::SqlDialect
//! };
//!
//! # fn main() -> Result<(), masterror::AppError> {
//! let users = Table::new("users")
//!     .with_column(Column::new("id", "int"))
//!     .with_column(Column::new("email", "varchar"))
//!     .with_primary_keys(["id"]);
//! let snapshot = SchemaSnapshot::new("app", Engine::MySql, vec![users]);
//!
//! let plan = plan_statement(
//!     &snapshot,
//!     "SELECT id FROM users WHERE email = 'x'",
//!     SqlDialect::Generic
//! )?;
//!
//! assert_eq!(plan.issues.len(), 1);
//! assert_eq!(plan.issues[0].issue_type, "where_clause_missing_index");
//! # Ok(())
//! # }
//! ```
//!
//! Schema loading runs in the background relative to interactive input;
//! [`schema::state`] provides the readiness signal callers consult so a
//! statement is never analyzed against an incomplete snapshot.

pub mod config;
pub mod error;
pub mod index;
pub mod output;
pub mod plan;
pub mod rules;
pub mod schema;
pub mod statement;
