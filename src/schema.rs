//! In-memory representation of a loaded database schema.
//!
//! A [`SchemaSnapshot`] is the engine-agnostic view of one database: its
//! name and the table/column/primary-key metadata the analysis engine reads.
//! Snapshots are produced by an external schema-loading service (MySQL and
//! Postgres loaders normalize into this one shape at their boundary) and are
//! immutable once built; the engine never issues database queries itself.
//!
//! # Example
//!
//! ```
//! use queryplan::schema::{Column, Engine, SchemaSnapshot, Table};
//!
//! let users = Table::new("users")
//!     .with_column(Column::new("id", "int"))
//!     .with_column(Column::new("email", "varchar"))
//!     .with_primary_keys(["id"]);
//!
//! let snapshot = SchemaSnapshot::new("app", Engine::MySql, vec![users]);
//!
//! assert!(snapshot.table("users").is_some());
//! assert!(snapshot.table("users").unwrap().has_column("email"));
//! ```

pub mod state;

use serde::Serialize;

/// Database engine a snapshot was loaded from.
///
/// Provenance only: tables and columns are already normalized, so analysis
/// never branches on the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Engine {
    MySql,
    Postgres
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MySql => write!(f, "mysql"),
            Self::Postgres => write!(f, "postgres")
        }
    }
}

/// Column metadata as reported by the engine's information schema.
#[derive(Debug, Clone, Serialize)]
pub struct Column {
    /// Column name
    pub name:           String,
    /// Base data type (e.g., "int", "varchar")
    pub data_type:      String,
    /// Full column type (e.g., "varchar(255)")
    pub column_type:    String,
    /// Whether NULL values are allowed
    pub is_nullable:    bool,
    /// Key participation marker (e.g., "PRI", "MUL"), empty if none
    pub column_key:     String,
    /// Default value, if any
    pub column_default: Option<String>,
    /// Extra attributes (e.g., "auto_increment")
    pub extra:          String
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        let data_type = data_type.into();
        Self {
            name: name.into(),
            column_type: data_type.clone(),
            data_type,
            is_nullable: false,
            column_key: String::new(),
            column_default: None,
            extra: String::new()
        }
    }
}

/// Complete information about one database table.
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    /// Table name, unique within a snapshot
    pub name:                String,
    /// Ordered list of columns
    pub columns:             Vec<Column>,
    /// Primary key column names in key order; empty when the table has no
    /// primary key
    pub primary_keys:        Vec<String>,
    /// Row-count hint from table statistics
    pub estimated_row_count: i64
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:                name.into(),
            columns:             Vec::new(),
            primary_keys:        Vec::new(),
            estimated_row_count: 0
        }
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_primary_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        self.primary_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_estimated_row_count(mut self, count: i64) -> Self {
        self.estimated_row_count = count;
        self
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

/// One database's metadata, read by the analysis engine.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaSnapshot {
    pub database_name: String,
    pub engine:        Engine,
    pub tables:        Vec<Table>
}

impl SchemaSnapshot {
    pub fn new(database_name: impl Into<String>, engine: Engine, tables: Vec<Table>) -> Self {
        Self {
            database_name: database_name.into(),
            engine,
            tables
        }
    }

    /// Look up a table by exact name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }
}
