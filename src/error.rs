pub use masterror::{AppError, AppResult};

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create query parse error with optional position info
pub fn query_parse_error(message: impl Into<String>) -> AppError {
    let msg = message.into();
    AppError::bad_request(format_sql_error("Query parse error", &msg))
}

/// Create error for a table reference that is neither a known alias nor
/// resolvable to the single table in scope
pub fn ambiguous_table_error(name: &str) -> AppError {
    AppError::bad_request(format!("table {:?} is ambiguous or unknown", name))
}

/// Create error for an unresolvable column qualifier
pub fn unknown_table_alias_error(alias: &str) -> AppError {
    AppError::bad_request(format!("table alias {:?} not found", alias))
}

/// Create error for a column that no candidate table contains
pub fn column_not_found_error(column: &str) -> AppError {
    AppError::bad_request(format!("column {:?} not found in any table", column))
}

/// Create error for a bare `*` projection with more than one table in scope
pub fn ambiguous_wildcard_error() -> AppError {
    AppError::bad_request(String::from(
        "wildcard projection is ambiguous with multiple tables in scope"
    ))
}

/// Create error for analysis attempted before the schema snapshot is ready
pub fn schema_not_ready_error(state: &str) -> AppError {
    AppError::service(format!(
        "schema snapshot is not ready for analysis (state: {})",
        state
    ))
}

/// Create error for a schema load that failed or was cancelled
pub fn schema_load_error(message: impl Into<String>) -> AppError {
    AppError::service(format!("schema load failed: {}", message.into()))
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Prepend the extraction phase that failed, preserving the inner message
pub fn with_phase(phase: &str, err: AppError) -> AppError {
    AppError::bad_request(format!("{}: {}", phase, err))
}

/// Format SQL error with position highlighting
fn format_sql_error(prefix: &str, message: &str) -> String {
    // sqlparser errors carry "... at Line: X, Column Y"
    if let Some(pos) = extract_position(message) {
        format!(
            "{} at line {}, column {}:\n  {}",
            prefix, pos.line, pos.column, message
        )
    } else {
        format!("{}:\n  {}", prefix, message)
    }
}

struct SqlPosition {
    line:   usize,
    column: usize
}

fn extract_position(message: &str) -> Option<SqlPosition> {
    // Look for "Line: X, Column Y" pattern
    let line_marker = "Line: ";
    let col_marker = ", Column ";

    if let Some(line_start) = message.find(line_marker) {
        let line_num_start = line_start + line_marker.len();
        if let Some(col_start) = message[line_num_start..].find(col_marker) {
            let line_str = &message[line_num_start..line_num_start + col_start];
            let col_num_start = line_num_start + col_start + col_marker.len();

            // Find end of column number
            let col_end = message[col_num_start..]
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(message.len() - col_num_start);

            let col_str = &message[col_num_start..col_num_start + col_end];

            if let (Ok(line), Ok(column)) = (line_str.parse(), col_str.parse()) {
                return Some(SqlPosition { line, column });
            }
        }
    }

    None
}
