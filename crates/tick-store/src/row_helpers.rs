use tracing::warn;

use crate::error::StoreError;

/// Get a required column value from a row, returning CorruptRow on failure.
pub fn get<T: rusqlite::types::FromSql>(
    row: &rusqlite::Row<'_>,
    idx: usize,
    table: &'static str,
    column: &'static str,
) -> Result<T, StoreError> {
    row.get(idx).map_err(|e| StoreError::CorruptRow {
        table,
        column,
        detail: e.to_string(),
    })
}

/// Get an optional column value.
pub fn get_opt<T: rusqlite::types::FromSql>(
    row: &rusqlite::Row<'_>,
    idx: usize,
    table: &'static str,
    column: &'static str,
) -> Result<Option<T>, StoreError> {
    row.get(idx).map_err(|e| StoreError::CorruptRow {
        table,
        column,
        detail: e.to_string(),
    })
}

/// Log a failed statement and convert the error.
///
/// Only the statement text is logged, never the bound values.
pub fn check<T>(
    operation: &'static str,
    sql: &str,
    result: rusqlite::Result<T>,
) -> Result<T, StoreError> {
    result.map_err(|e| {
        warn!(operation, statement = sql, error = %e, "statement failed");
        StoreError::Statement {
            operation,
            detail: e.to_string(),
        }
    })
}

/// Numbered placeholders `?start, ?start+1, ...` for an `IN (...)` list.
pub fn placeholders(start: usize, count: usize) -> String {
    (start..start + count)
        .map(|n| format!("?{n}"))
        .collect::<Vec<_>>()
        .join(", ")
}
