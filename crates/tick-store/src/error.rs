use tick_core::{CategoryId, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),

    /// A statement failed; the statement text has already been logged.
    #[error("{operation} failed: {detail}")]
    Statement {
        operation: &'static str,
        detail: String,
    },

    #[error("corrupt row in {table}.{column}: {detail}")]
    CorruptRow {
        table: &'static str,
        column: &'static str,
        detail: String,
    },

    #[error("unknown category id {0}")]
    UnknownCategory(CategoryId),

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statement_error_names_operation() {
        let err = StoreError::Statement {
            operation: "mark_done",
            detail: "no such table: tasks".into(),
        };
        assert_eq!(err.to_string(), "mark_done failed: no such table: tasks");
    }

    #[test]
    fn from_rusqlite() {
        let err: StoreError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, StoreError::Database(_)));
    }
}
