/// Input rejected before it reaches the store.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("GitHub token consists of {expected} chars, your token was {actual} chars long")]
    TokenLength { expected: usize, actual: usize },

    #[error("{operation} needs task ids, pass them with --ids")]
    EmptyIdSet { operation: &'static str },

    #[error("invalid task id: {0}")]
    InvalidId(String),

    #[error("a deadline {days} day(s) and {hours} hour(s) out is out of range")]
    DeadlineOutOfRange { days: i64, hours: i64 },

    #[error("unknown sort column '{0}', expected one of: id, description, created, until, done")]
    UnknownSortColumn(String),
}
