use tick_store::StoreError;

/// Failures while fetching or importing remote issues. None are retried.
#[derive(Debug, thiserror::Error)]
pub enum IssueError {
    #[error("issue request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed issue payload: {0}")]
    Decode(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl IssueError {
    /// Short classification string for logging.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::Status { .. } => "status",
            Self::Network(_) => "network",
            Self::Decode(_) => "decode",
            Self::Store(_) => "store",
        }
    }
}
