pub mod deadline;
pub mod errors;
pub mod ids;
pub mod security;
pub mod sort;
pub mod task;

pub use deadline::{classify, Bucket, Urgency};
pub use errors::ValidationError;
pub use ids::IdSet;
pub use security::GithubToken;
pub use sort::{SortColumn, SortDirection, TaskOrder};
pub use task::{Category, CategoryId, NewTask, Task, TaskId, DEFAULT_CATEGORY_ID, DEFAULT_CATEGORY_NAME};

/// Current wall-clock time as unix seconds.
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}
