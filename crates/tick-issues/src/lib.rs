pub mod error;
pub mod github;
pub mod import;

pub use error::IssueError;
pub use github::{GithubIssues, Issue, IssueSource, Repository, DEFAULT_ISSUES_URL};
pub use import::{import_issues, ImportReport};
