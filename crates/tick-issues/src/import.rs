use tick_core::{GithubToken, NewTask};
use tick_store::TaskRepo;
use tracing::{info, instrument};

use crate::error::IssueError;
use crate::github::IssueSource;

/// Counts from one import run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub created: usize,
    pub duplicates: usize,
}

impl ImportReport {
    pub fn total(&self) -> usize {
        self.created + self.duplicates
    }
}

/// Fetch assigned issues and save each one as a task without a deadline.
///
/// Issues already imported are skipped through description deduplication.
/// Nothing is saved when the fetch fails.
#[instrument(skip(source, token, tasks))]
pub async fn import_issues(
    source: &dyn IssueSource,
    token: &GithubToken,
    tasks: &TaskRepo,
    category: &str,
) -> Result<ImportReport, IssueError> {
    let issues = source.assigned_issues(token).await?;

    let mut report = ImportReport::default();
    for issue in &issues {
        let new = NewTask::new(issue.task_description()).in_category(category);
        if tasks.save(&new)?.is_created() {
            report.created += 1;
        } else {
            report.duplicates += 1;
        }
    }

    info!(
        fetched = report.total(),
        created = report.created,
        duplicates = report.duplicates,
        "imported issues"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{Issue, Repository};
    use async_trait::async_trait;
    use tick_core::{TaskOrder, DEFAULT_CATEGORY_ID};
    use tick_store::{CategoryRepo, Database};

    struct FixedIssues(Vec<Issue>);

    #[async_trait]
    impl IssueSource for FixedIssues {
        async fn assigned_issues(&self, _token: &GithubToken) -> Result<Vec<Issue>, IssueError> {
            Ok(self.0.clone())
        }
    }

    struct Unauthorized;

    #[async_trait]
    impl IssueSource for Unauthorized {
        async fn assigned_issues(&self, _token: &GithubToken) -> Result<Vec<Issue>, IssueError> {
            Err(IssueError::Status {
                status: 401,
                body: "Bad credentials".into(),
            })
        }
    }

    fn issue(repo: &str, title: &str) -> Issue {
        Issue {
            title: title.into(),
            state: "open".into(),
            repository: Repository { name: repo.into() },
        }
    }

    fn token() -> GithubToken {
        GithubToken::parse(&"x".repeat(40)).unwrap()
    }

    #[tokio::test]
    async fn saves_issues_in_their_category() {
        let db = Database::in_memory().unwrap();
        let tasks = TaskRepo::new(db.clone());
        let source = FixedIssues(vec![issue("tick", "Fix crash"), issue("site", "Docs")]);

        let report = import_issues(&source, &token(), &tasks, "Github").await.unwrap();
        assert_eq!(report, ImportReport { created: 2, duplicates: 0 });

        let listed = tasks.list(TaskOrder::default()).unwrap();
        let descriptions: Vec<_> = listed.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, ["tick: Fix crash", "site: Docs"]);
        assert!(listed.iter().all(|t| t.category_name == "github"));
        assert!(listed.iter().all(|t| !t.has_deadline()));
        assert!(listed.iter().all(|t| t.category_id != DEFAULT_CATEGORY_ID));

        let categories = CategoryRepo::new(db).list().unwrap();
        assert_eq!(categories.len(), 2);
    }

    #[tokio::test]
    async fn reimport_skips_existing() {
        let db = Database::in_memory().unwrap();
        let tasks = TaskRepo::new(db);
        let source = FixedIssues(vec![issue("tick", "Fix crash")]);

        import_issues(&source, &token(), &tasks, "Github").await.unwrap();
        let second = import_issues(&source, &token(), &tasks, "Github").await.unwrap();

        assert_eq!(second, ImportReport { created: 0, duplicates: 1 });
        assert_eq!(second.total(), 1);
        assert_eq!(tasks.count().unwrap(), 1);
    }

    #[tokio::test]
    async fn failed_fetch_saves_nothing() {
        let db = Database::in_memory().unwrap();
        let tasks = TaskRepo::new(db);

        let err = import_issues(&Unauthorized, &token(), &tasks, "Github").await.unwrap_err();
        assert!(matches!(err, IssueError::Status { status: 401, .. }));
        assert_eq!(tasks.count().unwrap(), 0);
    }
}
