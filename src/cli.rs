use std::path::PathBuf;

use clap::Parser;
use tick_core::deadline::deadline_from_offsets;
use tick_core::{
    unix_now, CategoryId, GithubToken, IdSet, NewTask, SortColumn, SortDirection, TaskOrder,
    ValidationError,
};

/// Track tasks, deadlines and categories from the terminal.
#[derive(Parser, Debug)]
#[command(name = "tick", version, about = "Track tasks from the terminal")]
pub struct Cli {
    /// Description of a new task.
    #[arg(short = 'i', long = "insert", value_name = "DESC")]
    pub insert: Option<String>,

    /// Category of the new task (default category if omitted).
    #[arg(long, value_name = "NAME")]
    pub cname: Option<String>,

    /// Days until the deadline (-1 to ignore).
    #[arg(short = 'd', long, default_value_t = -1, allow_negative_numbers = true)]
    pub days: i64,

    /// Hours until the deadline (-1 to ignore).
    #[arg(short = 'H', long, default_value_t = -1, allow_negative_numbers = true)]
    pub hours: i64,

    /// Task ids for bulk operations, comma separated. May be repeated.
    #[arg(long, value_name = "ID,...")]
    pub ids: Vec<IdSet>,

    /// Mark the tasks given with --ids as done.
    #[arg(long)]
    pub done: bool,

    /// Delete the tasks given with --ids.
    #[arg(long)]
    pub del: bool,

    /// Delete every finished task.
    #[arg(long = "del-done")]
    pub del_done: bool,

    /// Move the tasks given with --ids to this category id.
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub cid: CategoryId,

    /// Print the category table before the tasks.
    #[arg(long)]
    pub cshow: bool,

    /// Render tasks as a flat table.
    #[arg(long)]
    pub table: bool,

    /// Column to order by: id, description, created, until or done.
    #[arg(short = 'o', long, value_name = "COLUMN")]
    pub order: Option<String>,

    /// Sort descending.
    #[arg(long)]
    pub desc: bool,

    /// Import the GitHub issues assigned to you.
    #[arg(long)]
    pub gitissues: bool,

    /// Store a GitHub access token.
    #[arg(long, value_name = "TOKEN")]
    pub gittoken: Option<String>,

    /// Path to the SQLite database (overrides settings).
    #[arg(long)]
    pub db: Option<PathBuf>,
}

/// How the task listing is rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderRequest {
    pub order: TaskOrder,
    pub table: bool,
    pub show_categories: bool,
}

/// The single operation one invocation performs.
#[derive(Debug)]
pub enum Intent {
    Recategorize { category_id: CategoryId, ids: IdSet },
    DeleteDone,
    MarkDone(IdSet),
    Save(NewTask),
    Delete(IdSet),
    ImportIssues,
    SetToken(GithubToken),
    Render(RenderRequest),
}

impl Cli {
    fn id_set(&self) -> IdSet {
        IdSet::new(self.ids.iter().flat_map(|set| set.iter().copied()))
    }

    /// Resolve flags into exactly one intent.
    ///
    /// The first matching branch wins: recategorize, delete done, mark done,
    /// save, delete, import, set token, and render otherwise.
    pub fn into_intent(self, default_sort: &str) -> Result<Intent, ValidationError> {
        if self.cid > 0 {
            let ids = self.id_set().require_non_empty("moving tasks to a category")?;
            return Ok(Intent::Recategorize {
                category_id: self.cid,
                ids,
            });
        }
        if self.del_done {
            return Ok(Intent::DeleteDone);
        }
        if self.done {
            let ids = self.id_set().require_non_empty("marking tasks done")?;
            return Ok(Intent::MarkDone(ids));
        }
        if let Some(description) = self.insert.as_deref().filter(|d| !d.is_empty()) {
            deadline_from_offsets(unix_now(), self.days, self.hours)?;
            let task = NewTask::new(description)
                .in_category(self.cname.clone().unwrap_or_default())
                .due_in(self.days, self.hours);
            return Ok(Intent::Save(task));
        }
        if self.del {
            let ids = self.id_set().require_non_empty("deleting tasks")?;
            return Ok(Intent::Delete(ids));
        }
        if self.gitissues {
            return Ok(Intent::ImportIssues);
        }
        if let Some(raw) = self.gittoken.as_deref().filter(|t| !t.is_empty()) {
            return Ok(Intent::SetToken(GithubToken::parse(raw)?));
        }

        let column: SortColumn = self.order.as_deref().unwrap_or(default_sort).parse()?;
        Ok(Intent::Render(RenderRequest {
            order: TaskOrder::new(column, SortDirection::from_descending(self.desc)),
            table: self.table,
            show_categories: self.cshow,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(args: &[&str]) -> Result<Intent, ValidationError> {
        let mut argv = vec!["tick"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv).into_intent("id")
    }

    #[test]
    fn no_flags_renders_aligned_by_id() {
        let intent = resolve(&[]).unwrap();
        let Intent::Render(request) = intent else {
            panic!("expected render");
        };
        assert_eq!(request.order, TaskOrder::default());
        assert!(!request.table);
        assert!(!request.show_categories);
    }

    #[test]
    fn render_flags() {
        let intent = resolve(&["--table", "--cshow", "-o", "Until", "--desc"]).unwrap();
        let Intent::Render(request) = intent else {
            panic!("expected render");
        };
        assert_eq!(
            request.order,
            TaskOrder::new(SortColumn::Until, SortDirection::Descending)
        );
        assert!(request.table);
        assert!(request.show_categories);
    }

    #[test]
    fn unknown_order_column_is_rejected() {
        let err = resolve(&["-o", "id; DROP TABLE tasks"]).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownSortColumn(_)));
    }

    #[test]
    fn configured_default_sort_applies() {
        let intent = Cli::parse_from(["tick"]).into_intent("created").unwrap();
        let Intent::Render(request) = intent else {
            panic!("expected render");
        };
        assert_eq!(request.order.column, SortColumn::Created);
    }

    #[test]
    fn insert_builds_new_task() {
        let intent = resolve(&["-i", "Buy milk", "--cname", "Home", "-d", "2", "-H", "3"]).unwrap();
        let Intent::Save(task) = intent else {
            panic!("expected save");
        };
        assert_eq!(task.description, "Buy milk");
        assert_eq!(task.category, "Home");
        assert_eq!((task.days, task.hours), (2, 3));
    }

    #[test]
    fn insert_defaults_to_no_deadline() {
        let Intent::Save(task) = resolve(&["-i", "Read"]).unwrap() else {
            panic!("expected save");
        };
        assert_eq!(task.category, "");
        assert_eq!((task.days, task.hours), (-1, -1));
    }

    #[test]
    fn overflowing_offsets_are_rejected() {
        let err = resolve(&["-i", "far", "-d", "200000000000000"]).unwrap_err();
        assert!(matches!(err, ValidationError::DeadlineOutOfRange { .. }));

        let hours = i64::MAX.to_string();
        let err = resolve(&["-i", "far", "-H", hours.as_str()]).unwrap_err();
        assert!(matches!(err, ValidationError::DeadlineOutOfRange { .. }));
    }

    #[test]
    fn ids_merge_across_flags() {
        let intent = resolve(&["--done", "--ids", "1,2", "--ids", "5"]).unwrap();
        let Intent::MarkDone(ids) = intent else {
            panic!("expected mark done");
        };
        assert_eq!(ids.as_slice(), &[1, 2, 5]);
    }

    #[test]
    fn bulk_operations_need_ids() {
        for args in [&["--done"][..], &["--del"][..], &["--cid", "3"][..]] {
            let err = resolve(args).unwrap_err();
            assert!(matches!(err, ValidationError::EmptyIdSet { .. }), "{args:?}");
        }
    }

    #[test]
    fn recategorize_wins_over_everything() {
        let intent = resolve(&["--cid", "2", "--ids", "4", "--del-done", "--done", "-i", "x"]).unwrap();
        match intent {
            Intent::Recategorize { category_id, ids } => {
                assert_eq!(category_id, 2);
                assert_eq!(ids.as_slice(), &[4]);
            }
            other => panic!("expected recategorize, got {other:?}"),
        }
    }

    #[test]
    fn non_positive_category_id_is_ignored() {
        let intent = resolve(&["--cid", "0", "--del-done"]).unwrap();
        assert!(matches!(intent, Intent::DeleteDone));
    }

    #[test]
    fn precedence_order() {
        assert!(matches!(
            resolve(&["--del-done", "--done", "--ids", "1"]).unwrap(),
            Intent::DeleteDone
        ));
        assert!(matches!(
            resolve(&["--done", "--ids", "1", "-i", "x"]).unwrap(),
            Intent::MarkDone(_)
        ));
        assert!(matches!(
            resolve(&["-i", "x", "--del", "--ids", "1"]).unwrap(),
            Intent::Save(_)
        ));
        assert!(matches!(
            resolve(&["--del", "--ids", "1", "--gitissues"]).unwrap(),
            Intent::Delete(_)
        ));
        let token = "a".repeat(40);
        assert!(matches!(
            resolve(&["--gitissues", "--gittoken", token.as_str()]).unwrap(),
            Intent::ImportIssues
        ));
        assert!(matches!(
            resolve(&["--gittoken", token.as_str(), "--table"]).unwrap(),
            Intent::SetToken(_)
        ));
    }

    #[test]
    fn empty_insert_falls_through() {
        assert!(matches!(resolve(&["-i", ""]).unwrap(), Intent::Render(_)));
    }

    #[test]
    fn short_token_is_rejected() {
        let err = resolve(&["--gittoken", "abc"]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TokenLength {
                expected: 40,
                actual: 3
            }
        );
    }

    #[test]
    fn malformed_ids_fail_to_parse() {
        assert!(Cli::try_parse_from(["tick", "--del", "--ids", "1,x"]).is_err());
    }

    #[test]
    fn negative_offsets_parse() {
        let cli = Cli::parse_from(["tick", "-i", "x", "-d", "-1", "-H", "-1"]);
        assert_eq!((cli.days, cli.hours), (-1, -1));
    }
}
