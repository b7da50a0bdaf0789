use rusqlite::{params, params_from_iter, Connection};
use tick_core::deadline::deadline_from_offsets;
use tick_core::{unix_now, CategoryId, IdSet, NewTask, Task, TaskId, TaskOrder, DEFAULT_CATEGORY_ID};
use tracing::{debug, instrument};

use crate::categories;
use crate::database::Database;
use crate::error::StoreError;
use crate::row_helpers::{self, check, placeholders};

const INSERT_TASK: &str =
    "INSERT OR IGNORE INTO tasks (description, created, until, category_id) VALUES (?1, ?2, ?3, ?4)";
const SELECT_TASKS: &str = "SELECT t.id, t.description, t.created, t.until, t.done, t.category_id, c.name
     FROM tasks AS t INNER JOIN categories AS c ON t.category_id = c.id";
const DELETE_DONE: &str = "DELETE FROM tasks WHERE done = TRUE";
const COUNT_TASKS: &str = "SELECT COUNT(*) FROM tasks";

/// Ids bound per statement; SQLite allows at most 32766 variables.
const MAX_BOUND_IDS: usize = 32_000;

/// Result of [`TaskRepo::save`].
///
/// Descriptions are unique; saving one that already exists keeps the stored
/// task untouched and reports it as a duplicate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(Task),
    Duplicate(Task),
}

impl SaveOutcome {
    pub fn task(&self) -> &Task {
        match self {
            Self::Created(task) | Self::Duplicate(task) => task,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

pub struct TaskRepo {
    db: Database,
}

impl TaskRepo {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Save a task created now.
    pub fn save(&self, new: &NewTask) -> Result<SaveOutcome, StoreError> {
        self.save_at(new, unix_now())
    }

    /// Save a task with an explicit creation time (unix seconds).
    ///
    /// The category is resolved (and created if needed) before the insert;
    /// an empty category name files the task under the default category.
    #[instrument(skip(self, new), fields(description = %new.description, category = %new.category))]
    pub fn save_at(&self, new: &NewTask, now: i64) -> Result<SaveOutcome, StoreError> {
        let until = deadline_from_offsets(now, new.days, new.hours)?;
        self.db.with_conn(|conn| {
            let category_id = if new.category.is_empty() {
                DEFAULT_CATEGORY_ID
            } else {
                categories::resolve(conn, &new.category)?
            };

            let inserted = check(
                "save_task",
                INSERT_TASK,
                conn.execute(INSERT_TASK, params![new.description, now, until, category_id]),
            )?;

            if inserted == 0 {
                debug!("description already exists, insert ignored");
                let existing = find_by_description(conn, &new.description)?
                    .ok_or_else(|| StoreError::NotFound(format!("task '{}'", new.description)))?;
                return Ok(SaveOutcome::Duplicate(existing));
            }

            let id = conn.last_insert_rowid();
            let task = find(conn, id)?.ok_or_else(|| StoreError::NotFound(format!("task {id}")))?;
            Ok(SaveOutcome::Created(task))
        })
    }

    /// All tasks with their category names, in the requested order.
    #[instrument(skip(self))]
    pub fn list(&self, order: TaskOrder) -> Result<Vec<Task>, StoreError> {
        let sql = format!("{SELECT_TASKS} ORDER BY {}", order.to_sql());
        self.db
            .with_conn(|conn| query_tasks(conn, "list_tasks", &sql, params![]))
    }

    /// Get a task by id.
    pub fn get(&self, id: TaskId) -> Result<Option<Task>, StoreError> {
        self.db.with_conn(|conn| find(conn, id))
    }

    pub fn count(&self) -> Result<i64, StoreError> {
        self.db.with_conn(|conn| {
            check(
                "count_tasks",
                COUNT_TASKS,
                conn.query_row(COUNT_TASKS, [], |row| row.get(0)),
            )
        })
    }

    /// Move every task in `ids` to `category_id`.
    ///
    /// The category must exist; otherwise nothing changes and
    /// [`StoreError::UnknownCategory`] is returned.
    #[instrument(skip(self, ids), fields(ids = %ids))]
    pub fn update_category(&self, category_id: CategoryId, ids: &IdSet) -> Result<usize, StoreError> {
        if ids.is_empty() {
            return Ok(0);
        }

        self.db.with_conn(|conn| {
            if categories::find(conn, category_id)?.is_none() {
                return Err(StoreError::UnknownCategory(category_id));
            }

            let mut changed = 0;
            for chunk in ids.as_slice().chunks(MAX_BOUND_IDS - 1) {
                let sql = format!(
                    "UPDATE tasks SET category_id = ?1 WHERE id IN ({})",
                    placeholders(2, chunk.len())
                );
                let values = std::iter::once(&category_id).chain(chunk);
                changed += check("update_category", &sql, conn.execute(&sql, params_from_iter(values)))?;
            }
            debug!(changed, "tasks recategorized");
            Ok(changed)
        })
    }

    /// Delete every task marked done.
    #[instrument(skip(self))]
    pub fn delete_done(&self) -> Result<usize, StoreError> {
        self.db.with_conn(|conn| {
            let deleted = check("delete_done_tasks", DELETE_DONE, conn.execute(DELETE_DONE, []))?;
            debug!(deleted, "done tasks deleted");
            Ok(deleted)
        })
    }

    /// Delete the tasks in `ids`; unknown ids are ignored.
    #[instrument(skip(self, ids), fields(ids = %ids))]
    pub fn delete_by_ids(&self, ids: &IdSet) -> Result<usize, StoreError> {
        self.execute_for_ids("delete_tasks", "DELETE FROM tasks WHERE id IN", ids)
    }

    /// Mark the tasks in `ids` as done. Idempotent.
    #[instrument(skip(self, ids), fields(ids = %ids))]
    pub fn mark_done(&self, ids: &IdSet) -> Result<usize, StoreError> {
        self.execute_for_ids("mark_done", "UPDATE tasks SET done = TRUE WHERE id IN", ids)
    }

    fn execute_for_ids(
        &self,
        operation: &'static str,
        prefix: &str,
        ids: &IdSet,
    ) -> Result<usize, StoreError> {
        if ids.is_empty() {
            return Ok(0);
        }

        self.db.with_conn(|conn| {
            let mut changed = 0;
            for chunk in ids.as_slice().chunks(MAX_BOUND_IDS) {
                let sql = format!("{prefix} ({})", placeholders(1, chunk.len()));
                changed += check(operation, &sql, conn.execute(&sql, params_from_iter(chunk)))?;
            }
            debug!(operation, changed, "bulk update applied");
            Ok(changed)
        })
    }
}

fn find(conn: &Connection, id: TaskId) -> Result<Option<Task>, StoreError> {
    let sql = format!("{SELECT_TASKS} WHERE t.id = ?1");
    Ok(query_tasks(conn, "get_task", &sql, params![id])?.into_iter().next())
}

fn find_by_description(conn: &Connection, description: &str) -> Result<Option<Task>, StoreError> {
    let sql = format!("{SELECT_TASKS} WHERE t.description = ?1");
    Ok(query_tasks(conn, "get_task", &sql, params![description])?
        .into_iter()
        .next())
}

fn query_tasks(
    conn: &Connection,
    operation: &'static str,
    sql: &str,
    params: &[&dyn rusqlite::ToSql],
) -> Result<Vec<Task>, StoreError> {
    let mut stmt = check(operation, sql, conn.prepare(sql))?;
    let mut rows = check(operation, sql, stmt.query(params))?;
    let mut tasks = Vec::new();
    while let Some(row) = check(operation, sql, rows.next())? {
        tasks.push(row_to_task(row)?);
    }
    Ok(tasks)
}

fn row_to_task(row: &rusqlite::Row<'_>) -> Result<Task, StoreError> {
    Ok(Task {
        id: row_helpers::get(row, 0, "tasks", "id")?,
        description: row_helpers::get(row, 1, "tasks", "description")?,
        created: row_helpers::get_opt(row, 2, "tasks", "created")?.unwrap_or(0),
        until: row_helpers::get_opt(row, 3, "tasks", "until")?.unwrap_or(0),
        done: row_helpers::get_opt(row, 4, "tasks", "done")?.unwrap_or(false),
        category_id: row_helpers::get(row, 5, "tasks", "category_id")?,
        category_name: row_helpers::get(row, 6, "categories", "name")?,
    })
}
