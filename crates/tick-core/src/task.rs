use serde::{Deserialize, Serialize};

pub type TaskId = i64;
pub type CategoryId = i64;

/// Reserved id of the fallback category, created together with the schema.
pub const DEFAULT_CATEGORY_ID: CategoryId = 1;
pub const DEFAULT_CATEGORY_NAME: &str = "default";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    /// Lowercased form of a category name; this is the uniqueness key.
    pub fn normalize_name(name: &str) -> String {
        name.to_lowercase()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub description: String,
    /// Unix seconds.
    pub created: i64,
    /// Unix seconds, `0` when the task has no deadline.
    pub until: i64,
    pub done: bool,
    pub category_id: CategoryId,
    /// Joined from `categories`; empty unless the task came from a listing query.
    pub category_name: String,
}

impl Task {
    pub fn has_deadline(&self) -> bool {
        self.until != 0
    }
}

/// Parameters for saving a task.
///
/// Negative offsets are not applied. With both offsets negative the task
/// gets no deadline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTask {
    pub description: String,
    /// Empty means the default category.
    pub category: String,
    pub days: i64,
    pub hours: i64,
}

impl NewTask {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            category: String::new(),
            days: -1,
            hours: -1,
        }
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn due_in(mut self, days: i64, hours: i64) -> Self {
        self.days = days;
        self.hours = hours;
        self
    }
}
