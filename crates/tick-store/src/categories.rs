use rusqlite::{Connection, OptionalExtension};
use tick_core::{Category, CategoryId};
use tracing::{debug, instrument};

use crate::database::Database;
use crate::error::StoreError;
use crate::row_helpers::{self, check};

const SELECT_ID_BY_NAME: &str = "SELECT id FROM categories WHERE name = ?1";
const INSERT_CATEGORY: &str = "INSERT INTO categories (name) VALUES (?1)";
const SELECT_BY_ID: &str = "SELECT id, name FROM categories WHERE id = ?1";
const SELECT_ALL: &str = "SELECT id, name FROM categories ORDER BY id ASC";

pub struct CategoryRepo {
    db: Database,
}

impl CategoryRepo {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Id of the category called `name` (case-insensitive), creating it if needed.
    #[instrument(skip(self))]
    pub fn get_or_create(&self, name: &str) -> Result<CategoryId, StoreError> {
        self.db.with_conn(|conn| resolve(conn, name))
    }

    /// Get a category by id.
    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        self.db.with_conn(|conn| find(conn, id))
    }

    /// All categories in creation order.
    pub fn list(&self) -> Result<Vec<Category>, StoreError> {
        self.db.with_conn(|conn| {
            let mut stmt = check("list_categories", SELECT_ALL, conn.prepare(SELECT_ALL))?;
            let mut rows = check("list_categories", SELECT_ALL, stmt.query([]))?;
            let mut categories = Vec::new();
            while let Some(row) = check("list_categories", SELECT_ALL, rows.next())? {
                categories.push(row_to_category(row)?);
            }
            Ok(categories)
        })
    }
}

/// Get-or-create on an open connection, so task inserts can resolve their
/// category under the same lock.
pub(crate) fn resolve(conn: &Connection, name: &str) -> Result<CategoryId, StoreError> {
    let name = Category::normalize_name(name);

    let existing = check(
        "get_category",
        SELECT_ID_BY_NAME,
        conn.query_row(SELECT_ID_BY_NAME, [&name], |row| row.get::<_, CategoryId>(0))
            .optional(),
    )?;
    if let Some(id) = existing {
        return Ok(id);
    }

    check("create_category", INSERT_CATEGORY, conn.execute(INSERT_CATEGORY, [&name]))?;
    let id = conn.last_insert_rowid();
    debug!(id, category = %name, "category created");
    Ok(id)
}

pub(crate) fn find(conn: &Connection, id: CategoryId) -> Result<Option<Category>, StoreError> {
    let mut stmt = check("get_category", SELECT_BY_ID, conn.prepare(SELECT_BY_ID))?;
    let mut rows = check("get_category", SELECT_BY_ID, stmt.query([id]))?;
    let category = match check("get_category", SELECT_BY_ID, rows.next())? {
        Some(row) => Some(row_to_category(row)?),
        None => None,
    };
    Ok(category)
}

fn row_to_category(row: &rusqlite::Row<'_>) -> Result<Category, StoreError> {
    Ok(Category {
        id: row_helpers::get(row, 0, "categories", "id")?,
        name: row_helpers::get(row, 1, "categories", "name")?,
    })
}
