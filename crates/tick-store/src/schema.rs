/// SQL DDL for the tick database.
///
/// Table and column names match files written by earlier versions of the
/// tool, so existing databases open unchanged.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER NOT NULL PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER NOT NULL PRIMARY KEY,
    description TEXT NOT NULL UNIQUE,
    done BOOLEAN DEFAULT false,
    created INTEGER,
    until INTEGER,
    category_id INTEGER,
    FOREIGN KEY(category_id) REFERENCES categories(id)
);

CREATE TABLE IF NOT EXISTS githubToken (
    id INTEGER PRIMARY KEY CHECK(id = 0),
    token TEXT NOT NULL
);
"#;

pub const SEED_DEFAULT_CATEGORY: &str =
    "INSERT OR IGNORE INTO categories (id, name) VALUES (?1, ?2)";

pub const PRAGMAS: &str = r#"
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;
PRAGMA busy_timeout = 5000;
PRAGMA synchronous = NORMAL;
"#;
