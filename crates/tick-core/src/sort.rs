use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// Columns a task listing may be ordered by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortColumn {
    #[default]
    Id,
    Description,
    Created,
    Until,
    Done,
}

impl SortColumn {
    /// Qualified column name; safe to splice into `ORDER BY`.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Id => "t.id",
            Self::Description => "t.description",
            Self::Created => "t.created",
            Self::Until => "t.until",
            Self::Done => "t.done",
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id => f.write_str("id"),
            Self::Description => f.write_str("description"),
            Self::Created => f.write_str("created"),
            Self::Until => f.write_str("until"),
            Self::Done => f.write_str("done"),
        }
    }
}

impl FromStr for SortColumn {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "description" => Ok(Self::Description),
            "created" => Ok(Self::Created),
            "until" => Ok(Self::Until),
            "done" => Ok(Self::Done),
            _ => Err(ValidationError::UnknownSortColumn(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn from_descending(descending: bool) -> Self {
        if descending {
            Self::Descending
        } else {
            Self::Ascending
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Ordering for task listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskOrder {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl TaskOrder {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// `ORDER BY` body. Ties fall back to the task id so listings are stable.
    pub fn to_sql(self) -> String {
        let direction = self.direction.as_sql();
        match self.column {
            SortColumn::Id => format!("t.id {direction}"),
            column => format!("{} {direction}, t.id ASC", column.as_sql()),
        }
    }
}
