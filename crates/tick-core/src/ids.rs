use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;
use crate::task::TaskId;

/// Caller-supplied task ids for bulk operations.
///
/// Order and duplicates are preserved as given; the store matches rows by
/// set membership so neither affects the outcome.
#[derive(Clone, Debug, Default, Hash, Eq, PartialEq)]
pub struct IdSet(Vec<TaskId>);

impl IdSet {
    pub fn new(ids: impl IntoIterator<Item = TaskId>) -> Self {
        Self(ids.into_iter().collect())
    }

    pub fn as_slice(&self) -> &[TaskId] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskId> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reject an empty set for operations that act on explicit ids.
    pub fn require_non_empty(self, operation: &'static str) -> Result<Self, ValidationError> {
        if self.0.is_empty() {
            return Err(ValidationError::EmptyIdSet { operation });
        }
        Ok(self)
    }
}

impl From<Vec<TaskId>> for IdSet {
    fn from(ids: Vec<TaskId>) -> Self {
        Self(ids)
    }
}

impl FromIterator<TaskId> for IdSet {
    fn from_iter<I: IntoIterator<Item = TaskId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for IdSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

impl FromStr for IdSet {
    type Err = ValidationError;

    /// Parses a comma separated list such as `1, 2,3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<TaskId>()
                    .map_err(|_| ValidationError::InvalidId(part.to_string()))
            })
            .collect()
    }
}
