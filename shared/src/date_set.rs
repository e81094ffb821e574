use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;
use crate::{date_key::DateKey, error::ErrorCode};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("{0} is already selected")]
    Duplicate(DateKey),
    #[error("{0} is in the past and cannot be selected")]
    PastDate(DateKey),
    #[error("\"{0}\" is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

impl SelectionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SelectionError::Duplicate(_) => ErrorCode::DuplicateDate,
            SelectionError::PastDate(_) => ErrorCode::PastDate,
            SelectionError::InvalidDate(_) => ErrorCode::InvalidDate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Added(DateKey),
    Removed(DateKey),
    Unchanged,
}

impl SelectionChange {
    pub fn is_change(self) -> bool {
        !matches!(self, SelectionChange::Unchanged)
    }
}

/// The selected dates. Nothing earlier than `today` is ever admitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSet {
    today: DateKey,
    dates: BTreeSet<DateKey>,
}

impl DateSet {
    pub fn new(today: DateKey) -> Self {
        Self { today, dates: BTreeSet::new() }
    }

    pub fn today(&self) -> DateKey {
        self.today
    }

    pub fn add(&mut self, key: DateKey) -> Result<SelectionChange, SelectionError> {
        if self.dates.contains(&key) {
            return Err(SelectionError::Duplicate(key));
        }
        if key < self.today {
            return Err(SelectionError::PastDate(key));
        }
        self.dates.insert(key);
        debug!(date = %key, size = self.dates.len(), "date added");
        Ok(SelectionChange::Added(key))
    }

    pub fn remove(&mut self, key: DateKey) -> SelectionChange {
        if self.dates.remove(&key) {
            debug!(date = %key, size = self.dates.len(), "date removed");
            SelectionChange::Removed(key)
        } else {
            SelectionChange::Unchanged
        }
    }

    pub fn contains(&self, key: DateKey) -> bool {
        self.dates.contains(&key)
    }

    pub fn to_sorted_list(&self) -> Vec<DateKey> {
        self.dates.iter().copied().collect()
    }

    /// Natural enumeration order, used when building a submission batch.
    pub fn iter(&self) -> impl Iterator<Item = DateKey> + '_ {
        self.dates.iter().copied()
    }

    pub fn size(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn clear(&mut self) {
        self.dates.clear();
    }
}
