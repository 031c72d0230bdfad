use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::search::matches_any;

use super::record::{Priority, Record, Status};

const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} filter: {value} (expected \"all\" or one of {expected})")]
pub struct FilterParseError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    pub fn allows(&self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL {
            return Ok(StatusFilter::All);
        }
        s.parse::<Status>()
            .map(StatusFilter::Only)
            .map_err(|_| FilterParseError {
                kind: "status",
                value: s.to_string(),
                expected: "Active, Completed, Pending",
            })
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str(ALL),
            StatusFilter::Only(status) => write!(f, "{}", status),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    pub fn allows(&self, priority: Priority) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(wanted) => *wanted == priority,
        }
    }
}

impl FromStr for PriorityFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL {
            return Ok(PriorityFilter::All);
        }
        s.parse::<Priority>()
            .map(PriorityFilter::Only)
            .map_err(|_| FilterParseError {
                kind: "priority",
                value: s.to_string(),
                expected: "Low, Medium, High",
            })
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityFilter::All => f.write_str(ALL),
            PriorityFilter::Only(priority) => write!(f, "{}", priority),
        }
    }
}

/// The three independent criteria of the record list.
///  A record is visible only when it passes all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    pub search: String,
    pub status: StatusFilter,
    pub priority: PriorityFilter,
}

impl RecordFilter {
    pub fn new(search: impl Into<String>, status: StatusFilter, priority: PriorityFilter) -> Self {
        Self {
            search: search.into(),
            status,
            priority,
        }
    }

    pub fn matches_search(&self, record: &Record) -> bool {
        matches_any(
            [
                record.title.as_str(),
                record.description.as_str(),
                record.category.as_str(),
            ],
            &self.search,
        )
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.matches_search(record)
            && self.status.allows(record.status)
            && self.priority.allows(record.priority)
    }

    /// Keep the matching records, in input order.
    pub fn apply(&self, records: &[Record]) -> Vec<Record> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.status == StatusFilter::All
            && self.priority == PriorityFilter::All
    }
}

pub fn filter_records(
    records: &[Record],
    search: &str,
    status: StatusFilter,
    priority: PriorityFilter,
) -> Vec<Record> {
    RecordFilter::new(search, status, priority).apply(records)
}
