use serde::{Deserialize, Serialize};

use common::prelude::{PriorityFilter, RecordFilter, StatusFilter};

/// Filter inputs as they arrive from the command line or a request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct RecordQuery {
    /// Case-insensitive text matched against title, description and category
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "clap", arg(long))]
    pub search: Option<String>,

    /// "all" or one of Active, Completed, Pending
    #[serde(default)]
    #[cfg_attr(feature = "clap", arg(long, default_value = "all"))]
    pub status: StatusFilter,

    /// "all" or one of Low, Medium, High
    #[serde(default)]
    #[cfg_attr(feature = "clap", arg(long, default_value = "all"))]
    pub priority: PriorityFilter,
}

impl From<&RecordQuery> for RecordFilter {
    fn from(query: &RecordQuery) -> Self {
        RecordFilter::new(
            query.search.clone().unwrap_or_default(),
            query.status,
            query.priority,
        )
    }
}
