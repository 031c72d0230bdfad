use std::fs;
use std::path::PathBuf;

use clap::Args;
use time::macros::format_description;
use time::OffsetDateTime;

use common::prelude::{Record, RecordFilter};
use service::RecordQuery;

/// Filter a JSON export of records
#[derive(Args, Debug, Clone)]
pub struct Filter {
    /// JSON file holding an array of records
    #[arg(long)]
    pub input: PathBuf,

    #[command(flatten)]
    pub query: RecordQuery,
}

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("failed to read {0}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("invalid record file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to format date: {0}")]
    Format(#[from] time::error::Format),
}

fn display_date(at: OffsetDateTime) -> Result<String, time::error::Format> {
    at.format(format_description!(
        "[month repr:short] [day padding:none], [year]"
    ))
}

pub fn render(records: &[Record]) -> Result<String, FilterError> {
    if records.is_empty() {
        return Ok("No records found".to_string());
    }

    let lines = records
        .iter()
        .map(|record| -> Result<String, FilterError> {
            Ok(format!(
                "{} [{} / {}] {} - updated {}",
                record.title,
                record.status,
                record.priority,
                record.category,
                display_date(record.updated_at)?
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}

#[async_trait::async_trait]
impl crate::op::Op for Filter {
    type Error = FilterError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let raw = fs::read_to_string(&self.input)
            .map_err(|e| FilterError::Read(self.input.clone(), e))?;
        let records: Vec<Record> = serde_json::from_str(&raw)?;

        let filter = RecordFilter::from(&self.query);
        let visible = filter.apply(&records);
        tracing::debug!(total = records.len(), visible = visible.len(), "filtered records");

        render(&visible)
    }
}
