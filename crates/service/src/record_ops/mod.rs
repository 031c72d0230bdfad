mod dialog;
mod error;
mod manager;
mod query;

pub use dialog::RecordDialog;
pub use error::{DeleteError, SubmitError};
pub use manager::RecordManager;
pub use query::RecordQuery;
