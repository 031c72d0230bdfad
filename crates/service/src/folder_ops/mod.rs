mod query;
mod session;
mod upload;

pub use query::FolderQuery;
pub use session::FolderSession;
pub use upload::{SimulatedUpload, MIN_UPLOAD_TICK, PROGRESS_DONE, PROGRESS_STEP};
