mod auth;
mod folder_ops;
mod gate;
mod notify;
mod process;
mod record_ops;
mod store;

mod config;
mod state;

pub use auth::{AuthError, AuthProvider, MemoryAuth, User};
pub use config::{Config as ServiceConfig, DEFAULT_UPLOAD_TICK};
pub use folder_ops::{
    FolderQuery, FolderSession, SimulatedUpload, MIN_UPLOAD_TICK, PROGRESS_DONE, PROGRESS_STEP,
};
pub use gate::{Gate, Session, SessionError};
pub use notify::{Notifier, Toast, ToastVariant, TOAST_CAPACITY};
pub use process::init_tracing;
pub use record_ops::{DeleteError, RecordDialog, RecordManager, RecordQuery, SubmitError};
pub use state::{State as ServiceState, StateSetupError as ServiceStateSetupError};
pub use store::{MemoryRecordStore, RecordStore, StoreError};
