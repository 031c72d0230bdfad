use std::sync::Arc;
use std::time::Duration;

use common::prelude::{FolderNavigator, OwnerId};

use super::auth::{AuthProvider, MemoryAuth};
use super::config::Config;
use super::folder_ops::FolderSession;
use super::notify::{Notifier, Toast};
use super::record_ops::RecordManager;
use super::store::{MemoryRecordStore, RecordStore};

#[derive(Clone)]
pub struct State {
    store: Arc<dyn RecordStore>,
    auth: Arc<dyn AuthProvider>,
    notifier: Notifier,
    toasts: flume::Receiver<Toast>,
    upload_tick: Duration,
    sample_tree: bool,
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("upload_tick", &self.upload_tick)
            .field("sample_tree", &self.sample_tree)
            .field("pending_toasts", &self.toasts.len())
            .finish()
    }
}

impl State {
    /// Wire up the in-memory collaborators.
    pub fn from_config(config: &Config) -> Result<Self, StateSetupError> {
        Self::with_collaborators(
            config,
            Arc::new(MemoryRecordStore::new()),
            Arc::new(MemoryAuth::new()),
        )
    }

    pub fn with_collaborators(
        config: &Config,
        store: Arc<dyn RecordStore>,
        auth: Arc<dyn AuthProvider>,
    ) -> Result<Self, StateSetupError> {
        if config.upload_tick.is_zero() {
            return Err(StateSetupError::ZeroUploadTick);
        }

        let (notifier, toasts) = Notifier::channel();
        tracing::debug!(
            upload_tick_ms = config.upload_tick.as_millis() as u64,
            sample_tree = config.sample_tree,
            "service state ready"
        );

        Ok(Self {
            store,
            auth,
            notifier,
            toasts,
            upload_tick: config.upload_tick,
            sample_tree: config.sample_tree,
        })
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    pub fn auth(&self) -> &Arc<dyn AuthProvider> {
        &self.auth
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Receiving end of every toast raised through this state. At most
    ///  `TOAST_CAPACITY` unread toasts are kept, the oldest go first.
    pub fn toasts(&self) -> flume::Receiver<Toast> {
        self.toasts.clone()
    }

    pub fn record_manager(&self, owner: OwnerId) -> RecordManager {
        RecordManager::new(self.store.clone(), owner, self.notifier.clone())
    }

    pub fn folder_session(&self) -> FolderSession {
        let navigator = if self.sample_tree {
            FolderNavigator::sample()
        } else {
            FolderNavigator::new()
        };
        FolderSession::new(navigator, self.notifier.clone(), self.upload_tick)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("upload tick must be greater than zero")]
    ZeroUploadTick,
}
