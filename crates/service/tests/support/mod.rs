#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use common::prelude::{
    OwnerId, Priority, Record, RecordData, RecordForm, RecordId, RecordPatch, Status,
};
use service::{MemoryRecordStore, Notifier, RecordManager, RecordStore, StoreError, Toast};

#[derive(Debug, Default)]
pub struct Calls {
    pub create: AtomicUsize,
    pub list: AtomicUsize,
    pub update: AtomicUsize,
    pub delete: AtomicUsize,
}

impl Calls {
    pub fn total(&self) -> usize {
        self.create.load(Ordering::SeqCst)
            + self.list.load(Ordering::SeqCst)
            + self.update.load(Ordering::SeqCst)
            + self.delete.load(Ordering::SeqCst)
    }
}

/// A memory store that counts every call and can be told to fail
///  any one of them.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryRecordStore,
    pub calls: Calls,
    pub fail_create: AtomicBool,
    pub fail_list: AtomicBool,
    pub fail_update: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inner(&self) -> &MemoryRecordStore {
        &self.inner
    }
}

#[async_trait]
impl RecordStore for FlakyStore {
    async fn create(&self, data: RecordData, owner: &OwnerId) -> Result<RecordId, StoreError> {
        self.calls.create.fetch_add(1, Ordering::SeqCst);
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(StoreError::Create);
        }
        self.inner.create(data, owner).await
    }

    async fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<Record>, StoreError> {
        self.calls.list.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(StoreError::Fetch);
        }
        self.inner.list_by_owner(owner).await
    }

    async fn update(
        &self,
        owner: &OwnerId,
        id: &RecordId,
        patch: RecordPatch,
    ) -> Result<(), StoreError> {
        self.calls.update.fetch_add(1, Ordering::SeqCst);
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(StoreError::Update);
        }
        self.inner.update(owner, id, patch).await
    }

    async fn delete(&self, owner: &OwnerId, id: &RecordId) -> Result<(), StoreError> {
        self.calls.delete.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(StoreError::Delete);
        }
        self.inner.delete(owner, id).await
    }
}

pub fn manager_over(store: Arc<FlakyStore>) -> (RecordManager, flume::Receiver<Toast>) {
    manager_for(store, "alice")
}

pub fn manager_for(
    store: Arc<FlakyStore>,
    owner: &str,
) -> (RecordManager, flume::Receiver<Toast>) {
    let (notifier, toasts) = Notifier::channel();
    (
        RecordManager::new(store, OwnerId::from(owner), notifier),
        toasts,
    )
}

pub fn form(title: &str, category: &str, priority: Priority, status: Status) -> RecordForm {
    RecordForm {
        title: title.to_string(),
        description: format!("{} with enough detail", title),
        category: category.to_string(),
        priority,
        status,
    }
}
