use async_trait::async_trait;

use common::prelude::{OwnerId, Record, RecordData, RecordId, RecordPatch};

mod memory;

pub use memory::MemoryRecordStore;

/// Failures surfaced to callers. The messages are deliberately generic;
///  implementations log the underlying cause before returning one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to add record")]
    Create,
    #[error("Failed to fetch records")]
    Fetch,
    #[error("Failed to update record")]
    Update,
    #[error("Failed to delete record")]
    Delete,
}

/// Document collection holding user records.
///
/// The store assigns ids and both timestamps, refreshes `updated_at` on
///  every update and returns an owner's records newest-update first.
///  Update and delete only touch records belonging to `owner`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create(&self, data: RecordData, owner: &OwnerId) -> Result<RecordId, StoreError>;

    async fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<Record>, StoreError>;

    async fn update(
        &self,
        owner: &OwnerId,
        id: &RecordId,
        patch: RecordPatch,
    ) -> Result<(), StoreError>;

    async fn delete(&self, owner: &OwnerId, id: &RecordId) -> Result<(), StoreError>;
}
