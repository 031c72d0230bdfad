use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use time::OffsetDateTime;
use uuid::Uuid;

use common::prelude::{OwnerId, Record, RecordData, RecordId, RecordPatch};

use super::{RecordStore, StoreError};

#[derive(Debug)]
struct Stored {
    record: Record,
    // write sequence, breaks ties between equal timestamps
    touched: u64,
}

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<RecordId, Stored>,
    sequence: u64,
}

impl Inner {
    fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }
}

/// Process-local record collection. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore(Arc<Mutex<Inner>>);

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &RecordId) -> Option<Record> {
        self.0.lock().records.get(id).map(|s| s.record.clone())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    #[tracing::instrument(skip(self, data))]
    async fn create(&self, data: RecordData, owner: &OwnerId) -> Result<RecordId, StoreError> {
        let mut inner = self.0.lock();
        let id = RecordId::new(Uuid::new_v4().simple().to_string());

        let mut record = Record::draft(data, owner.clone(), OffsetDateTime::now_utc());
        record.id = Some(id.clone());

        let touched = inner.next_sequence();
        inner.records.insert(id.clone(), Stored { record, touched });

        tracing::debug!(record = %id, "record created");
        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    async fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<Record>, StoreError> {
        let inner = self.0.lock();
        let mut owned: Vec<&Stored> = inner
            .records
            .values()
            .filter(|s| &s.record.user_id == owner)
            .collect();

        owned.sort_by(|a, b| {
            b.record
                .updated_at
                .cmp(&a.record.updated_at)
                .then(b.touched.cmp(&a.touched))
        });

        Ok(owned.into_iter().map(|s| s.record.clone()).collect())
    }

    #[tracing::instrument(skip(self, patch))]
    async fn update(
        &self,
        owner: &OwnerId,
        id: &RecordId,
        patch: RecordPatch,
    ) -> Result<(), StoreError> {
        let mut inner = self.0.lock();
        let touched = inner.next_sequence();

        let Some(stored) = inner.records.get_mut(id) else {
            tracing::error!(record = %id, "update of unknown record");
            return Err(StoreError::Update);
        };
        if &stored.record.user_id != owner {
            tracing::error!(record = %id, "update of a record owned by someone else");
            return Err(StoreError::Update);
        }

        stored.record.apply_patch(patch);
        stored.record.updated_at = OffsetDateTime::now_utc();
        stored.touched = touched;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, owner: &OwnerId, id: &RecordId) -> Result<(), StoreError> {
        let mut inner = self.0.lock();
        match inner.records.get(id) {
            None => {
                tracing::error!(record = %id, "delete of unknown record");
                Err(StoreError::Delete)
            }
            Some(stored) if &stored.record.user_id != owner => {
                tracing::error!(record = %id, "delete of a record owned by someone else");
                Err(StoreError::Delete)
            }
            Some(_) => {
                inner.records.remove(id);
                Ok(())
            }
        }
    }
}
