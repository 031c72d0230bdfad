use std::sync::Arc;

use common::prelude::{
    OwnerId, PriorityFilter, Record, RecordFilter, RecordForm, RecordId, StatusFilter,
};

use crate::notify::{Notifier, Toast};
use crate::store::{RecordStore, StoreError};

use super::error::{DeleteError, SubmitError};

/**
* Record manager
* ==============
* Owns one user's record list and the filter inputs of the
*  dashboard. The visible list is recomputed every time the
*  records or any filter input change.
*
* Updates and deletes are only sent for records in the loaded
*  list that belong to the owner.
*
* Mutations go to the store first. Only once the store call has
*  resolved successfully is the full list fetched again; a failed
*  call never touches the list that is already displayed.
*/
pub struct RecordManager {
    store: Arc<dyn RecordStore>,
    owner: OwnerId,
    notifier: Notifier,
    records: Vec<Record>,
    filter: RecordFilter,
    visible: Vec<Record>,
}

impl std::fmt::Debug for RecordManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordManager")
            .field("owner", &self.owner)
            .field("records", &self.records.len())
            .field("visible", &self.visible.len())
            .field("filter", &self.filter)
            .finish()
    }
}

impl RecordManager {
    pub fn new(store: Arc<dyn RecordStore>, owner: OwnerId, notifier: Notifier) -> Self {
        Self {
            store,
            owner,
            notifier,
            records: Vec::new(),
            filter: RecordFilter::default(),
            visible: Vec::new(),
        }
    }

    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Every record of the owner, newest update first.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn visible(&self) -> &[Record] {
        &self.visible
    }

    pub fn filter(&self) -> &RecordFilter {
        &self.filter
    }

    pub fn record(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id.as_ref() == Some(id))
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
        self.refresh_visible();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter.status = status;
        self.refresh_visible();
    }

    pub fn set_priority_filter(&mut self, priority: PriorityFilter) {
        self.filter.priority = priority;
        self.refresh_visible();
    }

    fn owns(&self, id: &RecordId) -> bool {
        self.record(id).is_some_and(|r| r.user_id == self.owner)
    }

    fn refresh_visible(&mut self) {
        self.visible = self.filter.apply(&self.records);
    }

    /// Fetch the owner's records. On failure the current list stays.
    #[tracing::instrument(skip(self), fields(owner = %self.owner))]
    pub async fn load(&mut self) -> Result<(), StoreError> {
        match self.store.list_by_owner(&self.owner).await {
            Ok(records) => {
                tracing::debug!(count = records.len(), "records loaded");
                self.records = records;
                self.refresh_visible();
                Ok(())
            }
            Err(e) => {
                tracing::error!("error loading records: {}", e);
                self.notifier
                    .notify(Toast::destructive("Error").description("Failed to load records"));
                Err(e)
            }
        }
    }

    /// Create a record, or update `editing` when given.
    ///
    /// Validation runs before the store is contacted. A store failure is
    ///  handed back to the caller untouched so the form can show it, and
    ///  no reload happens.
    #[tracing::instrument(skip(self, form, editing), fields(owner = %self.owner))]
    pub async fn submit(
        &mut self,
        form: &RecordForm,
        editing: Option<&Record>,
    ) -> Result<(), SubmitError> {
        let data = form.validate()?;

        let toast = match editing {
            Some(record) => {
                let id = record.id.as_ref().ok_or(SubmitError::MissingId)?;
                if !self.owns(id) {
                    tracing::warn!(record = %id, "update refused, record not owned");
                    return Err(SubmitError::NotOwned(id.clone()));
                }
                self.store.update(&self.owner, id, data.into()).await.map_err(|e| {
                    tracing::error!(record = %id, "error updating record: {}", e);
                    e
                })?;
                Toast::new("Record updated").description("Your record has been updated.")
            }
            None => {
                let id = self.store.create(data, &self.owner).await.map_err(|e| {
                    tracing::error!("error adding record: {}", e);
                    e
                })?;
                tracing::debug!(record = %id, "record added");
                Toast::new("Record added").description("Your record has been added.")
            }
        };

        // a failed reload toasts on its own; the mutation itself went through
        let _ = self.load().await;
        self.notifier.notify(toast);
        Ok(())
    }

    /// Delete one of the owner's records. Ids outside the loaded list are
    ///  refused without contacting the store.
    #[tracing::instrument(skip(self), fields(owner = %self.owner))]
    pub async fn delete(&mut self, id: &RecordId) -> Result<(), DeleteError> {
        let result = if self.owns(id) {
            self.store
                .delete(&self.owner, id)
                .await
                .map_err(DeleteError::from)
        } else {
            Err(DeleteError::NotOwned(id.clone()))
        };

        if let Err(e) = result {
            tracing::error!(record = %id, "error deleting record: {}", e);
            self.notifier
                .notify(Toast::destructive("Error").description(e.to_string()));
            return Err(e);
        }

        let _ = self.load().await;
        self.notifier
            .notify(Toast::new("Record deleted").description("Your record has been deleted."));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ToastVariant;
    use crate::store::MemoryRecordStore;
    use common::prelude::{FieldUpdate, Priority, Status};

    fn form(title: &str, priority: Priority, status: Status) -> RecordForm {
        RecordForm {
            title: title.to_string(),
            description: "Long enough description".to_string(),
            category: "Work".to_string(),
            priority,
            status,
        }
    }

    fn manager() -> (RecordManager, flume::Receiver<Toast>) {
        let (notifier, rx) = Notifier::channel();
        let store = Arc::new(MemoryRecordStore::new());
        (
            RecordManager::new(store, OwnerId::from("alice"), notifier),
            rx,
        )
    }

    #[tokio::test]
    async fn test_submit_new_reloads_and_toasts() {
        let (mut manager, rx) = manager();

        manager
            .submit(&form("Quarterly report", Priority::High, Status::Active), None)
            .await
            .unwrap();

        assert_eq!(manager.records().len(), 1);
        assert_eq!(manager.visible().len(), 1);
        assert!(manager.records()[0].is_persisted());

        let toast = rx.try_recv().unwrap();
        assert_eq!(toast.title, "Record added");
        assert_eq!(toast.variant, ToastVariant::Default);
    }

    #[tokio::test]
    async fn test_submit_edit_updates_in_place() {
        let (mut manager, rx) = manager();
        manager
            .submit(&form("Quarterly report", Priority::High, Status::Active), None)
            .await
            .unwrap();

        let existing = manager.records()[0].clone();
        let edited =
            RecordForm::from_record(&existing).with(FieldUpdate::Status(Status::Completed));
        manager.submit(&edited, Some(&existing)).await.unwrap();

        assert_eq!(manager.records().len(), 1);
        assert_eq!(manager.records()[0].status, Status::Completed);
        assert_eq!(manager.records()[0].id, existing.id);

        let titles: Vec<String> = rx.drain().map(|t| t.title).collect();
        assert_eq!(titles, ["Record added", "Record updated"]);
    }

    #[tokio::test]
    async fn test_submit_invalid_form_never_reaches_store() {
        let (mut manager, rx) = manager();

        let err = manager
            .submit(&form("Hi", Priority::Low, Status::Pending), None)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Title must be at least 3 characters long");
        assert!(err.is_rejected_locally());
        assert!(manager.records().is_empty());
        assert!(rx.is_empty());
    }

    #[tokio::test]
    async fn test_submit_edit_without_id() {
        let (mut manager, _rx) = manager();
        let unsaved = Record::draft(
            form("Unsaved one", Priority::Low, Status::Pending)
                .validate()
                .unwrap(),
            OwnerId::from("alice"),
            time::OffsetDateTime::now_utc(),
        );

        let err = manager
            .submit(&RecordForm::from_record(&unsaved), Some(&unsaved))
            .await
            .unwrap_err();
        assert_eq!(err, SubmitError::MissingId);
    }

    #[tokio::test]
    async fn test_filters_recompute_visible() {
        let (mut manager, _rx) = manager();
        for (title, priority, status) in [
            ("Alpha task", Priority::High, Status::Active),
            ("Beta task", Priority::Low, Status::Completed),
            ("Gamma chore", Priority::High, Status::Pending),
        ] {
            manager
                .submit(&form(title, priority, status), None)
                .await
                .unwrap();
        }
        assert_eq!(manager.visible().len(), 3);

        manager.set_priority_filter(PriorityFilter::Only(Priority::High));
        assert_eq!(manager.visible().len(), 2);

        manager.set_search("TASK");
        assert_eq!(manager.visible().len(), 1);
        assert_eq!(manager.visible()[0].title, "Alpha task");

        manager.set_status_filter(StatusFilter::Only(Status::Completed));
        assert!(manager.visible().is_empty());

        manager.set_search("");
        manager.set_priority_filter(PriorityFilter::All);
        assert_eq!(manager.visible().len(), 1);
        assert_eq!(manager.visible()[0].title, "Beta task");
        assert_eq!(manager.records().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_removes_and_toasts() {
        let (mut manager, rx) = manager();
        manager
            .submit(&form("Doomed record", Priority::Medium, Status::Active), None)
            .await
            .unwrap();
        let id = manager.records()[0].id.clone().unwrap();

        manager.delete(&id).await.unwrap();
        assert!(manager.records().is_empty());
        assert!(manager.record(&id).is_none());

        let last = rx.drain().last().unwrap();
        assert_eq!(last.title, "Record deleted");
    }

    #[tokio::test]
    async fn test_delete_unknown_keeps_list() {
        let (mut manager, rx) = manager();
        manager
            .submit(&form("Survivor", Priority::Medium, Status::Active), None)
            .await
            .unwrap();
        rx.drain().for_each(drop);
        let before = manager.records().to_vec();

        let err = manager.delete(&RecordId::from("nope")).await.unwrap_err();
        assert_eq!(err, DeleteError::NotOwned(RecordId::from("nope")));
        assert_eq!(manager.records(), before.as_slice());

        let toast = rx.try_recv().unwrap();
        assert!(toast.is_destructive());
        assert_eq!(toast.description.as_deref(), Some("Record nope is not one of yours"));
    }

    #[tokio::test]
    async fn test_edit_of_foreign_record_refused() {
        let (notifier, rx) = Notifier::channel();
        let store = Arc::new(MemoryRecordStore::new());
        let mut alice =
            RecordManager::new(store.clone(), OwnerId::from("alice"), notifier.clone());
        let mut bob = RecordManager::new(store.clone(), OwnerId::from("bob"), notifier);

        bob.submit(&form("Bob's garden", Priority::Low, Status::Active), None)
            .await
            .unwrap();
        let bobs = bob.records()[0].clone();
        let bobs_id = bobs.id.clone().unwrap();
        rx.drain().for_each(drop);

        let hijack = RecordForm::from_record(&bobs).with(FieldUpdate::Title("Mine now".into()));
        let err = alice.submit(&hijack, Some(&bobs)).await.unwrap_err();
        assert_eq!(err, SubmitError::NotOwned(bobs_id.clone()));
        assert!(err.is_rejected_locally());

        let err = alice.delete(&bobs_id).await.unwrap_err();
        assert_eq!(err, DeleteError::NotOwned(bobs_id.clone()));

        let stored = store.get(&bobs_id).expect("bob's record survives");
        assert_eq!(stored.title, "Bob's garden");
        assert!(alice.records().is_empty());
    }
}
