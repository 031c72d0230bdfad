use std::time::Duration;

use tokio::sync::watch;

use common::prelude::{
    Crumb, FolderEntry, FolderId, FolderNavigator, NavigatorError, NewFile, Opened,
};

use crate::notify::{Notifier, Toast};

use super::upload::SimulatedUpload;

/// The file dashboard: a navigator plus the toasts its actions raise.
#[derive(Debug, Clone)]
pub struct FolderSession {
    navigator: FolderNavigator,
    notifier: Notifier,
    upload: SimulatedUpload,
}

impl FolderSession {
    pub fn new(navigator: FolderNavigator, notifier: Notifier, upload_tick: Duration) -> Self {
        Self {
            navigator,
            notifier,
            upload: SimulatedUpload::new(upload_tick),
        }
    }

    pub fn navigator(&self) -> &FolderNavigator {
        &self.navigator
    }

    pub fn current(&self) -> &FolderId {
        self.navigator.current()
    }

    pub fn listing(&self) -> Vec<FolderEntry> {
        self.navigator.listing()
    }

    pub fn breadcrumbs(&self) -> Vec<Crumb> {
        self.navigator.breadcrumbs()
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.navigator.set_search(query);
    }

    pub fn navigate_to(&mut self, id: &FolderId) -> Result<(), NavigatorError> {
        self.navigator.navigate_to(id)
    }

    pub fn go_home(&mut self) {
        self.navigator.go_home();
    }

    /// Folders are entered; files get a preview toast.
    pub fn open(&mut self, entry: &FolderEntry) -> Result<Opened, NavigatorError> {
        let opened = self.navigator.open(entry)?;
        if let Opened::File(file) = &opened {
            self.notifier.notify(
                Toast::new("File Preview").description(format!("Opening {}", file.name)),
            );
        }
        Ok(opened)
    }

    #[tracing::instrument(skip(self))]
    pub fn create_folder(&mut self, name: &str) -> Result<FolderEntry, NavigatorError> {
        let folder = self.navigator.create_folder(name)?;
        self.notifier.notify(
            Toast::new("Folder Created")
                .description(format!("Folder \"{}\" has been created.", folder.name)),
        );
        Ok(folder)
    }

    #[tracing::instrument(skip(self))]
    pub fn rename(&mut self, id: &FolderId, new_name: &str) -> Result<FolderEntry, NavigatorError> {
        let renamed = self.navigator.rename(id, new_name)?;
        self.notifier.notify(
            Toast::new("Item Renamed")
                .description(format!("Item has been renamed to \"{}\".", renamed.name)),
        );
        Ok(renamed)
    }

    #[tracing::instrument(skip(self))]
    pub fn delete(&mut self, id: &FolderId) -> Result<FolderEntry, NavigatorError> {
        let removed = self.navigator.delete(id)?;
        self.notifier.notify(
            Toast::new("Item Deleted")
                .description(format!("\"{}\" has been deleted.", removed.name)),
        );
        Ok(removed)
    }

    /// Simulate uploading `file` into the current folder. Progress is
    ///  published on `progress`; the entry appears once it completes.
    #[tracing::instrument(skip(self, progress), fields(name = %file.name))]
    pub async fn upload(
        &mut self,
        file: NewFile,
        progress: &watch::Sender<u8>,
    ) -> Result<FolderEntry, NavigatorError> {
        if file.name.trim().is_empty() {
            return Err(NavigatorError::EmptyName);
        }
        let target = self.navigator.current().clone();

        self.upload.run(progress).await;

        let entry = self.navigator.add_file_in(&target, file)?;
        self.notifier.notify(
            Toast::new("File uploaded successfully")
                .description(format!("{} has been uploaded.", entry.name)),
        );
        Ok(entry)
    }
}
