use std::collections::{HashMap, HashSet};

use rand::Rng;
use time::OffsetDateTime;

use crate::search::matches_query;

use super::entry::{Crumb, EntryKind, FolderEntry, FolderId, NewFile, ParentLink};
use super::sample::sample_tree;

const ID_LEN: usize = 7;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigatorError {
    #[error("Folder name cannot be empty")]
    EmptyFolderName,
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("folder not found: {0}")]
    FolderNotFound(FolderId),
    #[error("entry not found: {0}")]
    EntryNotFound(FolderId),
    #[error("the root folder cannot be renamed or deleted")]
    RootEntry,
}

/// What happened when an entry was opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opened {
    /// The navigator moved into this folder.
    Folder(FolderId),
    /// Files are not navigable; the caller decides how to preview them.
    File(FolderEntry),
}

/**
* Folder Navigator
* ================
* An in-memory drive. Two maps describe the tree:
*  - `entries`: folder id -> ordered listing of that folder
*  - `parents`: folder id -> { name, parent id }, for every non-root folder
*
* The name of a folder lives in both maps and every rename keeps them
*  in step. `current` is the folder being viewed; moving around is a
*  plain assignment, and the breadcrumb trail is rebuilt from the
*  parent pointers rather than kept as a history stack.
*/
#[derive(Debug, Clone)]
pub struct FolderNavigator {
    entries: HashMap<FolderId, Vec<FolderEntry>>,
    parents: HashMap<FolderId, ParentLink>,
    current: FolderId,
    search: String,
}

impl Default for FolderNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl FolderNavigator {
    /// An empty drive with only the root folder.
    pub fn new() -> Self {
        Self::from_parts(HashMap::new(), HashMap::new())
    }

    /// The demo drive: Documents, Images and a couple of files.
    pub fn sample() -> Self {
        let (entries, parents) = sample_tree();
        Self::from_parts(entries, parents)
    }

    /// Build a navigator over existing maps. The maps are taken as given,
    ///  a root slot is added when missing.
    pub fn from_parts(
        mut entries: HashMap<FolderId, Vec<FolderEntry>>,
        parents: HashMap<FolderId, ParentLink>,
    ) -> Self {
        entries.entry(FolderId::root()).or_default();
        Self {
            entries,
            parents,
            current: FolderId::root(),
            search: String::new(),
        }
    }

    pub fn current(&self) -> &FolderId {
        &self.current
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn contains_folder(&self, id: &FolderId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn parent_link(&self, id: &FolderId) -> Option<&ParentLink> {
        self.parents.get(id)
    }

    /// Jump straight to a folder, e.g. from a breadcrumb.
    pub fn navigate_to(&mut self, id: &FolderId) -> Result<(), NavigatorError> {
        if !self.contains_folder(id) {
            return Err(NavigatorError::FolderNotFound(id.clone()));
        }
        tracing::debug!(from = %self.current, to = %id, "navigating");
        self.current = id.clone();
        Ok(())
    }

    pub fn go_home(&mut self) {
        self.current = FolderId::root();
    }

    pub fn open(&mut self, entry: &FolderEntry) -> Result<Opened, NavigatorError> {
        match entry.kind {
            EntryKind::Folder => {
                self.navigate_to(&entry.id)?;
                Ok(Opened::Folder(entry.id.clone()))
            }
            EntryKind::File => Ok(Opened::File(entry.clone())),
        }
    }

    /// Raw contents of a folder, ignoring the search term.
    pub fn listing_of(&self, id: &FolderId) -> &[FolderEntry] {
        self.entries.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// What the dashboard shows: the current folder narrowed by the search term.
    pub fn listing(&self) -> Vec<FolderEntry> {
        self.listing_of(&self.current)
            .iter()
            .filter(|entry| matches_query(&entry.name, &self.search))
            .cloned()
            .collect()
    }

    pub fn breadcrumbs(&self) -> Vec<Crumb> {
        self.breadcrumbs_for(&self.current)
    }

    /// Walk parent pointers up to root. A missing or repeating link ends
    ///  the walk and whatever was resolved below it is returned.
    pub fn breadcrumbs_for(&self, id: &FolderId) -> Vec<Crumb> {
        let mut trail = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = id.clone();

        while !cursor.is_root() {
            if !seen.insert(cursor.clone()) {
                tracing::warn!(folder = %cursor, "cycle in folder parent chain");
                break;
            }
            let Some(link) = self.parents.get(&cursor) else {
                tracing::debug!(folder = %cursor, "folder has no parent link");
                break;
            };
            trail.push(Crumb {
                id: cursor.clone(),
                name: link.name.clone(),
                path: cursor.to_string(),
            });
            cursor = link.parent_id.clone();
        }

        trail.reverse();
        trail
    }

    pub fn entry(&self, id: &FolderId) -> Option<&FolderEntry> {
        let (parent, index) = self.locate(id)?;
        self.entries.get(&parent).and_then(|listing| listing.get(index))
    }

    pub fn create_folder(&mut self, name: &str) -> Result<FolderEntry, NavigatorError> {
        let parent = self.current.clone();
        self.create_folder_in(&parent, name)
    }

    pub fn create_folder_in(
        &mut self,
        parent: &FolderId,
        name: &str,
    ) -> Result<FolderEntry, NavigatorError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(NavigatorError::EmptyFolderName);
        }
        if !self.contains_folder(parent) {
            return Err(NavigatorError::FolderNotFound(parent.clone()));
        }

        let id = self.fresh_id();
        let entry = FolderEntry::folder(id.clone(), name, OffsetDateTime::now_utc());

        self.push_entry(parent, entry.clone());
        self.entries.insert(id.clone(), Vec::new());
        self.parents.insert(
            id.clone(),
            ParentLink {
                name: name.to_string(),
                parent_id: parent.clone(),
            },
        );

        tracing::debug!(folder = %id, parent = %parent, name, "created folder");
        Ok(entry)
    }

    pub fn add_file(&mut self, file: NewFile) -> Result<FolderEntry, NavigatorError> {
        let parent = self.current.clone();
        self.add_file_in(&parent, file)
    }

    pub fn add_file_in(
        &mut self,
        parent: &FolderId,
        file: NewFile,
    ) -> Result<FolderEntry, NavigatorError> {
        let name = file.name.trim();
        if name.is_empty() {
            return Err(NavigatorError::EmptyName);
        }
        if !self.contains_folder(parent) {
            return Err(NavigatorError::FolderNotFound(parent.clone()));
        }

        let entry = FolderEntry::file(
            self.fresh_id(),
            name,
            file.display_size(),
            OffsetDateTime::now_utc(),
        );
        self.push_entry(parent, entry.clone());

        tracing::debug!(file = %entry.id, parent = %parent, name, "added file");
        Ok(entry)
    }

    /// Rename a file or folder in its parent listing. Folders also get
    ///  their parent link renamed so the breadcrumb agrees.
    pub fn rename(&mut self, id: &FolderId, new_name: &str) -> Result<FolderEntry, NavigatorError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(NavigatorError::EmptyName);
        }
        if id.is_root() {
            return Err(NavigatorError::RootEntry);
        }

        let (parent, index) = self
            .locate(id)
            .ok_or_else(|| NavigatorError::EntryNotFound(id.clone()))?;
        let entry = self
            .entries
            .get_mut(&parent)
            .and_then(|listing| listing.get_mut(index))
            .ok_or_else(|| NavigatorError::EntryNotFound(id.clone()))?;

        entry.name = new_name.to_string();
        let renamed = entry.clone();

        if renamed.is_folder() {
            if let Some(link) = self.parents.get_mut(id) {
                link.name = new_name.to_string();
            }
        }

        Ok(renamed)
    }

    /// Remove an entry from its parent listing. Deleting a folder removes
    ///  the whole subtree: every nested folder's listing and parent link.
    pub fn delete(&mut self, id: &FolderId) -> Result<FolderEntry, NavigatorError> {
        if id.is_root() {
            return Err(NavigatorError::RootEntry);
        }

        let (parent, index) = self
            .locate(id)
            .ok_or_else(|| NavigatorError::EntryNotFound(id.clone()))?;
        let removed = self
            .entries
            .get_mut(&parent)
            .filter(|listing| index < listing.len())
            .map(|listing| listing.remove(index))
            .ok_or_else(|| NavigatorError::EntryNotFound(id.clone()))?;

        if removed.is_folder() {
            let purged = self.purge_subtree(&removed.id);
            if purged.contains(&self.current) {
                tracing::debug!(folder = %self.current, "current folder deleted, moving to parent");
                self.current = parent;
            }
        }

        Ok(removed)
    }

    /// True when every non-root listing has a parent link and every
    ///  parent chain reaches root.
    pub fn is_consistent(&self) -> bool {
        self.entries.keys().filter(|id| !id.is_root()).all(|id| {
            let mut seen = HashSet::new();
            let mut cursor = id.clone();
            while !cursor.is_root() {
                if !seen.insert(cursor.clone()) {
                    return false;
                }
                match self.parents.get(&cursor) {
                    Some(link) => cursor = link.parent_id.clone(),
                    None => return false,
                }
            }
            true
        })
    }

    fn push_entry(&mut self, parent: &FolderId, entry: FolderEntry) {
        self.entries.entry(parent.clone()).or_default().push(entry);
    }

    fn purge_subtree(&mut self, root: &FolderId) -> Vec<FolderId> {
        let mut purged = Vec::new();
        let mut stack = vec![root.clone()];

        while let Some(folder) = stack.pop() {
            if let Some(listing) = self.entries.remove(&folder) {
                stack.extend(
                    listing
                        .into_iter()
                        .filter(FolderEntry::is_folder)
                        .map(|entry| entry.id),
                );
            }
            self.parents.remove(&folder);
            purged.push(folder);
        }

        tracing::debug!(count = purged.len(), "purged folders");
        purged
    }

    /// Find the listing holding an entry and its position in it.
    fn locate(&self, id: &FolderId) -> Option<(FolderId, usize)> {
        if let Some(link) = self.parents.get(id) {
            if let Some(index) = self
                .listing_of(&link.parent_id)
                .iter()
                .position(|entry| &entry.id == id)
            {
                return Some((link.parent_id.clone(), index));
            }
        }

        self.entries.iter().find_map(|(folder, listing)| {
            listing
                .iter()
                .position(|entry| &entry.id == id)
                .map(|index| (folder.clone(), index))
        })
    }

    fn fresh_id(&self) -> FolderId {
        let mut rng = rand::rng();
        loop {
            let id: String = (0..ID_LEN)
                .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
                .collect();
            let id = FolderId::new(id);
            if !id.is_root() && !self.contains_folder(&id) && self.locate(&id).is_none() {
                return id;
            }
        }
    }
}
