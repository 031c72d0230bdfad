use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

const ROOT: &str = "root";
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Key of a folder in the navigator tree. `root` is reserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderId(String);

impl FolderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn root() -> Self {
        Self(ROOT.to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FolderId {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FolderId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => f.write_str("file"),
            EntryKind::Folder => f.write_str("folder"),
        }
    }
}

/// One row of a folder listing. Entry ids share the folder id space,
///  so a folder entry's id is also the key of its own listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderEntry {
    pub id: FolderId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub modified_at: OffsetDateTime,
}

impl FolderEntry {
    pub fn folder(id: FolderId, name: impl Into<String>, modified_at: OffsetDateTime) -> Self {
        Self {
            id,
            name: name.into(),
            kind: EntryKind::Folder,
            size: None,
            modified_at,
        }
    }

    pub fn file(
        id: FolderId,
        name: impl Into<String>,
        size: impl Into<String>,
        modified_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind: EntryKind::File,
            size: Some(size.into()),
            modified_at,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }
}

/// Parent pointer for a non-root folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentLink {
    pub name: String,
    pub parent_id: FolderId,
}

/// One step of the breadcrumb trail, root-child first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crumb {
    pub id: FolderId,
    pub name: String,
    pub path: String,
}

/// A file picked for upload. Only its name and byte size matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFile {
    pub name: String,
    pub size_bytes: u64,
}

impl NewFile {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }

    pub fn display_size(&self) -> String {
        format_size(self.size_bytes)
    }
}

/// Render a byte count the way the listing shows it: "2.40 MB".
pub fn format_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MB)
}
