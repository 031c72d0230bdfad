use serde::{Deserialize, Serialize};

use common::prelude::FolderId;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct FolderQuery {
    /// Folder to list (defaults to root)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "clap", arg(long))]
    pub folder: Option<String>,

    /// Only show entries whose name contains this text
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "clap", arg(long))]
    pub search: Option<String>,
}

impl FolderQuery {
    pub fn folder_id(&self) -> FolderId {
        self.folder
            .as_deref()
            .map(FolderId::from)
            .unwrap_or_default()
    }
}
