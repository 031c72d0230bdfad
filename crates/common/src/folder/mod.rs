mod entry;
mod navigator;
mod sample;

pub use entry::{format_size, Crumb, EntryKind, FolderEntry, FolderId, NewFile, ParentLink};
pub use navigator::{FolderNavigator, NavigatorError, Opened};
