/**
 * In-memory drive used by the file dashboard.
 *  - Folder tree keyed by folder id, with parent pointers
 *  - Navigation, breadcrumbs and local create / rename / delete
 */
pub mod folder;
/**
 * User records and everything that happens to them
 *  before they reach a store.
 *  - Record model and partial updates
 *  - The add / edit form and its validation rules
 *  - The search / status / priority filter pipeline
 */
pub mod record;
/**
 * Shared case-insensitive search matching.
 */
pub mod search;
/**
 * Helper for setting build version information
 *  at compile time.
 */
pub mod version;

pub mod prelude {
    pub use crate::folder::{
        Crumb, EntryKind, FolderEntry, FolderId, FolderNavigator, NavigatorError, NewFile,
        Opened, ParentLink,
    };
    pub use crate::record::{
        filter_records, FieldUpdate, OwnerId, Priority, PriorityFilter, Record, RecordData,
        RecordFilter, RecordForm, RecordId, RecordPatch, Status, StatusFilter, ValidationError,
    };
    pub use crate::version::build_info;
}
