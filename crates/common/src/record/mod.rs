mod filter;
mod form;
#[allow(clippy::module_inception)]
mod record;

pub use filter::{filter_records, FilterParseError, PriorityFilter, RecordFilter, StatusFilter};
pub use form::{FieldUpdate, RecordForm, ValidationError};
pub use record::{
    OwnerId, Priority, Record, RecordData, RecordId, RecordPatch, Status, UnknownVariant,
};
