use common::prelude::{RecordId, ValidationError};

use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Record has no id and cannot be updated")]
    MissingId,
    #[error("Record {0} is not one of yours")]
    NotOwned(RecordId),
}

impl SubmitError {
    /// True when the store was never contacted.
    pub fn is_rejected_locally(&self) -> bool {
        !matches!(self, SubmitError::Store(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeleteError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Record {0} is not one of yours")]
    NotOwned(RecordId),
}
