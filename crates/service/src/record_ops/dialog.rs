use common::prelude::{FieldUpdate, Record, RecordForm};

use super::error::SubmitError;
use super::manager::RecordManager;

/// The add / edit dialog. Keeps the form open with an error banner
///  when a submit fails, and resets once one succeeds.
#[derive(Debug, Clone, Default)]
pub struct RecordDialog {
    form: RecordForm,
    editing: Option<Record>,
    error: Option<String>,
    open: bool,
}

impl RecordDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_new(&mut self) {
        self.form = RecordForm::default();
        self.editing = None;
        self.error = None;
        self.open = true;
    }

    pub fn open_edit(&mut self, record: &Record) {
        self.form = RecordForm::from_record(record);
        self.editing = Some(record.clone());
        self.error = None;
        self.open = true;
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn form(&self) -> &RecordForm {
        &self.form
    }

    /// The banner shown above the form, if the last submit failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn update(&mut self, update: FieldUpdate) {
        self.form.apply(update);
    }

    pub async fn submit(&mut self, manager: &mut RecordManager) -> Result<(), SubmitError> {
        self.error = None;
        match manager.submit(&self.form, self.editing.as_ref()).await {
            Ok(()) => {
                self.close();
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
