use super::record::{Priority, Record, RecordData, Status};

const MIN_TITLE_CHARS: usize = 3;
const MIN_DESCRIPTION_CHARS: usize = 10;

/// A single field edit on the record form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Title(String),
    Description(String),
    Category(String),
    Priority(Priority),
    Status(Status),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleRequired,
    #[error("Title must be at least 3 characters long")]
    TitleTooShort,
    #[error("Description is required")]
    DescriptionRequired,
    #[error("Description must be at least 10 characters long")]
    DescriptionTooShort,
    #[error("Category is required")]
    CategoryRequired,
}

/// In-progress state of the add / edit record dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub status: Status,
}

impl RecordForm {
    /// Pre-fill the form for editing an existing record.
    pub fn from_record(record: &Record) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            category: record.category.clone(),
            priority: record.priority,
            status: record.status,
        }
    }

    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Title(title) => self.title = title,
            FieldUpdate::Description(description) => self.description = description,
            FieldUpdate::Category(category) => self.category = category,
            FieldUpdate::Priority(priority) => self.priority = priority,
            FieldUpdate::Status(status) => self.status = status,
        }
    }

    pub fn with(mut self, update: FieldUpdate) -> Self {
        self.apply(update);
        self
    }

    /// Check the form and hand back trimmed data ready for the store.
    ///  The first failing rule wins.
    pub fn validate(&self) -> Result<RecordData, ValidationError> {
        let title = self.title.trim();
        let description = self.description.trim();
        let category = self.category.trim();

        if title.is_empty() {
            return Err(ValidationError::TitleRequired);
        }
        if title.chars().count() < MIN_TITLE_CHARS {
            return Err(ValidationError::TitleTooShort);
        }
        if description.is_empty() {
            return Err(ValidationError::DescriptionRequired);
        }
        if description.chars().count() < MIN_DESCRIPTION_CHARS {
            return Err(ValidationError::DescriptionTooShort);
        }
        if category.is_empty() {
            return Err(ValidationError::CategoryRequired);
        }

        Ok(RecordData {
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            priority: self.priority,
            status: self.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RecordForm {
        RecordForm::default()
            .with(FieldUpdate::Title("Team offsite".into()))
            .with(FieldUpdate::Description("Book venue and travel".into()))
            .with(FieldUpdate::Category("Work".into()))
    }

    #[test]
    fn test_defaults() {
        let form = RecordForm::default();
        assert!(form.title.is_empty());
        assert_eq!(form.priority, Priority::Medium);
        assert_eq!(form.status, Status::Active);
    }

    #[test]
    fn test_apply_touches_one_field() {
        let form = filled().with(FieldUpdate::Priority(Priority::High));
        assert_eq!(form.priority, Priority::High);
        assert_eq!(form.status, Status::Active);
        assert_eq!(form.title, "Team offsite");
    }

    #[test]
    fn test_short_title() {
        let form = filled().with(FieldUpdate::Title("Hi".into()));
        let err = form.validate().unwrap_err();
        assert_eq!(err, ValidationError::TitleTooShort);
        assert_eq!(err.to_string(), "Title must be at least 3 characters long");
    }

    #[test]
    fn test_rule_order() {
        assert_eq!(
            RecordForm::default().validate(),
            Err(ValidationError::TitleRequired)
        );
        let form = RecordForm::default().with(FieldUpdate::Title("   ".into()));
        assert_eq!(form.validate(), Err(ValidationError::TitleRequired));

        let form = filled().with(FieldUpdate::Description("".into()));
        assert_eq!(form.validate(), Err(ValidationError::DescriptionRequired));

        let form = filled().with(FieldUpdate::Description("too short".into()));
        assert_eq!(form.validate(), Err(ValidationError::DescriptionTooShort));

        let form = filled().with(FieldUpdate::Category(" ".into()));
        assert_eq!(form.validate(), Err(ValidationError::CategoryRequired));
    }

    #[test]
    fn test_trimmed_on_success() {
        let form = filled()
            .with(FieldUpdate::Title("  Team offsite  ".into()))
            .with(FieldUpdate::Category(" Work\n".into()));
        let data = form.validate().unwrap();
        assert_eq!(data.title, "Team offsite");
        assert_eq!(data.category, "Work");
    }

    #[test]
    fn test_length_counts_chars() {
        // three characters, six bytes
        let form = filled().with(FieldUpdate::Title("éèê".into()));
        assert!(form.validate().is_ok());
    }
}
