use crate::error::ValidationError;
use crate::types::Course;
use serde::{Deserialize, Serialize};

/// The mutable columns of a student row, as entered in the add/edit forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentFields {
    pub name: String,
    pub course: String,
    pub mobile: String,
}

impl StudentFields {
    pub fn new(
        name: impl Into<String>,
        course: impl Into<String>,
        mobile: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            course: course.into(),
            mobile: mobile.into(),
        }
    }

    /// Check the form contents before anything reaches the store.
    pub fn validate(&self) -> Result<Course, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.mobile.trim().is_empty() {
            return Err(ValidationError::EmptyMobile);
        }
        self.course.parse()
    }
}
