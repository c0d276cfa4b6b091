use crate::types::Course;
use serde::{Deserialize, Serialize};

pub type StudentId = i64;

/// One row of the `students` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    /// Free text as stored; other clients may have written values outside [`Course`].
    pub course: String,
    pub mobile: String,
}

impl Student {
    /// The course as a known enum value, if it is one.
    pub fn known_course(&self) -> Option<Course> {
        self.course.parse().ok()
    }
}
