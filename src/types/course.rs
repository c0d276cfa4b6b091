use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Courses a student can be enrolled in.
///
/// The store keeps `course` as free text; this enum is the set the controller
/// accepts on add and edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Course {
    Astronomy,
    Biology,
    Math,
    Physics,
    #[serde(rename = "Software Engineering")]
    SoftwareEngineering,
}

impl Course {
    /// All courses, sorted by display name.
    pub const ALL: [Course; 5] = [
        Course::Astronomy,
        Course::Biology,
        Course::Math,
        Course::Physics,
        Course::SoftwareEngineering,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Course::Astronomy => "Astronomy",
            Course::Biology => "Biology",
            Course::Math => "Math",
            Course::Physics => "Physics",
            Course::SoftwareEngineering => "Software Engineering",
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Course {
    type Err = ValidationError;

    /// Exact match against the display names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Course::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownCourse(s.to_string()))
    }
}
