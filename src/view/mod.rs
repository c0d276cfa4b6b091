//! Presentation boundary.
//!
//! The controller never owns a window. Each action is handed the view it must
//! refresh through [`RosterView`]; [`TableView`] is the in-memory table cache
//! a front end renders from.

pub mod table;

pub use table::{TableSnapshot, TableView};

use crate::db::Student;
use serde::Serialize;

/// Column headers of the roster table.
pub const COLUMNS: [&str; 4] = ["Id", "Name", "Course", "Mobile"];

pub const ABOUT_TEXT: &str = "Student management application.\n\
     Lists, adds, edits, deletes and searches student records stored in a relational database.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A blocking message box in a graphical front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: "Success".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}

/// What a front end must offer the controller.
pub trait RosterView {
    /// Throw away every displayed row and show `rows` instead.
    fn reload(&mut self, rows: Vec<Student>);

    /// Rows currently displayed, in display order.
    fn rows(&self) -> &[Student];

    /// The row the user last clicked, if it is still displayed.
    fn current(&self) -> Option<&Student>;

    /// Replace the highlighted selection with the given row indexes.
    fn select_rows(&mut self, indexes: &[usize]);

    /// Ask a yes/no question; `true` means yes.
    fn confirm(&mut self, prompt: &str) -> bool;

    fn notify(&mut self, notice: Notice);
}
