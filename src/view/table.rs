use super::{Notice, RosterView};
use crate::db::{Student, StudentId};
use serde::Serialize;
use std::fmt;

type Confirmer = Box<dyn FnMut(&str) -> bool + Send>;

/// Transient copy of the `students` table as a front end displays it.
///
/// Never patched in place: every mutation goes through the store and is
/// followed by [`RosterView::reload`].
pub struct TableView {
    rows: Vec<Student>,
    selected: Vec<usize>,
    current: Option<usize>,
    notices: Vec<Notice>,
    confirm: Confirmer,
}

/// Owned copy of what the table shows, handed across the actor boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableSnapshot {
    pub rows: Vec<Student>,
    pub selected: Vec<usize>,
    pub current: Option<usize>,
    pub notices: Vec<Notice>,
}

impl TableSnapshot {
    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn selected_rows(&self) -> impl Iterator<Item = &Student> {
        self.selected.iter().filter_map(|&i| self.rows.get(i))
    }
}

impl TableView {
    /// `confirm` answers the delete prompt.
    pub fn new(confirm: impl FnMut(&str) -> bool + Send + 'static) -> Self {
        Self {
            rows: Vec::new(),
            selected: Vec::new(),
            current: None,
            notices: Vec::new(),
            confirm: Box::new(confirm),
        }
    }

    /// A view whose confirmation prompt always gets the same answer.
    pub fn answering(answer: bool) -> Self {
        Self::new(move |_| answer)
    }

    /// Make `index` the current row, as a click on one of its cells does.
    pub fn click(&mut self, index: usize) -> Option<&Student> {
        let student = self.rows.get(index)?;
        self.current = Some(index);
        Some(student)
    }

    /// Make the row holding `id` current. Returns `false` if it is not displayed.
    pub fn click_id(&mut self, id: StudentId) -> bool {
        match self.rows.iter().position(|s| s.id == id) {
            Some(index) => {
                self.current = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            rows: self.rows.clone(),
            selected: self.selected.clone(),
            current: self.current,
            notices: self.notices.clone(),
        }
    }
}

impl RosterView for TableView {
    fn reload(&mut self, rows: Vec<Student>) {
        self.rows = rows;
        self.selected.clear();
        self.current = None;
    }

    fn rows(&self) -> &[Student] {
        &self.rows
    }

    fn current(&self) -> Option<&Student> {
        self.current.and_then(|i| self.rows.get(i))
    }

    fn select_rows(&mut self, indexes: &[usize]) {
        self.selected = indexes
            .iter()
            .copied()
            .filter(|&i| i < self.rows.len())
            .collect();
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        (self.confirm)(prompt)
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

impl fmt::Debug for TableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableView")
            .field("rows", &self.rows)
            .field("selected", &self.selected)
            .field("current", &self.current)
            .field("notices", &self.notices)
            .finish_non_exhaustive()
    }
}
