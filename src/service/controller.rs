use crate::db::{Student, StudentId, StudentStore};
use crate::error::RosterError;
use crate::types::{StudentFields, title_case};
use crate::view::{Notice, RosterView};
use serde::Serialize;
use tracing::{debug, info};

pub const DELETE_PROMPT: &str = "Are you sure?";
pub const DELETE_SUCCESS: &str = "Record successfully deleted.";

/// Result of one controller action, for front ends that want more than the
/// refreshed view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Reloaded { rows: usize },
    Added { id: Option<StudentId> },
    Edited { id: StudentId, affected: u64 },
    Removed { id: StudentId, affected: u64 },
    Cancelled,
    Searched(SearchOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    /// The query after title-casing.
    pub query: String,
    /// Rows the store returned for `query`.
    pub matches: Vec<Student>,
    /// Indexes of displayed rows whose name equals `query`.
    pub highlighted: Vec<usize>,
}

/// Turns front-end actions into store calls followed by a full view reload.
#[derive(Clone)]
pub struct RecordController {
    store: StudentStore,
}

impl RecordController {
    pub fn new(store: StudentStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &StudentStore {
        &self.store
    }

    /// Rebuild the view from the store.
    pub async fn reload<V: RosterView>(&self, view: &mut V) -> Result<Outcome, RosterError> {
        let rows = self.store.list_all().await?;
        let count = rows.len();
        view.reload(rows);
        debug!(rows = count, "view reloaded");
        Ok(Outcome::Reloaded { rows: count })
    }

    pub async fn add<V: RosterView>(
        &self,
        view: &mut V,
        fields: StudentFields,
    ) -> Result<Outcome, RosterError> {
        fields.validate()?;
        let id = self.store.insert(&fields).await?;
        info!(id = ?id, name = %fields.name, course = %fields.course, "student added");
        self.reload(view).await?;
        Ok(Outcome::Added { id })
    }

    pub async fn edit<V: RosterView>(
        &self,
        view: &mut V,
        id: StudentId,
        fields: StudentFields,
    ) -> Result<Outcome, RosterError> {
        fields.validate()?;
        let affected = self.store.update(id, &fields).await?;
        info!(id, affected, "student updated");
        self.reload(view).await?;
        Ok(Outcome::Edited { id, affected })
    }

    /// Delete after the view confirms. A declined prompt never reaches the store.
    pub async fn remove<V: RosterView>(
        &self,
        view: &mut V,
        id: StudentId,
    ) -> Result<Outcome, RosterError> {
        if !view.confirm(DELETE_PROMPT) {
            debug!(id, "delete declined");
            return Ok(Outcome::Cancelled);
        }
        let affected = self.store.delete(id).await?;
        info!(id, affected, "student deleted");
        self.reload(view).await?;
        view.notify(Notice::success(DELETE_SUCCESS));
        Ok(Outcome::Removed { id, affected })
    }

    /// Exact-name search over the title-cased query. Highlights matching rows
    /// of the current view without reloading it, so a stale view can miss
    /// rows the store returned.
    pub async fn search<V: RosterView>(
        &self,
        view: &mut V,
        name: &str,
    ) -> Result<Outcome, RosterError> {
        let query = title_case(name);
        let matches = self.store.find_by_name(&query).await?;

        let highlighted: Vec<usize> = view
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, s)| s.name == query)
            .map(|(i, _)| i)
            .collect();
        view.select_rows(&highlighted);

        debug!(
            query = %query,
            matches = matches.len(),
            highlighted = highlighted.len(),
            "search finished"
        );
        Ok(Outcome::Searched(SearchOutcome {
            query,
            matches,
            highlighted,
        }))
    }
}
