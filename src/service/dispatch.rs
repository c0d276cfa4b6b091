//! Command table between a front end and [`RecordController`].
//!
//! Front ends build a [`Command`] from a menu entry, toolbar button or CLI
//! subcommand and hand it to [`dispatch`]; they never call the store.

use crate::db::StudentId;
use crate::error::{RosterError, ValidationError};
use crate::service::controller::{Outcome, RecordController};
use crate::types::StudentFields;
use crate::view::{Notice, RosterView};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Identifiers of the user-triggerable commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    Reload,
    Add,
    Search,
    Edit,
    Delete,
}

impl CommandId {
    pub const ALL: [CommandId; 5] = [
        CommandId::Reload,
        CommandId::Add,
        CommandId::Search,
        CommandId::Edit,
        CommandId::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandId::Reload => "reload",
            CommandId::Add => "add",
            CommandId::Search => "search",
            CommandId::Edit => "edit",
            CommandId::Delete => "delete",
        }
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandId {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommandId::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownCommand(s.to_string()).into())
    }
}

/// A command with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reload,
    Add(StudentFields),
    Search(String),
    /// Edit the row the user last clicked.
    EditSelected(StudentFields),
    /// Delete the row the user last clicked.
    DeleteSelected,
    Edit { id: StudentId, fields: StudentFields },
    Delete { id: StudentId },
}

impl Command {
    pub fn id(&self) -> CommandId {
        match self {
            Command::Reload => CommandId::Reload,
            Command::Add(_) => CommandId::Add,
            Command::Search(_) => CommandId::Search,
            Command::EditSelected(_) | Command::Edit { .. } => CommandId::Edit,
            Command::DeleteSelected | Command::Delete { .. } => CommandId::Delete,
        }
    }
}

fn current_id<V: RosterView>(view: &V) -> Result<StudentId, RosterError> {
    view.current()
        .map(|s| s.id)
        .ok_or(RosterError::Validation(ValidationError::NoSelection))
}

/// Run `command` against `view`. Failures are also shown to the user as an
/// error notice before being returned.
pub async fn dispatch<V: RosterView>(
    controller: &RecordController,
    view: &mut V,
    command: Command,
) -> Result<Outcome, RosterError> {
    let command_id = command.id();
    let result = match command {
        Command::Reload => controller.reload(view).await,
        Command::Add(fields) => controller.add(view, fields).await,
        Command::Search(name) => controller.search(view, &name).await,
        Command::EditSelected(fields) => match current_id(view) {
            Ok(id) => controller.edit(view, id, fields).await,
            Err(e) => Err(e),
        },
        Command::DeleteSelected => match current_id(view) {
            Ok(id) => controller.remove(view, id).await,
            Err(e) => Err(e),
        },
        Command::Edit { id, fields } => controller.edit(view, id, fields).await,
        Command::Delete { id } => controller.remove(view, id).await,
    };

    if let Err(e) = &result {
        warn!(command = %command_id, kind = ?e.kind(), error = %e, "command failed");
        view.notify(Notice::error(e.to_string()));
    }
    result
}
