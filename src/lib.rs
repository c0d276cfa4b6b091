pub mod config;
pub mod db;
pub mod error;
pub mod service;
pub mod types;
pub mod view;

pub use db::{Student, StudentId, StudentStore};
pub use error::{ErrorKind, RosterError, ValidationError};
pub use service::{Command, CommandId, RecordController};
pub use types::{Course, StudentFields};
pub use view::{RosterView, TableView};
