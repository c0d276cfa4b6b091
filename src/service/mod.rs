pub mod controller;
pub mod dispatch;
pub mod roster_actor;

pub use controller::{Outcome, RecordController, SearchOutcome};
pub use dispatch::{Command, CommandId, dispatch};
pub use roster_actor::RosterHandle;
