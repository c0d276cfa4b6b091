//! Database module: the `students` row model and the data-access layer.
//!
//! Layout:
//! - `models.rs`: Rust struct mirroring a `students` row
//! - `schema.rs`: DDL for the supported engines
//! - `store.rs`: the five statements behind `StudentStore`

pub mod models;
pub mod schema;
pub mod store;

pub use models::{Student, StudentId};
pub use store::{StudentStore, connect_store};
