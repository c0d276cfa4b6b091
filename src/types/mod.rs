//! Domain types shared by the store, the controller and the view.

pub mod course;
pub mod fields;
pub mod text;

pub use course::Course;
pub use fields::StudentFields;
pub use text::title_case;
