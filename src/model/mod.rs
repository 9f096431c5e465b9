//! Data models for cached Asana data.
//!
//! - [`Project`]: a named collection of tasks, stamped with its sync time
//! - [`Task`]: a unit of work with color tags, notes and a hold flag
//! - [`NoteList`]: a task's notes, with separator-relative insertion
//! - [`Color`]: the team's color palette

mod color;
pub mod hold;
mod note;
mod project;

pub use color::Color;
pub use note::{Note, NoteLine, NoteList};
pub use project::{Project, Task};
