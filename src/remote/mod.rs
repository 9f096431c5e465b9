//! The remote task-management service.
//!
//! [`RemoteService`] is the seam between the cache and Asana. The
//! [`AsanaClient`] implementation talks to the Asana REST API; tests inject
//! their own implementations.

mod asana;
mod wire;

pub use asana::AsanaClient;

use crate::error::Result;
use crate::model::{Color, Project};

pub trait RemoteService {
    /// Fetch a project with all of its tasks.
    ///
    /// Hold flags are left unset; the caller classifies tasks.
    fn fetch_project(&self, project_id: &str) -> Result<Project>;

    /// Current notes text of a task, read fresh from the service.
    fn fetch_task_notes(&self, task_id: &str) -> Result<String>;

    /// Replace a task's notes text.
    fn update_task_notes(&self, task_id: &str, notes: &str) -> Result<()>;

    /// Tag a task with a palette color.
    fn add_color_tag(&self, task_id: &str, color: Color) -> Result<()>;
}

impl<R: RemoteService + ?Sized> RemoteService for Box<R> {
    fn fetch_project(&self, project_id: &str) -> Result<Project> {
        (**self).fetch_project(project_id)
    }

    fn fetch_task_notes(&self, task_id: &str) -> Result<String> {
        (**self).fetch_task_notes(task_id)
    }

    fn update_task_notes(&self, task_id: &str, notes: &str) -> Result<()> {
        (**self).update_task_notes(task_id, notes)
    }

    fn add_color_tag(&self, task_id: &str, color: Color) -> Result<()> {
        (**self).add_color_tag(task_id, color)
    }
}
