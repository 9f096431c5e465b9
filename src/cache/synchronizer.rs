use super::entry::{CacheEntry, Origin, Slot};
use crate::config::AppConfig;
use crate::error::{AsanaError, Result};
use crate::model::{Color, Note, NoteList, Project, Task};
use crate::remote::RemoteService;
use crate::validation;
use chrono::{Local, NaiveDate, Utc};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    /// Age at which a cached project counts as stale.
    pub stale_after: Duration,

    /// Initials stamped on new notes and used for hold detection.
    pub initials: Option<String>,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            stale_after: Duration::from_secs(300),
            initials: None,
        }
    }
}

impl From<&AppConfig> for SyncSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            stale_after: config.cache.stale_after(),
            initials: config.initials().map(str::to_string),
        }
    }
}

/// Caches projects fetched from a [`RemoteService`] and keeps them in step
/// with the notes and tags written through it.
///
/// One synchronizer is created at startup and handed to the presentation
/// layer; it owns both the cache and the remote client.
pub struct Synchronizer<R> {
    remote: R,
    settings: SyncSettings,
    slots: HashMap<String, Slot>,
}

impl<R: RemoteService> Synchronizer<R> {
    pub fn new(remote: R, settings: SyncSettings) -> Self {
        Self {
            remote,
            settings,
            slots: HashMap::new(),
        }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Cached project if fresh, otherwise a fresh copy from the remote.
    ///
    /// When the remote is unreachable a cached copy is still returned,
    /// flagged stale. Without one the call fails with `RemoteUnavailable`.
    pub fn fetch(&mut self, project_id: &str) -> Result<CacheEntry> {
        validation::validate_id(project_id)?;

        if let Some(slot) = self.slots.get(project_id)
            && !slot.is_stale_at(Utc::now(), self.settings.stale_after)
        {
            tracing::debug!(project = %project_id, "Cache hit");
            return Ok(slot.entry(false, Origin::Cache));
        }

        self.pull(project_id)
    }

    /// Fetch from the remote regardless of cache age.
    pub fn refresh(&mut self, project_id: &str) -> Result<CacheEntry> {
        validation::validate_id(project_id)?;
        self.pull(project_id)
    }

    /// Mark a cached project stale. Returns whether it was cached.
    pub fn invalidate(&mut self, project_id: &str) -> bool {
        match self.slots.get_mut(project_id) {
            Some(slot) => {
                tracing::debug!(project = %project_id, "Invalidated cache entry");
                slot.invalidated = true;
                true
            }
            None => false,
        }
    }

    /// Whether the presentation layer should show a cache-age warning.
    pub fn warn_if_stale(&self, project_id: &str) -> bool {
        self.slots
            .get(project_id)
            .is_some_and(|slot| slot.is_stale_at(Utc::now(), self.settings.stale_after))
    }

    /// Time since the project was last synced, if cached.
    pub fn age(&self, project_id: &str) -> Option<Duration> {
        self.slots.get(project_id).map(|slot| slot.age_at(Utc::now()))
    }

    pub fn cached(&self, project_id: &str) -> Option<&Project> {
        self.slots.get(project_id).map(|slot| &slot.project)
    }

    pub fn project_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.slots.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Drop every cached project.
    pub fn clear(&mut self) {
        tracing::debug!(projects = self.slots.len(), "Clearing cache");
        self.slots.clear();
    }

    /// Insert a note into a cached task, directly below its separator line.
    ///
    /// The task's notes are re-read from the remote before writing so that
    /// edits made elsewhere since the last fetch are kept.
    pub fn add_note(&mut self, task_id: &str, text: &str) -> Result<Note> {
        let project_id = self.locate(task_id)?;
        validation::validate_note(text)?;

        let current = self.remote.fetch_task_notes(task_id)?;
        let mut notes = NoteList::parse(&current);
        let note = Note::compose(text, self.settings.initials.as_deref(), Local::now());
        notes.insert(note.clone());

        self.remote.update_task_notes(task_id, &notes.render())?;
        tracing::info!(project = %project_id, task = %task_id, note = %note.text, "Added note");

        let initials = self.settings.initials.clone();
        if let Some(task) = self.task_mut(&project_id, task_id) {
            task.notes = notes;
            task.classify(initials.as_deref(), today());
        }
        Ok(note)
    }

    /// Put a task on hold for the current user until `until`.
    pub fn add_hold(&mut self, task_id: &str, until: NaiveDate) -> Result<Note> {
        if until < today() {
            return Err(AsanaError::Validation(format!(
                "Hold date {} is in the past",
                until.format("%m/%d/%y")
            )));
        }
        self.add_note(task_id, &format!("hold {}", until.format("%m/%d/%y")))
    }

    /// Tag a task with `color`. Returns `false` if it already had the tag.
    pub fn tag_color(&mut self, task_id: &str, color: Color) -> Result<bool> {
        let project_id = self.locate(task_id)?;

        let already = self
            .task_mut(&project_id, task_id)
            .is_some_and(|task| task.colors.contains(&color));
        if already {
            return Ok(false);
        }

        self.remote.add_color_tag(task_id, color)?;
        tracing::info!(project = %project_id, task = %task_id, color = %color, "Tagged task");

        Ok(self
            .task_mut(&project_id, task_id)
            .is_some_and(|task| task.tag(color)))
    }

    fn pull(&mut self, project_id: &str) -> Result<CacheEntry> {
        match self.remote.fetch_project(project_id) {
            Ok(mut project) => {
                project.synced_at = Utc::now();
                let today = today();
                for task in &mut project.tasks {
                    task.classify(self.settings.initials.as_deref(), today);
                }

                let slot = Slot::new(project);
                let entry = slot.entry(false, Origin::Remote);
                self.slots.insert(project_id.to_string(), slot);
                Ok(entry)
            }
            Err(e) if e.is_unavailable() => match self.slots.get(project_id) {
                Some(slot) => {
                    tracing::warn!(
                        project = %project_id,
                        error = %e,
                        "Asana unreachable, serving stale cache"
                    );
                    Ok(slot.entry(true, Origin::Cache))
                }
                None => Err(e),
            },
            Err(e) => Err(e),
        }
    }

    /// Id of the cached project holding `task_id`.
    fn locate(&self, task_id: &str) -> Result<String> {
        validation::validate_id(task_id)?;
        self.slots
            .iter()
            .find(|(_, slot)| slot.project.task(task_id).is_some())
            .map(|(id, _)| id.clone())
            .ok_or_else(|| AsanaError::TaskNotFound(task_id.to_string()))
    }

    fn task_mut(&mut self, project_id: &str, task_id: &str) -> Option<&mut Task> {
        self.slots
            .get_mut(project_id)
            .and_then(|slot| slot.project.task_mut(task_id))
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
