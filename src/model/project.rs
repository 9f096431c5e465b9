use super::color::Color;
use super::hold;
use super::note::NoteList;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub colors: BTreeSet<Color>,

    #[serde(default)]
    pub notes: NoteList,

    #[serde(default)]
    pub hold: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            colors: BTreeSet::new(),
            notes: NoteList::default(),
            hold: false,
            permalink_url: None,
            created_at: None,
        }
    }

    pub fn with_colors(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.colors.extend(colors);
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = NoteList::parse(notes);
        self
    }

    pub fn with_permalink(mut self, url: impl Into<String>) -> Self {
        self.permalink_url = Some(url.into());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Add a color tag. Returns `false` if the task already carried it.
    pub fn tag(&mut self, color: Color) -> bool {
        self.colors.insert(color)
    }

    pub fn has_any_color(&self, colors: &[Color]) -> bool {
        colors.iter().any(|c| self.colors.contains(c))
    }

    /// Recompute the hold flag for the user with `initials`.
    pub fn classify(&mut self, initials: Option<&str>, today: NaiveDate) {
        self.hold = hold::is_on_hold(&self.notes.render(), initials, today);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub tasks: Vec<Task>,

    pub synced_at: DateTime<Utc>,
}

impl Project {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tasks: Vec::new(),
            synced_at: Utc::now(),
        }
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn held_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.hold).count()
    }
}
