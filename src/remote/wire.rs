//! Asana API response shapes, limited to the fields we request.

use crate::model::{Color, Task};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct Envelope<T> {
    pub data: T,

    #[serde(default)]
    pub next_page: Option<NextPage>,
}

#[derive(Debug, Deserialize)]
pub(super) struct NextPage {
    pub offset: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProjectData {
    pub gid: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct TaskData {
    pub gid: String,
    pub name: String,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub permalink_url: Option<String>,

    #[serde(default)]
    pub tags: Vec<TagData>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TagData {
    pub gid: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct NotesData {
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    pub errors: Vec<ErrorItem>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorItem {
    pub message: String,
}

impl TagData {
    pub fn palette_color(&self) -> Option<Color> {
        self.color.as_deref().and_then(Color::from_asana_name)
    }

    /// The workspace tag this tool uses for `color`: named after it and
    /// carrying its Asana color.
    pub fn is_palette_tag(&self, color: Color) -> bool {
        self.palette_color() == Some(color)
            && self
                .name
                .as_deref()
                .is_some_and(|name| name.trim().eq_ignore_ascii_case(&color.to_string()))
    }
}

impl From<TaskData> for Task {
    fn from(data: TaskData) -> Self {
        let colors: Vec<Color> = data.tags.iter().filter_map(TagData::palette_color).collect();
        let mut task = Task::new(data.gid, data.name)
            .with_colors(colors)
            .with_notes(data.notes.as_deref().unwrap_or_default());
        task.permalink_url = data.permalink_url;
        task.created_at = data.created_at;
        task
    }
}
