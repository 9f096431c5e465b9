use crate::cache::{self, format_age};
use crate::model::{self, Task as ModelTask};
use crate::views::{self, ViewConfig};
use async_graphql::{Enum, SimpleObject};

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum Color {
    Purple,
    DarkPurple,
    Yellow,
    Orange,
    Blue,
    LightBlue,
    LightTeal,
    Coral,
    HotPink,
    LightPink,
}

impl From<model::Color> for Color {
    fn from(c: model::Color) -> Self {
        match c {
            model::Color::Purple => Color::Purple,
            model::Color::DarkPurple => Color::DarkPurple,
            model::Color::Yellow => Color::Yellow,
            model::Color::Orange => Color::Orange,
            model::Color::Blue => Color::Blue,
            model::Color::LightBlue => Color::LightBlue,
            model::Color::LightTeal => Color::LightTeal,
            model::Color::Coral => Color::Coral,
            model::Color::HotPink => Color::HotPink,
            model::Color::LightPink => Color::LightPink,
        }
    }
}

impl From<Color> for model::Color {
    fn from(c: Color) -> Self {
        match c {
            Color::Purple => model::Color::Purple,
            Color::DarkPurple => model::Color::DarkPurple,
            Color::Yellow => model::Color::Yellow,
            Color::Orange => model::Color::Orange,
            Color::Blue => model::Color::Blue,
            Color::LightBlue => model::Color::LightBlue,
            Color::LightTeal => model::Color::LightTeal,
            Color::Coral => model::Color::Coral,
            Color::HotPink => model::Color::HotPink,
            Color::LightPink => model::Color::LightPink,
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum Origin {
    Cache,
    Remote,
}

impl From<cache::Origin> for Origin {
    fn from(o: cache::Origin) -> Self {
        match o {
            cache::Origin::Cache => Origin::Cache,
            cache::Origin::Remote => Origin::Remote,
        }
    }
}

#[derive(SimpleObject)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub colors: Vec<Color>,
    pub notes: String,
    pub hold: bool,
    pub permalink_url: Option<String>,
    pub created_at: Option<String>,
}

impl From<&ModelTask> for Task {
    fn from(t: &ModelTask) -> Self {
        Self {
            id: t.id.clone(),
            title: t.title.clone(),
            colors: t.colors.iter().map(|&c| c.into()).collect(),
            notes: t.notes.render(),
            hold: t.hold,
            permalink_url: t.permalink_url.clone(),
            created_at: t.created_at.map(|d| d.to_rfc3339()),
        }
    }
}

#[derive(SimpleObject)]
pub struct ProjectEntry {
    pub id: String,
    pub name: String,
    pub tasks: Vec<Task>,
    pub synced_at: String,
    /// Human-readable data age, e.g. `42s` or `5m`.
    pub data_age: String,
    pub stale: bool,
    pub origin: Origin,
}

impl From<cache::CacheEntry> for ProjectEntry {
    fn from(entry: cache::CacheEntry) -> Self {
        let age = (chrono::Utc::now() - entry.project.synced_at)
            .to_std()
            .unwrap_or_default();
        Self {
            id: entry.project.id,
            name: entry.project.name,
            tasks: entry.project.tasks.iter().map(Task::from).collect(),
            synced_at: entry.project.synced_at.to_rfc3339(),
            data_age: format_age(age),
            stale: entry.stale,
            origin: entry.origin.into(),
        }
    }
}

#[derive(SimpleObject)]
pub struct View {
    pub key: String,
    pub title: String,
    pub colors: Vec<Color>,
    pub list: bool,
    pub review: bool,
    pub catch_all: bool,
}

impl From<&ViewConfig> for View {
    fn from(v: &ViewConfig) -> Self {
        Self {
            key: v.key.clone(),
            title: v.title.clone(),
            colors: v.colors.iter().map(|&c| c.into()).collect(),
            list: v.supports(views::ViewKind::List),
            review: v.supports(views::ViewKind::Review),
            catch_all: v.catch_all,
        }
    }
}

#[derive(SimpleObject)]
pub struct ViewResult {
    pub key: String,
    /// `Title (n)` with a held-back count when any tasks are on hold.
    pub heading: String,
    pub held: usize,
    pub stale: bool,
    pub tasks: Vec<Task>,
}
