use crate::model::Project;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Where the data in a [`CacheEntry`] came from on this call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Cache,
    Remote,
}

/// A project as handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheEntry {
    pub project: Project,

    /// The data is older than the staleness threshold or was invalidated.
    pub stale: bool,

    pub origin: Origin,
}

/// What the synchronizer keeps per project.
#[derive(Debug, Clone)]
pub(super) struct Slot {
    pub project: Project,
    pub invalidated: bool,
}

impl Slot {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            invalidated: false,
        }
    }

    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        (now - self.project.synced_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    pub fn is_stale_at(&self, now: DateTime<Utc>, stale_after: Duration) -> bool {
        self.invalidated || self.age_at(now) >= stale_after
    }

    pub fn entry(&self, stale: bool, origin: Origin) -> CacheEntry {
        CacheEntry {
            project: self.project.clone(),
            stale,
            origin,
        }
    }
}

/// Compact data age: `42s`, `5m`, `2h`.
pub fn format_age(age: Duration) -> String {
    let secs = age.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else {
        format!("{}h", secs / 3600)
    }
}
