//! Named views over a project's tasks.
//!
//! A view picks tasks by color (and optionally by title date or a keyword in
//! the notes), hides the ones on hold, and reports how many were held back.

use crate::model::{Color, Task};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

static DATED_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}.\d{1,2}(.\d{1,4})?").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    /// All matching tasks at once, as links.
    List,
    /// One task at a time, with note and hold actions.
    Review,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::List => write!(f, "list"),
            ViewKind::Review => write!(f, "review"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub key: String,
    pub title: String,

    #[serde(default)]
    pub colors: Vec<Color>,

    #[serde(default = "default_kinds")]
    pub kinds: Vec<ViewKind>,

    /// Initials of users this view is tailored to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<String>,

    /// Only tasks whose title carries a date such as `3/14`.
    #[serde(default)]
    pub with_dates: bool,

    /// Only tasks whose notes mention this word.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_keyword: Option<String>,

    /// Everything not claimed by another view's colors.
    #[serde(default)]
    pub catch_all: bool,

    #[serde(default)]
    pub sort_by_creation: bool,
}

fn default_kinds() -> Vec<ViewKind> {
    vec![ViewKind::List]
}

impl ViewConfig {
    pub fn new(key: &str, title: &str, colors: &[Color]) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            colors: colors.to_vec(),
            kinds: default_kinds(),
            users: Vec::new(),
            with_dates: false,
            notes_keyword: None,
            catch_all: false,
            sort_by_creation: false,
        }
    }

    pub fn supports(&self, kind: ViewKind) -> bool {
        self.kinds.contains(&kind)
    }

    fn with_kinds(mut self, kinds: &[ViewKind]) -> Self {
        self.kinds = kinds.to_vec();
        self
    }

    fn with_users(mut self, users: &[&str]) -> Self {
        self.users = users.iter().map(|u| u.to_string()).collect();
        self
    }
}

/// The team's standard views.
pub fn default_views() -> Vec<ViewConfig> {
    use Color::*;
    use ViewKind::*;

    vec![
        ViewConfig::new("andrew", "Andrew", &[Blue])
            .with_kinds(&[List, Review])
            .with_users(&["AJP"]),
        ViewConfig::new("babynet", "BabyNet", &[Orange]),
        ViewConfig::new("barbara", "Barbara and New Referrals", &[Yellow]),
        ViewConfig {
            with_dates: true,
            ..ViewConfig::new("deadlines", "Deadlines", &[Purple, DarkPurple])
        },
        ViewConfig {
            notes_keyword: Some("IFSP".to_string()),
            ..ViewConfig::new("ifsp", "IFSP Purples", &[Purple, DarkPurple])
        },
        ViewConfig::new("insurance", "Insurance", &[HotPink, LightPink]),
        ViewConfig::new(
            "needs-scheduling",
            "Needs to Be Scheduled",
            &[Purple, DarkPurple],
        ),
        ViewConfig::new("questionnaires", "Questionnaires", &[LightBlue, Coral])
            .with_kinds(&[List, Review]),
        ViewConfig {
            catch_all: true,
            ..ViewConfig::new("other", "Other Projects", &[])
        },
    ]
}

/// Result of applying a view to a set of tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    pub tasks: Vec<&'a Task>,
    pub held: usize,
}

impl Selection<'_> {
    /// `Title (3)` or `Title (3) [2 on hold]`.
    pub fn heading(&self, title: &str) -> String {
        let mut heading = format!("{} ({})", title, self.tasks.len());
        if self.held > 0 {
            heading.push_str(&format!(" [{} on hold]", self.held));
        }
        heading
    }
}

/// The views shown to the user with `initials`.
///
/// A user named in any view's `users` list sees only those views.
pub fn visible_views<'a>(views: &'a [ViewConfig], initials: Option<&str>) -> Vec<&'a ViewConfig> {
    let Some(initials) = initials else {
        return views.iter().collect();
    };
    let listed = |v: &ViewConfig| v.users.iter().any(|u| u.eq_ignore_ascii_case(initials));

    if views.iter().any(listed) {
        views.iter().filter(|v| listed(v)).collect()
    } else {
        views.iter().collect()
    }
}

pub fn find_view<'a>(views: &'a [ViewConfig], key: &str) -> Option<&'a ViewConfig> {
    views.iter().find(|v| v.key == key)
}

/// Colors claimed by every non-catch-all view.
pub fn claimed_colors(views: &[ViewConfig]) -> BTreeSet<Color> {
    views
        .iter()
        .filter(|v| !v.catch_all)
        .flat_map(|v| v.colors.iter().copied())
        .collect()
}

pub fn mentions_keyword(notes: &str, keyword: &str) -> bool {
    let pattern = format!(r"(?i)\b{}\b", regex::escape(keyword));
    Regex::new(&pattern)
        .map(|re| re.is_match(notes))
        .unwrap_or(false)
}

/// Apply `view` to `tasks`. `all_views` decides what a catch-all view excludes.
pub fn select<'a>(tasks: &'a [Task], view: &ViewConfig, all_views: &[ViewConfig]) -> Selection<'a> {
    let held = tasks.iter().filter(|t| t.hold).count();
    let mut selected: Vec<&Task> = tasks.iter().filter(|t| !t.hold).collect();

    if view.catch_all {
        let claimed = claimed_colors(all_views);
        selected.retain(|t| t.colors.is_disjoint(&claimed));
    } else if !view.colors.is_empty() {
        selected.retain(|t| t.has_any_color(&view.colors));
    }

    if view.with_dates {
        selected.retain(|t| DATED_TITLE.is_match(&t.title));
    }

    if let Some(keyword) = &view.notes_keyword {
        selected.retain(|t| mentions_keyword(&t.notes.render(), keyword));
    }

    if view.sort_by_creation {
        selected.sort_by_key(|t| t.created_at);
    }

    Selection {
        tasks: selected,
        held,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn tasks() -> Vec<Task> {
        vec![
            Task::new("1", "Doe, Jane 3/14").with_colors([Color::Purple]),
            Task::new("2", "Roe, Rick")
                .with_colors([Color::DarkPurple])
                .with_notes("Needs IFSP review"),
            Task::new("3", "Poe, Pat").with_colors([Color::Orange]),
            Task::new("4", "Untagged"),
            Task::new("5", "Odd color").with_colors([Color::LightTeal]),
        ]
    }

    #[test]
    fn test_color_view_keeps_matching_tasks() {
        let views = default_views();
        let tasks = tasks();
        let view = find_view(&views, "needs-scheduling").unwrap();

        let selection = select(&tasks, view, &views);
        let ids: Vec<_> = selection.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(selection.held, 0);
    }

    #[test]
    fn test_held_tasks_are_counted_and_hidden() {
        let views = default_views();
        let mut tasks = tasks();
        tasks[0].hold = true;
        let view = find_view(&views, "needs-scheduling").unwrap();

        let selection = select(&tasks, view, &views);
        assert_eq!(selection.tasks.len(), 1);
        assert_eq!(selection.held, 1);
        assert_eq!(
            selection.heading("Needs to Be Scheduled"),
            "Needs to Be Scheduled (1) [1 on hold]"
        );
    }

    #[test]
    fn test_dated_view() {
        let views = default_views();
        let tasks = tasks();
        let selection = select(&tasks, find_view(&views, "deadlines").unwrap(), &views);
        let ids: Vec<_> = selection.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn test_keyword_view_matches_whole_word_case_insensitively() {
        let views = default_views();
        let tasks = tasks();
        let selection = select(&tasks, find_view(&views, "ifsp").unwrap(), &views);
        let ids: Vec<_> = selection.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);

        assert!(mentions_keyword("draft ifsp sent", "IFSP"));
        assert!(!mentions_keyword("IFSPS pending", "IFSP"));
    }

    #[test]
    fn test_catch_all_view_keeps_unclaimed_colors() {
        let views = default_views();
        let tasks = tasks();
        let selection = select(&tasks, find_view(&views, "other").unwrap(), &views);
        let ids: Vec<_> = selection.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "5"]);
    }

    #[test]
    fn test_sort_by_creation() {
        let mut view = ViewConfig::new("all", "All", &[]);
        view.sort_by_creation = true;
        let tasks = vec![
            Task::new("late", "b")
                .with_created_at(Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap()),
            Task::new("early", "a")
                .with_created_at(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
        ];

        let selection = select(&tasks, &view, std::slice::from_ref(&view));
        let ids: Vec<_> = selection.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
    }

    #[test]
    fn test_visible_views_for_listed_user() {
        let views = default_views();
        let visible = visible_views(&views, Some("ajp"));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].key, "andrew");
    }

    #[test]
    fn test_visible_views_for_other_users() {
        let views = default_views();
        assert_eq!(visible_views(&views, Some("ZZ")).len(), views.len());
        assert_eq!(visible_views(&views, None).len(), views.len());
    }

    #[test]
    fn test_review_support() {
        let views = default_views();
        assert!(find_view(&views, "questionnaires").unwrap().supports(ViewKind::Review));
        assert!(!find_view(&views, "babynet").unwrap().supports(ViewKind::Review));
    }
}
