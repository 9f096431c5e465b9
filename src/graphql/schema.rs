use std::sync::{Arc, Mutex, PoisonError};

use async_graphql::{Context, EmptySubscription, Object, Schema};
use chrono::NaiveDate;

use crate::cache::{Synchronizer, format_age};
use crate::config::AppConfig;
use crate::error::{AsanaError, Result};
use crate::remote::RemoteService;
use crate::views::{self, ViewConfig};

use super::types::*;

pub type AsanaSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// A synchronizer over any remote, as shared by the server.
pub type DynSynchronizer = Synchronizer<Box<dyn RemoteService + Send>>;

pub struct AppState {
    pub sync: Mutex<DynSynchronizer>,
    pub views: Vec<ViewConfig>,
    pub initials: Option<String>,
}

impl AppState {
    pub fn new(sync: DynSynchronizer, config: &AppConfig) -> Self {
        Self {
            sync: Mutex::new(sync),
            views: config.views.clone(),
            initials: config.initials().map(str::to_string),
        }
    }
}

pub fn build_schema(state: AppState) -> AsanaSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(Arc::new(state))
        .finish()
}

fn state(ctx: &Context<'_>) -> async_graphql::Result<Arc<AppState>> {
    Ok(ctx.data::<Arc<AppState>>()?.clone())
}

/// Run `f` against the synchronizer on the blocking pool; Asana calls block.
async fn with_sync<T, F>(state: Arc<AppState>, f: F) -> async_graphql::Result<T>
where
    T: Send + 'static,
    F: FnOnce(&mut DynSynchronizer, &AppState) -> Result<T> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || {
        // Slots change only after a successful remote call
        let mut sync = state.sync.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *sync, &*state)
    })
    .await?;
    Ok(result?)
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Get a project, from cache when fresh
    async fn project(&self, ctx: &Context<'_>, id: String) -> async_graphql::Result<ProjectEntry> {
        let entry = with_sync(state(ctx)?, move |sync, _| sync.fetch(&id)).await?;
        Ok(entry.into())
    }

    /// Whether the cached copy of a project is old enough to warn about
    async fn stale_warning(&self, ctx: &Context<'_>, id: String) -> async_graphql::Result<bool> {
        with_sync(state(ctx)?, move |sync, _| Ok(sync.warn_if_stale(&id))).await
    }

    /// Age of the cached copy of a project, e.g. `42s`
    async fn data_age(
        &self,
        ctx: &Context<'_>,
        id: String,
    ) -> async_graphql::Result<Option<String>> {
        with_sync(state(ctx)?, move |sync, _| Ok(sync.age(&id).map(format_age))).await
    }

    /// Views available to the configured user
    async fn views(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<View>> {
        let state = state(ctx)?;
        Ok(views::visible_views(&state.views, state.initials.as_deref())
            .into_iter()
            .map(View::from)
            .collect())
    }

    /// Apply a view to a project's tasks
    async fn view(
        &self,
        ctx: &Context<'_>,
        project_id: String,
        key: String,
    ) -> async_graphql::Result<ViewResult> {
        with_sync(state(ctx)?, move |sync, state| {
            let view = views::find_view(&state.views, &key)
                .ok_or_else(|| AsanaError::Validation(format!("Unknown view: {}", key)))?;
            let entry = sync.fetch(&project_id)?;
            let selection = views::select(&entry.project.tasks, view, &state.views);
            Ok(ViewResult {
                key: view.key.clone(),
                heading: selection.heading(&view.title),
                held: selection.held,
                stale: entry.stale,
                tasks: selection.tasks.into_iter().map(Task::from).collect(),
            })
        })
        .await
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Mark a cached project stale so the next read refetches it
    async fn invalidate(
        &self,
        ctx: &Context<'_>,
        project_id: String,
    ) -> async_graphql::Result<bool> {
        with_sync(state(ctx)?, move |sync, _| Ok(sync.invalidate(&project_id))).await
    }

    /// Refetch a project from Asana
    async fn refresh(
        &self,
        ctx: &Context<'_>,
        project_id: String,
    ) -> async_graphql::Result<ProjectEntry> {
        let entry = with_sync(state(ctx)?, move |sync, _| sync.refresh(&project_id)).await?;
        Ok(entry.into())
    }

    /// Add a note below a task's separator line; returns the note as written
    async fn add_note(
        &self,
        ctx: &Context<'_>,
        task_id: String,
        text: String,
    ) -> async_graphql::Result<String> {
        let note = with_sync(state(ctx)?, move |sync, _| sync.add_note(&task_id, &text)).await?;
        Ok(note.text)
    }

    /// Put a task on hold until a date given as MM/DD/YY
    async fn add_hold(
        &self,
        ctx: &Context<'_>,
        task_id: String,
        until: String,
    ) -> async_graphql::Result<String> {
        let until = NaiveDate::parse_from_str(&until, "%m/%d/%y")
            .map_err(|e| AsanaError::Parse(format!("Invalid hold date '{}': {}", until, e)))?;
        let note = with_sync(state(ctx)?, move |sync, _| sync.add_hold(&task_id, until)).await?;
        Ok(note.text)
    }

    /// Tag a task with a color; false if it already had it
    async fn tag_color(
        &self,
        ctx: &Context<'_>,
        task_id: String,
        color: Color,
    ) -> async_graphql::Result<bool> {
        with_sync(state(ctx)?, move |sync, _| {
            sync.tag_color(&task_id, color.into())
        })
        .await
    }
}
