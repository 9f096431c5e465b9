use super::RemoteService;
use super::wire::{Envelope, ErrorBody, NotesData, ProjectData, TagData, TaskData};
use crate::config::{AsanaSettings, Credentials, RemoteSettings};
use crate::error::{AsanaError, Result};
use crate::model::{Color, Project, Task};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use url::Url;

const PAGE_LIMIT: &str = "100";
const TASK_FIELDS: &str = "name,notes,created_at,permalink_url,tags.name,tags.color";

/// Blocking client for the Asana REST API.
pub struct AsanaClient {
    http: Client,
    base_url: String,
    token: String,
    workspace: String,
    max_attempts: u32,
    retry_delay: Duration,
}

impl AsanaClient {
    pub fn new(
        credentials: &Credentials,
        asana: &AsanaSettings,
        remote: &RemoteSettings,
    ) -> Result<Self> {
        // Fails harmlessly when a provider is already installed
        let _ = rustls::crypto::ring::default_provider().install_default();

        let http = Client::builder()
            .timeout(remote.timeout())
            .user_agent(concat!("asana-tool/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AsanaError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: asana.base_url.trim_end_matches('/').to_string(),
            token: credentials.token.clone(),
            workspace: credentials.workspace.clone(),
            max_attempts: remote.max_retries.max(1),
            retry_delay: remote.retry_delay(),
        })
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, path))
            .map_err(|e| AsanaError::Config(format!("Invalid Asana base URL: {}", e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Send a request, retrying 503 responses with exponential backoff.
    fn execute(&self, build: impl Fn(&Client) -> RequestBuilder) -> Result<Response> {
        let mut delay = self.retry_delay;
        let mut attempt = 1;

        loop {
            let response = build(&self.http)
                .bearer_auth(&self.token)
                .send()
                .map_err(|e| AsanaError::RemoteUnavailable(e.to_string()))?;

            let status = response.status();
            if status == StatusCode::SERVICE_UNAVAILABLE && attempt < self.max_attempts {
                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Asana returned 503, retrying"
                );
                std::thread::sleep(delay);
                delay *= 2;
                attempt += 1;
                continue;
            }

            if status.is_server_error() {
                return Err(AsanaError::RemoteUnavailable(format!(
                    "Asana returned {}",
                    status
                )));
            }
            if !status.is_success() {
                return Err(AsanaError::Remote {
                    status: status.as_u16(),
                    message: error_message(response),
                });
            }
            return Ok(response);
        }
    }

    fn get<T: DeserializeOwned>(&self, url: Url) -> Result<Envelope<T>> {
        tracing::debug!(url = %url, "GET");
        let response = self.execute(|http| http.get(url.clone()))?;
        response
            .json()
            .map_err(|e| AsanaError::Parse(format!("Unexpected Asana response: {}", e)))
    }

    /// Follow `next_page.offset` until the listing is exhausted.
    fn get_all<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut url = self.endpoint(path, query)?;
            if let Some(offset) = &offset {
                url.query_pairs_mut().append_pair("offset", offset);
            }

            let page: Envelope<Vec<T>> = self.get(url)?;
            items.extend(page.data);

            match page.next_page {
                Some(next) => offset = Some(next.offset),
                None => return Ok(items),
            }
        }
    }

    fn find_or_create_color_tag(&self, color: Color) -> Result<String> {
        let path = format!("workspaces/{}/tags", self.workspace);
        let tags: Vec<TagData> =
            self.get_all(&path, &[("opt_fields", "name,color"), ("limit", PAGE_LIMIT)])?;

        if let Some(tag) = tags.into_iter().find(|t| t.is_palette_tag(color)) {
            return Ok(tag.gid);
        }

        tracing::info!(color = %color, "Creating color tag");
        let url = self.endpoint(&path, &[])?;
        let body = json!({ "data": { "name": color.to_string(), "color": color.asana_name() } });
        let response = self.execute(|http| http.post(url.clone()).json(&body))?;
        let created: Envelope<TagData> = response
            .json()
            .map_err(|e| AsanaError::Parse(format!("Unexpected Asana response: {}", e)))?;
        Ok(created.data.gid)
    }
}

impl RemoteService for AsanaClient {
    fn fetch_project(&self, project_id: &str) -> Result<Project> {
        tracing::info!(project = %project_id, "Fetching project from Asana");

        let url = self.endpoint(&format!("projects/{}", project_id), &[("opt_fields", "name")])?;
        let project: Envelope<ProjectData> = self.get(url).map_err(|e| match e {
            AsanaError::Remote { status: 404, .. } => {
                AsanaError::ProjectNotFound(project_id.to_string())
            }
            other => other,
        })?;

        let tasks: Vec<TaskData> = self.get_all(
            &format!("projects/{}/tasks", project_id),
            &[("opt_fields", TASK_FIELDS), ("limit", PAGE_LIMIT)],
        )?;
        let tasks: Vec<Task> = tasks.into_iter().map(Task::from).collect();
        tracing::info!(project = %project_id, tasks = tasks.len(), "Fetched project");

        Ok(Project::new(project.data.gid, project.data.name).with_tasks(tasks))
    }

    fn fetch_task_notes(&self, task_id: &str) -> Result<String> {
        let url = self.endpoint(&format!("tasks/{}", task_id), &[("opt_fields", "notes")])?;
        let task: Envelope<NotesData> = self.get(url)?;
        Ok(task.data.notes.unwrap_or_default())
    }

    fn update_task_notes(&self, task_id: &str, notes: &str) -> Result<()> {
        tracing::info!(task = %task_id, "Updating task notes");
        let url = self.endpoint(&format!("tasks/{}", task_id), &[("opt_fields", "notes")])?;
        let body = json!({ "data": { "notes": notes } });
        self.execute(|http| http.put(url.clone()).json(&body))?;
        Ok(())
    }

    fn add_color_tag(&self, task_id: &str, color: Color) -> Result<()> {
        let tag = self.find_or_create_color_tag(color)?;
        tracing::info!(task = %task_id, color = %color, tag = %tag, "Tagging task");
        let url = self.endpoint(&format!("tasks/{}/addTag", task_id), &[])?;
        let body = json!({ "data": { "tag": tag } });
        self.execute(|http| http.post(url.clone()).json(&body))?;
        Ok(())
    }
}

fn error_message(response: Response) -> String {
    let status = response.status();
    response
        .text()
        .ok()
        .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
        .and_then(|body| body.errors.into_iter().next())
        .map(|error| error.message)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string())
}
