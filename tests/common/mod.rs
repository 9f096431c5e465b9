//! An in-process stand-in for the Asana REST API.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

pub const PROJECT_ID: &str = "100";
pub const WORKSPACE: &str = "ws1";
pub const TOKEN: &str = "secret-token";

#[derive(Debug, Clone)]
pub struct MockTask {
    pub gid: String,
    pub name: String,
    pub notes: String,
    pub tags: Vec<String>,
}

impl MockTask {
    pub fn new(gid: &str, name: &str, notes: &str) -> Self {
        Self {
            gid: gid.to_string(),
            name: name.to_string(),
            notes: notes.to_string(),
            tags: Vec::new(),
        }
    }

    pub fn tagged(mut self, tag_gid: &str) -> Self {
        self.tags.push(tag_gid.to_string());
        self
    }
}

#[derive(Debug, Clone)]
pub struct MockTag {
    pub gid: String,
    pub name: String,
    pub color: String,
}

#[derive(Default)]
pub struct MockAsana {
    pub tasks: Mutex<Vec<MockTask>>,
    pub tags: Mutex<Vec<MockTag>>,

    /// Remaining project reads to answer with 503.
    pub unavailable: AtomicUsize,

    /// `METHOD path` of every request received.
    pub requests: Mutex<Vec<String>>,

    pub bad_auth: AtomicUsize,
}

impl MockAsana {
    pub fn new(tasks: Vec<MockTask>, tags: Vec<MockTag>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
            tags: Mutex::new(tags),
            ..Default::default()
        }
    }

    pub fn count(&self, request: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.as_str() == request)
            .count()
    }

    pub fn notes(&self, gid: &str) -> String {
        self.task(gid).notes
    }

    pub fn task(&self, gid: &str) -> MockTask {
        self.tasks
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.gid == gid)
            .cloned()
            .unwrap()
    }

    fn record(&self, request: String, headers: &HeaderMap) {
        let expected = format!("Bearer {}", TOKEN);
        if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some(expected.as_str()) {
            self.bad_auth.fetch_add(1, Ordering::SeqCst);
        }
        self.requests.lock().unwrap().push(request);
    }

    fn task_json(&self, task: &MockTask) -> Value {
        let tags = self.tags.lock().unwrap();
        let tags: Vec<Value> = task
            .tags
            .iter()
            .filter_map(|gid| tags.iter().find(|t| &t.gid == gid))
            .map(|t| json!({ "gid": t.gid, "color": t.color }))
            .collect();
        json!({
            "gid": task.gid,
            "name": task.name,
            "notes": task.notes,
            "created_at": "2026-01-05T14:00:00.000Z",
            "permalink_url": format!("https://app.asana.com/0/{}/{}", PROJECT_ID, task.gid),
            "tags": tags,
        })
    }
}

type Shared = State<Arc<MockAsana>>;

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "errors": [{ "message": format!("{}: Unknown object", what) }] })),
    )
        .into_response()
}

async fn get_project(State(mock): Shared, Path(id): Path<String>, headers: HeaderMap) -> Response {
    mock.record(format!("GET /projects/{}", id), &headers);

    let pending = mock.unavailable.load(Ordering::SeqCst);
    if pending > 0 {
        mock.unavailable.store(pending - 1, Ordering::SeqCst);
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    if id != PROJECT_ID {
        return not_found("project");
    }
    Json(json!({ "data": { "gid": id, "name": "Caseload" } })).into_response()
}

/// One task per page, so every listing exercises pagination.
async fn get_project_tasks(
    State(mock): Shared,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    mock.record(format!("GET /projects/{}/tasks", id), &headers);

    let index: usize = query.get("offset").and_then(|o| o.parse().ok()).unwrap_or(0);
    let tasks = mock.tasks.lock().unwrap().clone();
    let page: Vec<Value> = tasks.get(index).map(|t| mock.task_json(t)).into_iter().collect();
    let next_page = if index + 1 < tasks.len() {
        json!({ "offset": (index + 1).to_string() })
    } else {
        Value::Null
    };
    Json(json!({ "data": page, "next_page": next_page })).into_response()
}

async fn get_task(State(mock): Shared, Path(id): Path<String>, headers: HeaderMap) -> Response {
    mock.record(format!("GET /tasks/{}", id), &headers);

    let tasks = mock.tasks.lock().unwrap();
    match tasks.iter().find(|t| t.gid == id) {
        Some(task) => {
            Json(json!({ "data": { "gid": task.gid, "notes": task.notes } })).into_response()
        }
        None => not_found("task"),
    }
}

async fn put_task(
    State(mock): Shared,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    mock.record(format!("PUT /tasks/{}", id), &headers);

    let mut tasks = mock.tasks.lock().unwrap();
    let Some(task) = tasks.iter_mut().find(|t| t.gid == id) else {
        return not_found("task");
    };
    if let Some(notes) = body["data"]["notes"].as_str() {
        task.notes = notes.to_string();
    }
    Json(json!({ "data": { "gid": task.gid, "notes": task.notes } })).into_response()
}

async fn add_tag(
    State(mock): Shared,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    mock.record(format!("POST /tasks/{}/addTag", id), &headers);

    let Some(tag) = body["data"]["tag"].as_str() else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let mut tasks = mock.tasks.lock().unwrap();
    let Some(task) = tasks.iter_mut().find(|t| t.gid == id) else {
        return not_found("task");
    };
    if !task.tags.iter().any(|t| t == tag) {
        task.tags.push(tag.to_string());
    }
    Json(json!({ "data": {} })).into_response()
}

async fn list_tags(State(mock): Shared, Path(ws): Path<String>, headers: HeaderMap) -> Response {
    mock.record(format!("GET /workspaces/{}/tags", ws), &headers);

    let tags: Vec<Value> = mock
        .tags
        .lock()
        .unwrap()
        .iter()
        .map(|t| json!({ "gid": t.gid, "name": t.name, "color": t.color }))
        .collect();
    Json(json!({ "data": tags, "next_page": null })).into_response()
}

async fn create_tag(
    State(mock): Shared,
    Path(ws): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    mock.record(format!("POST /workspaces/{}/tags", ws), &headers);

    let mut tags = mock.tags.lock().unwrap();
    let tag = MockTag {
        gid: format!("t{}", tags.len() + 1),
        name: body["data"]["name"].as_str().unwrap_or_default().to_string(),
        color: body["data"]["color"].as_str().unwrap_or_default().to_string(),
    };
    let data = json!({ "gid": tag.gid, "name": tag.name, "color": tag.color });
    tags.push(tag);
    (StatusCode::CREATED, Json(json!({ "data": data }))).into_response()
}

/// Serve `mock` on an ephemeral localhost port; returns the base URL.
pub fn serve(mock: Arc<MockAsana>) -> String {
    let app = Router::new()
        .route("/projects/{id}", get(get_project))
        .route("/projects/{id}/tasks", get(get_project_tasks))
        .route("/tasks/{id}", get(get_task).put(put_task))
        .route("/tasks/{id}/addTag", post(add_tag))
        .route("/workspaces/{ws}/tags", get(list_tags).post(create_tag))
        .with_state(mock);

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });

    format!("http://{}", addr)
}

/// A small caseload: one task carries the hot-pink tag.
pub fn caseload() -> Arc<MockAsana> {
    Arc::new(MockAsana::new(
        vec![
            MockTask::new("1", "Doe, Jane", "Intake done\n\n01/05 first call ///AB").tagged("t1"),
            MockTask::new("2", "Roe, Rick", ""),
            MockTask::new("3", "Poe, Pat 3/14", "Evaluation"),
        ],
        vec![MockTag {
            gid: "t1".to_string(),
            name: "hot-pink".to_string(),
            color: "dark-pink".to_string(),
        }],
    ))
}
