//! In-process backend speaking the task API, for exercising the real client.

#![allow(dead_code)]

use std::net::{SocketAddr, TcpListener};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::thread;

use axum::extract::{Path, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use task_manager_rs::auth::Credentials;
use task_manager_rs::task::{Task, TaskDraft, TaskPatch, TaskStatus};

pub const EMAIL: &str = "aman@example.com";
pub const PASSWORD: &str = "Secret1!";
pub const USER_NAME: &str = "Aman";
const SESSION: &str = "token=stub-session";

#[derive(Default)]
pub struct StubState {
    tasks: RwLock<Vec<Task>>,
    counter: AtomicUsize,
    pub list_calls: AtomicUsize,
    /// Answer updates with only `_id` and `status`, and deletes with an
    /// empty 204.
    pub terse_replies: AtomicBool,
    pub broken_entry: AtomicBool,
}

impl StubState {
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.read().map(|t| t.clone()).unwrap_or_default()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn next_id(&self) -> String {
        let count = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("task_{}", count)
    }
}

pub struct StubBackend {
    pub addr: SocketAddr,
    pub base_url: String,
    pub state: Arc<StubState>,
}

/// Starts the backend on an ephemeral port with its own runtime thread.
pub fn spawn() -> StubBackend {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
    listener.set_nonblocking(true).expect("nonblocking listener");
    let addr = listener.local_addr().expect("local addr");
    let state = Arc::new(StubState::default());
    let app = router(state.clone());

    thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
        runtime.block_on(async move {
            axum::Server::from_tcp(listener)
                .expect("stub server")
                .serve(app.into_make_service())
                .await
                .expect("stub server stopped");
        });
    });

    StubBackend {
        addr,
        base_url: format!("http://{}/api", addr),
        state,
    }
}

/// Address nothing listens on.
pub fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}/api", addr)
}

fn router(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/api/auth/login", post(handle_login))
        .route("/api/auth/logout", post(handle_logout))
        .route("/api/auth/verify", get(handle_verify))
        .route("/api/tasks", get(handle_list).post(handle_create))
        .route("/api/tasks/:id", put(handle_update).delete(handle_delete))
        .with_state(state)
}

fn authed(headers: &HeaderMap) -> bool {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .any(|pair| pair.trim() == SESSION)
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn unauthorized() -> Response {
    reply(
        StatusCode::UNAUTHORIZED,
        json!({"success": false, "message": "Not authorized, no token"}),
    )
}

fn not_found() -> Response {
    reply(
        StatusCode::NOT_FOUND,
        json!({"success": false, "message": "Task not found"}),
    )
}

async fn handle_login(Json(body): Json<Credentials>) -> Response {
    if body.email == EMAIL && body.password == PASSWORD {
        (
            StatusCode::OK,
            [(SET_COOKIE, format!("{}; Path=/; HttpOnly", SESSION))],
            Json(json!({"success": true, "message": "Login successful"})),
        )
            .into_response()
    } else {
        reply(
            StatusCode::UNAUTHORIZED,
            json!({"success": false, "message": "Invalid credentials"}),
        )
    }
}

async fn handle_logout() -> Response {
    (
        StatusCode::OK,
        [(SET_COOKIE, "token=; Path=/; Max-Age=0".to_string())],
        Json(json!({"success": true, "message": "Logged out"})),
    )
        .into_response()
}

async fn handle_verify(headers: HeaderMap) -> Response {
    if !authed(&headers) {
        return unauthorized();
    }
    reply(
        StatusCode::OK,
        json!({"success": true, "user": {"_id": "u1", "name": USER_NAME, "email": EMAIL}}),
    )
}

async fn handle_list(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    if !authed(&headers) {
        return unauthorized();
    }
    state.list_calls.fetch_add(1, Ordering::SeqCst);
    let mut tasks: Vec<Value> = state
        .tasks()
        .into_iter()
        .filter_map(|task| serde_json::to_value(task).ok())
        .collect();
    if state.broken_entry.load(Ordering::SeqCst) {
        tasks.push(json!({"_id": "broken", "title": "no body or dates"}));
    }
    reply(StatusCode::OK, json!({"success": true, "tasks": tasks}))
}

async fn handle_create(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(draft): Json<TaskDraft>,
) -> Response {
    if !authed(&headers) {
        return unauthorized();
    }
    if draft.title.trim().is_empty() || draft.content.trim().is_empty() {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({"success": false, "message": "Title and content are required"}),
        );
    }
    let now = Utc::now();
    let task = Task {
        id: state.next_id(),
        title: draft.title,
        content: draft.content,
        status: TaskStatus::Pending,
        created_at: now,
        updated_at: now,
    };
    if let Ok(mut tasks) = state.tasks.write() {
        tasks.insert(0, task.clone());
    }
    reply(StatusCode::CREATED, json!({"success": true, "task": task}))
}

async fn handle_update(
    State(state): State<Arc<StubState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(patch): Json<TaskPatch>,
) -> Response {
    if !authed(&headers) {
        return unauthorized();
    }
    let Ok(mut tasks) = state.tasks.write() else {
        return reply(StatusCode::INTERNAL_SERVER_ERROR, json!({"success": false}));
    };
    let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
        return not_found();
    };
    if let Some(title) = patch.title {
        task.title = title;
    }
    if let Some(content) = patch.content {
        task.content = content;
    }
    if let Some(status) = patch.status {
        task.status = status;
    }
    task.updated_at = Utc::now();
    if state.terse_replies.load(Ordering::SeqCst) {
        return reply(
            StatusCode::OK,
            json!({"success": true, "task": {"_id": task.id, "status": task.status}}),
        );
    }
    reply(StatusCode::OK, json!({"success": true, "task": task.clone()}))
}

async fn handle_delete(
    State(state): State<Arc<StubState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !authed(&headers) {
        return unauthorized();
    }
    let Ok(mut tasks) = state.tasks.write() else {
        return reply(StatusCode::INTERNAL_SERVER_ERROR, json!({"success": false}));
    };
    let before = tasks.len();
    tasks.retain(|t| t.id != id);
    if tasks.len() == before {
        return not_found();
    }
    if state.terse_replies.load(Ordering::SeqCst) {
        return StatusCode::NO_CONTENT.into_response();
    }
    reply(StatusCode::OK, json!({"success": true, "message": "Task deleted"}))
}
