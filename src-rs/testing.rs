use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::auth::{Credentials, User};
use crate::http::{ClientError, TaskApi};
use crate::task::{Task, TaskDraft, TaskPatch, TaskStatus};

pub fn ts() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 9, 5, 0).unwrap()
}

pub fn task(id: &str, status: TaskStatus) -> Task {
    Task {
        id: id.to_string(),
        title: format!("title {id}"),
        content: format!("content {id}"),
        status,
        created_at: ts(),
        updated_at: ts(),
    }
}

/// Operations are keyed by method name for failure and decline injection.
#[derive(Default)]
pub struct FakeApi {
    pub user: Option<User>,
    pub tasks: Mutex<Vec<Task>>,
    failures: Mutex<HashMap<&'static str, (u16, Option<String>)>>,
    declines: Mutex<HashSet<&'static str>>,
    calls: Mutex<Vec<String>>,
    next_id: Mutex<usize>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            user: Some(User {
                id: Some("u1".to_string()),
                name: "Aman".to_string(),
                email: "aman@example.com".to_string(),
            }),
            ..Self::default()
        }
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let api = Self::new();
        *api.tasks.lock().unwrap() = tasks;
        api
    }

    pub fn fail(&self, op: &'static str, status: u16, message: Option<&str>) {
        self.failures
            .lock()
            .unwrap()
            .insert(op, (status, message.map(str::to_string)));
    }

    pub fn decline(&self, op: &'static str) {
        self.declines.lock().unwrap().insert(op);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn enter(&self, op: &'static str, detail: String) -> Result<bool, ClientError> {
        let entry = if detail.is_empty() {
            op.to_string()
        } else {
            format!("{op} {detail}")
        };
        self.calls.lock().unwrap().push(entry);
        if let Some((status, message)) = self.failures.lock().unwrap().get(op).cloned() {
            return Err(ClientError::Status { status, message });
        }
        Ok(!self.declines.lock().unwrap().contains(op))
    }
}

impl TaskApi for FakeApi {
    fn verify_session(&self) -> Result<Option<User>, ClientError> {
        if !self.enter("verify_session", String::new())? {
            return Ok(None);
        }
        Ok(self.user.clone())
    }

    fn login(&self, credentials: &Credentials) -> Result<bool, ClientError> {
        self.enter("login", credentials.email.clone())
    }

    fn logout(&self) -> Result<bool, ClientError> {
        self.enter("logout", String::new())
    }

    fn list_tasks(&self) -> Result<Option<Vec<Task>>, ClientError> {
        if !self.enter("list_tasks", String::new())? {
            return Ok(None);
        }
        Ok(Some(self.tasks.lock().unwrap().clone()))
    }

    fn create_task(&self, draft: &TaskDraft) -> Result<Option<Task>, ClientError> {
        if !self.enter("create_task", draft.title.clone())? {
            return Ok(None);
        }
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let created = Task {
            id: format!("new{}", next),
            title: draft.title.clone(),
            content: draft.content.clone(),
            status: TaskStatus::Pending,
            created_at: ts(),
            updated_at: ts(),
        };
        self.tasks.lock().unwrap().insert(0, created.clone());
        Ok(Some(created))
    }

    fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Option<Task>, ClientError> {
        let body = serde_json::to_string(patch).unwrap_or_default();
        if !self.enter("update_task", format!("{id} {body}"))? {
            return Ok(None);
        }
        let mut tasks = self.tasks.lock().unwrap();
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Err(ClientError::Status {
                status: 404,
                message: Some("Task not found".to_string()),
            });
        };
        if let Some(title) = &patch.title {
            task.title = title.clone();
        }
        if let Some(content) = &patch.content {
            task.content = content.clone();
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        task.updated_at = task.updated_at + Duration::minutes(1);
        Ok(Some(task.clone()))
    }

    fn set_status(&self, id: &str, status: TaskStatus) -> Result<bool, ClientError> {
        if !self.enter("set_status", format!("{id} {status}"))? {
            return Ok(false);
        }
        if let Some(task) = self.tasks.lock().unwrap().iter_mut().find(|t| t.id == id) {
            task.status = status;
        }
        Ok(true)
    }

    fn delete_task(&self, id: &str) -> Result<bool, ClientError> {
        if !self.enter("delete_task", id.to_string())? {
            return Ok(false);
        }
        self.tasks.lock().unwrap().retain(|t| t.id != id);
        Ok(true)
    }
}
