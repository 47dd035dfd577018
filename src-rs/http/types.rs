use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::{Credentials, User};
use crate::task::{Task, TaskDraft, TaskPatch, TaskStatus};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("http {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text to show in a form: the backend's message when present, else
    /// `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status().map(|s| s.as_u16()),
            ClientError::Decode(_) => None,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionPayload {
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TasksPayload {
    #[serde(default)]
    pub tasks: Vec<serde_json::Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TaskPayload {
    #[serde(default)]
    pub task: Option<Task>,
}

/// `Ok(None)` / `Ok(false)` mean the backend replied 2xx with
/// `success: false`.
pub trait TaskApi: Send + Sync {
    fn verify_session(&self) -> Result<Option<User>, ClientError>;
    fn login(&self, credentials: &Credentials) -> Result<bool, ClientError>;
    fn logout(&self) -> Result<bool, ClientError>;
    fn list_tasks(&self) -> Result<Option<Vec<Task>>, ClientError>;
    fn create_task(&self, draft: &TaskDraft) -> Result<Option<Task>, ClientError>;
    fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Option<Task>, ClientError>;
    fn set_status(&self, id: &str, status: TaskStatus) -> Result<bool, ClientError>;
    fn delete_task(&self, id: &str) -> Result<bool, ClientError>;
}
