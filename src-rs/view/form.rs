use tracing::{debug, warn};

use super::types::{FieldErrors, FormState, SubmitOutcome};
use crate::http::TaskApi;
use crate::task::{Task, TaskDraft, TaskPatch};

pub const SAVE_FALLBACK: &str = "Failed to save task. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TaskField {
    Title,
    Content,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveKind {
    Created,
    Updated,
}

#[derive(Debug)]
pub struct TaskForm {
    open: bool,
    editing: Option<Task>,
    title: String,
    content: String,
    errors: FieldErrors<TaskField>,
    api_error: Option<String>,
    state: FormState,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            open: false,
            editing: None,
            title: String::new(),
            content: String::new(),
            errors: FieldErrors::default(),
            api_error: None,
            state: FormState::Idle,
        }
    }
}

impl TaskForm {
    pub fn open_create(&mut self) {
        self.reset();
        self.open = true;
    }

    pub fn open_edit(&mut self, task: &Task) {
        self.reset();
        self.title = task.title.clone();
        self.content = task.content.clone();
        self.editing = Some(task.clone());
        self.open = true;
    }

    pub fn close(&mut self) {
        self.reset();
        self.open = false;
    }

    fn reset(&mut self) {
        self.editing = None;
        self.title.clear();
        self.content.clear();
        self.errors.clear_all();
        self.api_error = None;
        self.state = FormState::Idle;
    }

    pub fn set(&mut self, field: TaskField, value: &str) {
        match field {
            TaskField::Title => self.title = value.to_string(),
            TaskField::Content => self.content = value.to_string(),
        }
        self.errors.clear(field);
        self.api_error = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn editing(&self) -> Option<&Task> {
        self.editing.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn errors(&self) -> &FieldErrors<TaskField> {
        &self.errors
    }

    pub fn api_error(&self) -> Option<&str> {
        self.api_error.as_deref()
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == FormState::Submitting
    }

    pub fn heading(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Task"
        } else {
            "Create New Task"
        }
    }

    pub fn subtitle(&self) -> &'static str {
        if self.editing.is_some() {
            "Update your task details below"
        } else {
            "Add a new task to stay productive"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match (self.is_loading(), self.editing.is_some()) {
            (true, _) => "Saving...",
            (false, true) => "Update Task",
            (false, false) => "Create Task",
        }
    }

    pub fn validate(&mut self) -> bool {
        self.errors.clear_all();
        if self.title.trim().is_empty() {
            self.errors.set(TaskField::Title, "Title is required");
        }
        if self.content.trim().is_empty() {
            self.errors.set(TaskField::Content, "Content is required");
        }
        self.errors.is_empty()
    }

    /// Sends the form. On success `on_save` receives the task exactly as the
    /// backend returned it, then the form closes.
    pub fn submit<F>(&mut self, api: &dyn TaskApi, on_save: F) -> SubmitOutcome<SaveKind>
    where
        F: FnOnce(Task, SaveKind),
    {
        self.api_error = None;

        if !self.validate() {
            return SubmitOutcome::Invalid;
        }

        self.state = FormState::Submitting;
        let draft = TaskDraft {
            title: self.title.clone(),
            content: self.content.clone(),
        };
        let (result, kind) = match &self.editing {
            Some(task) => (
                api.update_task(&task.id, &TaskPatch::from(draft)),
                SaveKind::Updated,
            ),
            None => (api.create_task(&draft), SaveKind::Created),
        };
        self.state = FormState::Idle;

        match result {
            Ok(Some(task)) => {
                debug!(id = %task.id, ?kind, "task saved");
                on_save(task, kind);
                self.close();
                SubmitOutcome::Done(kind)
            }
            Ok(None) => SubmitOutcome::Declined,
            Err(err) => {
                warn!(error = %err, "saving task failed");
                let message = err.user_message(SAVE_FALLBACK);
                self.api_error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }
}
