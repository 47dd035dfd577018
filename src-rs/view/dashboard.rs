use std::panic;
use std::sync::Arc;
use std::thread;

use tracing::{debug, info, warn};

use super::form::{SaveKind, TaskForm};
use super::types::{Confirm, Route, SubmitOutcome};
use crate::auth::User;
use crate::http::{ClientError, TaskApi};
use crate::task::{Task, TaskCard, TaskList, TaskStatus};

pub const DELETE_PROMPT: &str = "Delete this task?";

#[derive(Debug)]
pub struct ViewState {
    pub user: Option<User>,
    pub tasks: TaskList,
    pub loading: bool,
    pub form: TaskForm,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            user: None,
            tasks: TaskList::default(),
            loading: true,
            form: TaskForm::default(),
        }
    }
}

pub struct Dashboard {
    api: Arc<dyn TaskApi>,
    state: ViewState,
}

impl Dashboard {
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        Self {
            api,
            state: ViewState::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    pub fn tasks(&self) -> &TaskList {
        &self.state.tasks
    }

    pub fn pending(&self) -> Vec<&Task> {
        self.state.tasks.pending()
    }

    pub fn completed(&self) -> Vec<&Task> {
        self.state.tasks.completed()
    }

    pub fn pending_cards(&self) -> Vec<TaskCard> {
        self.pending().into_iter().map(TaskCard::new).collect()
    }

    pub fn completed_cards(&self) -> Vec<TaskCard> {
        self.completed().into_iter().map(TaskCard::new).collect()
    }

    /// Both requests are in flight at once. Only a failed verification
    /// sends the user to login.
    pub fn mount(&mut self) -> Route {
        self.state.loading = true;
        let api = self.api.as_ref();
        let (session, tasks) = thread::scope(|scope| {
            let tasks = scope.spawn(|| api.list_tasks());
            let session = api.verify_session();
            match tasks.join() {
                Ok(tasks) => (session, tasks),
                Err(payload) => panic::resume_unwind(payload),
            }
        });
        self.state.loading = false;

        match tasks {
            Ok(Some(tasks)) => {
                debug!(count = tasks.len(), "tasks loaded");
                self.state.tasks.replace_all(tasks);
            }
            Ok(None) => debug!("task fetch returned no data"),
            Err(err) => warn!(error = %err, "failed to fetch tasks"),
        }

        match session {
            Ok(user) => {
                if let Some(user) = user {
                    self.state.user = Some(user);
                }
                Route::Dashboard
            }
            Err(err) => {
                warn!(error = %err, "session verification failed");
                Route::Login
            }
        }
    }

    /// `Ok(false)` if the user backed out; nothing is sent then.
    pub fn delete(&mut self, id: &str, confirm: &dyn Confirm) -> Result<bool, ClientError> {
        if !confirm.confirm(DELETE_PROMPT) {
            return Ok(false);
        }
        if !self.api.delete_task(id)? {
            debug!(%id, "delete not acknowledged");
        }
        self.state.tasks.remove(id);
        Ok(true)
    }

    /// `Ok(None)` for unknown ids.
    pub fn toggle(&mut self, id: &str) -> Result<Option<TaskStatus>, ClientError> {
        let Some(current) = self.state.tasks.get(id).map(|t| t.status) else {
            return Ok(None);
        };
        let next = current.toggled();
        if !self.api.set_status(id, next)? {
            debug!(%id, "status change not acknowledged");
        }
        self.state.tasks.set_status(id, next);
        Ok(Some(next))
    }

    pub fn open_create(&mut self) {
        self.state.form.open_create();
    }

    pub fn open_edit(&mut self, id: &str) -> bool {
        match self.state.tasks.get(id) {
            Some(task) => {
                self.state.form.open_edit(task);
                true
            }
            None => false,
        }
    }

    pub fn form(&self) -> &TaskForm {
        &self.state.form
    }

    pub fn form_mut(&mut self) -> &mut TaskForm {
        &mut self.state.form
    }

    pub fn close_form(&mut self) {
        self.state.form.close();
    }

    pub fn submit_form(&mut self) -> SubmitOutcome<SaveKind> {
        let api = self.api.as_ref();
        let tasks = &mut self.state.tasks;
        self.state
            .form
            .submit(api, |task, kind| apply_saved(tasks, task, kind))
    }

    pub fn logout(&mut self) -> Route {
        match self.api.logout() {
            Ok(_) => info!("signed out"),
            Err(err) => warn!(error = %err, "logout request failed"),
        }
        self.state = ViewState::default();
        Route::Login
    }
}

fn apply_saved(tasks: &mut TaskList, task: Task, kind: SaveKind) {
    match kind {
        SaveKind::Updated => {
            tasks.replace(task);
        }
        SaveKind::Created => tasks.prepend(task),
    }
}
