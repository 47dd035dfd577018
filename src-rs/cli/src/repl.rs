use std::io;
use std::sync::Arc;

use task_manager_rs::auth::{LoginField, LoginForm};
use task_manager_rs::task::TaskStatus;
use task_manager_rs::view::{Confirm, Dashboard, Route, SaveKind, SubmitOutcome, TaskField};
use task_manager_rs::{ApiClient, TaskApi};
use tracing::debug;

use crate::models::CLIConfig;
use crate::render;

const NO_SUCH_TASK: &str = "no such task";
const TOGGLE_FALLBACK: &str = "Failed to update task. Please try again.";
const DELETE_FALLBACK: &str = "Failed to delete task. Please try again.";

pub struct REPL {
    pub config: CLIConfig,
    api: Arc<dyn TaskApi>,
    dashboard: Dashboard,
    login: LoginForm,
    route: Route,
}

impl REPL {
    pub fn new(config: CLIConfig, api: Arc<dyn TaskApi>) -> Self {
        Self {
            login: login_form(&config),
            config,
            dashboard: Dashboard::new(api.clone()),
            api,
            route: Route::Login,
        }
    }

    pub fn run(&mut self) {
        render::banner(&self.config);
        self.enter_dashboard();
        loop {
            if self.route == Route::Login {
                if self.login_view() {
                    break;
                }
                self.enter_dashboard();
                continue;
            }
            render::prompt();
            let Some(line) = read_line() else {
                break;
            };
            if line.is_empty() {
                continue;
            }
            if line.starts_with('/') {
                if self.handle_command(&line) {
                    break;
                }
                continue;
            }
            render::info("unknown input, type /help");
        }
    }

    fn enter_dashboard(&mut self) {
        self.route = self.dashboard.mount();
        if self.route == Route::Dashboard {
            render::header(self.dashboard.user());
            self.show_tasks();
        }
    }

    /// Returns true when the user asked to quit.
    fn login_view(&mut self) -> bool {
        render::login_header();
        loop {
            let Some(email) = ask("Email", self.login.email()) else {
                return true;
            };
            if is_exit(&email) {
                return true;
            }
            self.login.set(LoginField::Email, &email);

            let Some(password) = ask("Password", "") else {
                return true;
            };
            if is_exit(&password) {
                return true;
            }
            self.login.set(LoginField::Password, &password);

            match self.login.submit(self.api.as_ref()) {
                SubmitOutcome::Done(route) => {
                    self.route = route;
                    return false;
                }
                SubmitOutcome::Invalid => render::field_errors(self.login.errors().iter()),
                SubmitOutcome::Failed(message) => render::error(&message),
                SubmitOutcome::Declined => render::info("sign in was not accepted"),
            }
        }
    }

    fn handle_command(&mut self, line: &str) -> bool {
        let mut parts = line.splitn(2, ' ');
        let cmd = parts.next().unwrap_or("").trim_start_matches('/');
        let rest = parts.next().unwrap_or("").trim();
        match cmd {
            "exit" | "quit" => return true,
            "help" => render::help(),
            "tasks" => self.show_tasks(),
            "refresh" => self.enter_dashboard(),
            "new" => {
                self.dashboard.open_create();
                self.form_view();
            }
            "edit" => match self.resolve(rest) {
                Some(id) => {
                    self.dashboard.open_edit(&id);
                    self.form_view();
                }
                None => render::error(NO_SUCH_TASK),
            },
            "toggle" => match self.toggle_task(rest) {
                Ok(status) => {
                    render::info(&format!("marked {}", status));
                    self.show_tasks();
                }
                Err(message) => render::error(&message),
            },
            "delete" => match self.delete_task(rest, &|msg: &str| ask_yes_no(msg)) {
                Ok(true) => {
                    render::info("task deleted");
                    self.show_tasks();
                }
                Ok(false) => render::info("kept"),
                Err(message) => render::error(&message),
            },
            "whoami" => render::user(self.dashboard.user()),
            "logout" => {
                self.route = self.dashboard.logout();
                self.login = login_form(&self.config);
                render::info("signed out");
            }
            "config" => render::config(&self.config),
            "base" => {
                if rest.is_empty() {
                    render::info(&format!("base: {}", self.config.base_url));
                } else {
                    self.config.base_url = rest.to_string();
                    match ApiClient::new(self.config.client_config()) {
                        Ok(client) => {
                            self.api = Arc::new(client);
                            self.dashboard = Dashboard::new(self.api.clone());
                            render::info("base url updated");
                            self.enter_dashboard();
                        }
                        Err(err) => render::error(&err.to_string()),
                    }
                }
            }
            _ => render::info("unknown command, type /help"),
        }
        false
    }

    fn toggle_task(&mut self, key: &str) -> Result<TaskStatus, String> {
        let id = self.resolve(key).ok_or_else(|| NO_SUCH_TASK.to_string())?;
        match self.dashboard.toggle(&id) {
            Ok(Some(status)) => Ok(status),
            Ok(None) => Err(NO_SUCH_TASK.to_string()),
            Err(err) => Err(err.user_message(TOGGLE_FALLBACK)),
        }
    }

    fn delete_task(&mut self, key: &str, confirm: &dyn Confirm) -> Result<bool, String> {
        let id = self.resolve(key).ok_or_else(|| NO_SUCH_TASK.to_string())?;
        self.dashboard
            .delete(&id, confirm)
            .map_err(|err| err.user_message(DELETE_FALLBACK))
    }

    fn show_tasks(&self) {
        render::dashboard(&self.dashboard.pending_cards(), &self.dashboard.completed_cards());
    }

    fn form_view(&mut self) {
        render::form_header(self.dashboard.form());
        loop {
            let Some(title) = ask("Title", self.dashboard.form().title()) else {
                self.dashboard.close_form();
                return;
            };
            if is_cancel(&title) {
                self.dashboard.close_form();
                render::info("discarded");
                return;
            }
            self.dashboard.form_mut().set(TaskField::Title, &title);

            let Some(content) = ask("Description", self.dashboard.form().content()) else {
                self.dashboard.close_form();
                return;
            };
            if is_cancel(&content) {
                self.dashboard.close_form();
                render::info("discarded");
                return;
            }
            self.dashboard.form_mut().set(TaskField::Content, &content);

            match self.dashboard.submit_form() {
                SubmitOutcome::Done(kind) => {
                    render::info(match kind {
                        SaveKind::Created => "task created",
                        SaveKind::Updated => "task updated",
                    });
                    self.show_tasks();
                    return;
                }
                SubmitOutcome::Invalid => render::field_errors(self.dashboard.form().errors().iter()),
                SubmitOutcome::Failed(message) => render::error(&message),
                SubmitOutcome::Declined => render::info("task was not saved"),
            }
            if !ask_yes_no("Try again?") {
                self.dashboard.close_form();
                return;
            }
        }
    }

    /// Accepts a task id or a 1-based position in the /tasks listing.
    fn resolve(&self, key: &str) -> Option<String> {
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        if self.dashboard.tasks().get(key).is_some() {
            return Some(key.to_string());
        }
        let number = key.trim_start_matches('#').parse::<usize>().ok()?;
        let pending = self.dashboard.pending();
        let completed = self.dashboard.completed();
        let found = pending
            .iter()
            .chain(completed.iter())
            .nth(number.checked_sub(1)?)
            .map(|task| task.id.clone());
        debug!(key, ?found, "resolved task reference");
        found
    }
}

fn login_form(config: &CLIConfig) -> LoginForm {
    let mut login = LoginForm::new();
    if let Some(email) = &config.email {
        login.set(LoginField::Email, email);
    }
    login
}

fn read_line() -> Option<String> {
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

/// Prompts for a field; an empty answer keeps `current`.
fn ask(label: &str, current: &str) -> Option<String> {
    render::field_prompt(label, current);
    let line = read_line()?;
    if line.is_empty() {
        Some(current.to_string())
    } else {
        Some(line)
    }
}

fn ask_yes_no(message: &str) -> bool {
    render::field_prompt(&format!("{} [y/N]", message), "");
    match read_line() {
        Some(answer) => matches!(answer.to_lowercase().as_str(), "y" | "yes"),
        None => false,
    }
}

fn is_exit(value: &str) -> bool {
    matches!(value, "/exit" | "/quit")
}

fn is_cancel(value: &str) -> bool {
    value == "/cancel"
}
