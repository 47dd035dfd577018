use tracing::{info, warn};

use super::types::Credentials;
use crate::helpers::validate_email;
use crate::http::TaskApi;
use crate::view::{FieldErrors, FormState, Route, SubmitOutcome};

pub const LOGIN_FALLBACK: &str = "Login failed. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug)]
pub struct LoginForm {
    email: String,
    password: String,
    errors: FieldErrors<LoginField>,
    api_error: Option<String>,
    state: FormState,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            errors: FieldErrors::default(),
            api_error: None,
            state: FormState::Idle,
        }
    }

    /// Editing a field clears its error and any form-level error.
    pub fn set(&mut self, field: LoginField, value: &str) {
        match field {
            LoginField::Email => self.email = value.to_string(),
            LoginField::Password => self.password = value.to_string(),
        }
        self.errors.clear(field);
        self.api_error = None;
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn errors(&self) -> &FieldErrors<LoginField> {
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

    pub fn submit_label(&self) -> &'static str {
        if self.is_loading() {
            "Signing In..."
        } else {
            "Sign In"
        }
    }

    pub fn validate(&mut self) -> bool {
        self.errors.clear_all();
        if self.email.trim().is_empty() {
            self.errors.set(LoginField::Email, "Email is required");
        } else if !validate_email(&self.email) {
            self.errors.set(LoginField::Email, "Please enter a valid email address");
        }
        if self.password.is_empty() {
            self.errors.set(LoginField::Password, "Password is required");
        }
        self.errors.is_empty()
    }

    pub fn submit(&mut self, api: &dyn TaskApi) -> SubmitOutcome<Route> {
        self.api_error = None;

        if !self.validate() {
            return SubmitOutcome::Invalid;
        }

        self.state = FormState::Submitting;
        let credentials = Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        };
        let result = api.login(&credentials);
        self.state = FormState::Idle;

        match result {
            Ok(true) => {
                info!(email = %self.email, "signed in");
                SubmitOutcome::Done(Route::Dashboard)
            }
            Ok(false) => SubmitOutcome::Declined,
            Err(err) => {
                warn!(error = %err, "login failed");
                let message = err.user_message(LOGIN_FALLBACK);
                self.api_error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }
}
