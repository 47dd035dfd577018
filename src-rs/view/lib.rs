pub mod dashboard;
pub mod form;
pub mod types;

pub use dashboard::{Dashboard, ViewState, DELETE_PROMPT};
pub use form::{SaveKind, TaskField, TaskForm};
pub use types::{Confirm, FieldErrors, FormState, Route, SubmitOutcome};
