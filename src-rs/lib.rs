pub mod config;
pub mod helpers;
pub mod result;

#[path = "http/lib.rs"]
pub mod http;
#[path = "task/lib.rs"]
pub mod task;
#[path = "auth/lib.rs"]
pub mod auth;
#[path = "view/lib.rs"]
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ClientConfig;
pub use helpers::{validate_email, validate_password};
pub use http::{ApiClient, ClientError, TaskApi};
pub use result::Envelope;
