pub mod login;
pub mod types;

pub use login::{LoginField, LoginForm};
pub use types::{Credentials, User};
