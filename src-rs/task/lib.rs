pub mod card;
pub mod list;
pub mod types;

pub use card::{format_timestamp, CardAction, TaskCard};
pub use list::TaskList;
pub use types::{Task, TaskDraft, TaskPatch, TaskStatus};
