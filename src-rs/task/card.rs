use std::fmt;

use chrono::{DateTime, Local, TimeZone};

use super::types::{Task, TaskStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardAction {
    ToggleStatus,
    Edit,
    Delete,
}

impl CardAction {
    pub fn label(self) -> &'static str {
        match self {
            CardAction::ToggleStatus => "Toggle status",
            CardAction::Edit => "Edit task",
            CardAction::Delete => "Delete task",
        }
    }

    pub fn command(self) -> &'static str {
        match self {
            CardAction::ToggleStatus => "toggle",
            CardAction::Edit => "edit",
            CardAction::Delete => "delete",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TaskCard {
    pub id: String,
    pub title: String,
    pub content: String,
    pub status: TaskStatus,
    pub badge: &'static str,
    pub is_pending: bool,
    /// Completed tasks are rendered struck through and dimmed.
    pub struck: bool,
    pub created: String,
    pub updated: Option<String>,
    pub actions: [CardAction; 3],
}

impl TaskCard {
    pub fn new(task: &Task) -> Self {
        Self::with_timezone(task, &Local)
    }

    pub fn with_timezone<Tz>(task: &Task, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let is_pending = task.is_pending();
        let updated = if task.updated_at != task.created_at {
            Some(format!(
                "Updated: {}",
                format_timestamp(&task.updated_at.with_timezone(tz))
            ))
        } else {
            None
        };
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            content: task.content.clone(),
            status: task.status,
            badge: task.status.as_str(),
            is_pending,
            struck: !is_pending,
            created: format!(
                "Created: {}",
                format_timestamp(&task.created_at.with_timezone(tz))
            ),
            updated,
            actions: [CardAction::ToggleStatus, CardAction::Edit, CardAction::Delete],
        }
    }
}

/// `Oct 16, 2026, 09:05 AM`
pub fn format_timestamp<Tz>(ts: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    ts.format("%b %-d, %Y, %I:%M %p").to_string()
}
