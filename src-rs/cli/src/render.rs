use std::io::{self, Write};

use task_manager_rs::auth::User;
use task_manager_rs::task::TaskCard;
use task_manager_rs::view::TaskForm;

use crate::models::CLIConfig;

pub fn banner(cfg: &CLIConfig) {
    println!("Task Manager");
    println!("API: {}", cfg.base_url);
    println!("Type /help for commands.");
}

pub fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

pub fn field_prompt(label: &str, current: &str) {
    if current.is_empty() {
        print!("{}: ", label);
    } else {
        print!("{} [{}]: ", label, current);
    }
    let _ = io::stdout().flush();
}

pub fn help() {
    println!("Commands:");
    println!("  /help                 Show commands");
    println!("  /exit | /quit         Exit");
    println!("  /tasks                Show pending and completed tasks");
    println!("  /refresh              Reload session and tasks");
    println!("  /new                  Create a task");
    println!("  /edit <ref>           Edit a task's title and description");
    println!("  /toggle <ref>         Flip a task between Pending and Completed");
    println!("  /delete <ref>         Delete a task");
    println!("  /whoami               Show the signed-in user");
    println!("  /logout               Sign out");
    println!("  /config               Show current config");
    println!("  /base <url>           Point at another backend");
    println!("<ref> is a task id or its number in the /tasks listing.");
}

pub fn login_header() {
    println!();
    println!("Welcome Back");
    println!("Sign in to access your tasks (/exit to quit)");
}

pub fn header(user: Option<&User>) {
    println!();
    match user {
        Some(user) => println!("Task Manager - {}", user.name),
        None => println!("Task Manager"),
    }
}

/// Prints both sections. Cards are numbered continuously, pending first, so
/// the numbers can be used as task references.
pub fn dashboard(pending: &[TaskCard], completed: &[TaskCard]) {
    println!();
    println!("Pending Tasks ({})", pending.len());
    if pending.is_empty() {
        println!("  No pending tasks");
    }
    for (idx, item) in pending.iter().enumerate() {
        card(idx + 1, item);
    }

    println!();
    println!("Completed Tasks ({})", completed.len());
    if completed.is_empty() {
        println!("  Nothing completed yet");
    }
    for (idx, item) in completed.iter().enumerate() {
        card(pending.len() + idx + 1, item);
    }
}

pub fn card(number: usize, card: &TaskCard) {
    let mark = if card.is_pending { "[ ]" } else { "[x]" };
    println!("  #{} {} {} ({})", number, mark, card.title, card.badge);
    println!("      {}", card.content);
    match &card.updated {
        Some(updated) => println!("      {}  {}", card.created, updated),
        None => println!("      {}", card.created),
    }
    let actions: Vec<String> = card
        .actions
        .iter()
        .map(|action| format!("/{} {}", action.command(), number))
        .collect();
    println!("      id: {}  {}", card.id, actions.join("  "));
}

pub fn form_header(form: &TaskForm) {
    println!();
    println!("{}", form.heading());
    println!("{} (/cancel to discard)", form.subtitle());
}

pub fn field_errors<'a, F>(errors: impl Iterator<Item = (F, &'a str)>) {
    for (_, message) in errors {
        eprintln!("  - {}", message);
    }
}

pub fn config(cfg: &CLIConfig) {
    println!("config:");
    println!("  base: {}", cfg.base_url);
    match cfg.timeout_secs {
        Some(secs) => println!("  timeout: {}s", secs),
        None => println!("  timeout: none"),
    }
    println!("  debug: {}", cfg.debug);
}

pub fn user(user: Option<&User>) {
    match user {
        Some(user) => println!("{} <{}>", user.name, user.email),
        None => println!("no user information"),
    }
}

pub fn info(msg: &str) {
    println!("{}", msg);
}

pub fn error(msg: &str) {
    eprintln!("error: {}", msg);
}
