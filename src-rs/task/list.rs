use super::types::{Task, TaskStatus};

#[derive(Clone, Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn prepend(&mut self, task: Task) {
        self.tasks.insert(0, task);
    }

    pub fn replace(&mut self, task: Task) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                *slot = task;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(idx))
    }

    pub fn set_status(&mut self, id: &str, status: TaskStatus) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.status = status;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn with_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    pub fn pending(&self) -> Vec<&Task> {
        self.with_status(TaskStatus::Pending)
    }

    pub fn completed(&self) -> Vec<&Task> {
        self.with_status(TaskStatus::Completed)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
