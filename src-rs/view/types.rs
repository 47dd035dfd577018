use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// `Submitting` only while the request is out. `submit` takes `&mut self`,
/// so a second submit cannot start before the first returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome<T> {
    Invalid,
    /// The backend answered 2xx without `success`.
    Declined,
    Failed(String),
    Done(T),
}

impl<T> SubmitOutcome<T> {
    pub fn is_done(&self) -> bool {
        matches!(self, SubmitOutcome::Done(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldErrors<F: Ord> {
    errors: BTreeMap<F, String>,
}

impl<F: Ord> Default for FieldErrors<F> {
    fn default() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> FieldErrors<F> {
    pub fn set(&mut self, field: F, message: &str) {
        self.errors.insert(field, message.to_string());
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn clear(&mut self, field: F) {
        self.errors.remove(&field);
    }

    pub fn clear_all(&mut self) {
        self.errors.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}
