use serde::{Deserialize, Serialize};

/// Every backend reply is `{ success, message?, ...payload }`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Envelope<T> {
    /// The payload, but only when the backend flagged the call as successful.
    pub fn into_success(self) -> Option<T> {
        if self.success {
            Some(self.payload)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Ack {}
