use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://task-manager-backend-oyzs.onrender.com/api";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    /// `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Reads `TASK_MANAGER_API_URL` and `TASK_MANAGER_TIMEOUT_SECS`, falling
    /// back to the defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(value) = env::var("TASK_MANAGER_API_URL") {
            if !value.trim().is_empty() {
                cfg.base_url = value.trim().to_string();
            }
        }
        if let Ok(value) = env::var("TASK_MANAGER_TIMEOUT_SECS") {
            if let Ok(secs) = value.trim().parse::<u64>() {
                if secs > 0 {
                    cfg.request_timeout = Some(Duration::from_secs(secs));
                }
            }
        }
        cfg
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
