use std::time::Duration;

use task_manager_rs::ClientConfig;

#[derive(Clone, Debug)]
pub struct CLIConfig {
    pub base_url: String,
    pub timeout_secs: Option<u64>,
    pub email: Option<String>,
    pub debug: bool,
}

impl CLIConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}
