use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::types::{ClientError, SessionPayload, TaskApi, TaskPayload, TasksPayload};
use crate::auth::{Credentials, User};
use crate::config::ClientConfig;
use crate::result::{Ack, Envelope};
use crate::task::{Task, TaskDraft, TaskPatch, TaskStatus};

/// Blocking client bound to one backend origin. Keeps a cookie jar so the
/// session set by login rides along on every later call.
pub struct ApiClient {
    config: ClientConfig,
    client: Client,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { config, client })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, ClientError> {
        self.call(Method::GET, path, None::<&()>)
    }

    pub fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<Envelope<T>, ClientError> {
        self.call(Method::POST, path, body)
    }

    pub fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>, ClientError> {
        self.call(Method::PUT, path, Some(body))
    }

    fn call<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Envelope<T>, ClientError> {
        let text = self.send(method, path, body)?;
        serde_json::from_str::<Envelope<T>>(&text).map_err(|err| ClientError::Decode(err.to_string()))
    }

    /// Any 2xx counts. The reply body only matters when it says
    /// `success: false`.
    fn acknowledge<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<bool, ClientError> {
        let text = self.send(method, path, body)?;
        Ok(serde_json::from_str::<Envelope<Ack>>(&text)
            .map(|env| env.success)
            .unwrap_or(true))
    }

    fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<String, ClientError> {
        let url = self.config.endpoint(path);
        debug!(%method, %url, "sending request");
        let mut req: RequestBuilder = self.client.request(method, url);
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send()?;
        let status = resp.status();
        let text = resp.text()?;

        if status.is_success() {
            Ok(text)
        } else {
            let message = serde_json::from_str::<Envelope<Ack>>(&text)
                .ok()
                .and_then(|env| env.message);
            debug!(status = status.as_u16(), ?message, "request rejected");
            Err(ClientError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }
}

impl TaskApi for ApiClient {
    fn verify_session(&self) -> Result<Option<User>, ClientError> {
        let env = self.get::<SessionPayload>("/auth/verify")?;
        Ok(env.into_success().and_then(|payload| payload.user))
    }

    fn login(&self, credentials: &Credentials) -> Result<bool, ClientError> {
        let env = self.post::<_, Ack>("/auth/login", Some(credentials))?;
        Ok(env.success)
    }

    fn logout(&self) -> Result<bool, ClientError> {
        let env = self.post::<(), Ack>("/auth/logout", None)?;
        Ok(env.success)
    }

    fn list_tasks(&self) -> Result<Option<Vec<Task>>, ClientError> {
        let env = self.get::<TasksPayload>("/tasks")?;
        Ok(env.into_success().map(|payload| {
            payload
                .tasks
                .into_iter()
                .filter_map(|raw| match serde_json::from_value::<Task>(raw) {
                    Ok(task) => Some(task),
                    Err(err) => {
                        warn!(error = %err, "skipping malformed task");
                        None
                    }
                })
                .collect()
        }))
    }

    fn create_task(&self, draft: &TaskDraft) -> Result<Option<Task>, ClientError> {
        let env = self.post::<_, TaskPayload>("/tasks", Some(draft))?;
        Ok(env.into_success().and_then(|payload| payload.task))
    }

    fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Option<Task>, ClientError> {
        let env = self.put::<_, TaskPayload>(&format!("/tasks/{}", id), patch)?;
        Ok(env.into_success().and_then(|payload| payload.task))
    }

    fn set_status(&self, id: &str, status: TaskStatus) -> Result<bool, ClientError> {
        self.acknowledge(Method::PUT, &format!("/tasks/{}", id), Some(&TaskPatch::status(status)))
    }

    fn delete_task(&self, id: &str) -> Result<bool, ClientError> {
        self.acknowledge(Method::DELETE, &format!("/tasks/{}", id), None::<&()>)
    }
}
