use std::time::Duration;

use anyhow::Result;

use taskdeck_api::*;

use crate::retry::{RetryConfig, post_json_with_retry};

/// Typed HTTP client for the taskdeck API.
///
/// Wraps the token endpoints and the task CRUD endpoints, attaching the
/// stored bearer token to every authenticated request. Auth failures come
/// back as a downcastable [`HttpError`] so callers can refresh and retry.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

/// Non-2xx response, with the backend's `detail` message when it sent one.
#[derive(Debug, thiserror::Error)]
#[error("HTTP {status}: {message}")]
pub struct HttpError {
    pub status: u16,
    pub message: String,
}

impl HttpError {
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

impl ApiClient {
    /// Create a new client with the given base URL and timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: None,
        })
    }

    /// Create from an existing `reqwest::Client` (e.g. shared in tests).
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: None,
        }
    }

    pub fn set_auth(&mut self, token: String) {
        self.auth_token = Some(token);
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn token_or_bail(&self) -> Result<&str> {
        self.auth_token
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("auth token not set"))
    }

    // ── Auth ──────────────────────────────────────────────────────────────

    pub async fn login(&self, req: &LoginRequest) -> Result<TokenPairResponse> {
        let resp = self
            .client
            .post(self.url("/token/"))
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn refresh(&self, req: &RefreshRequest) -> Result<AccessTokenResponse> {
        let resp = self
            .client
            .post(self.url("/token/refresh/"))
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    // ── Tasks ─────────────────────────────────────────────────────────────

    pub async fn list_tasks(&self) -> Result<Vec<TaskRecord>> {
        let token = self.token_or_bail()?;
        let resp = self
            .client
            .get(self.url("/tasks/"))
            .bearer_auth(token)
            .send()
            .await?;
        let list: TaskListResponse = parse_response(resp).await?;
        Ok(list.into_records())
    }

    pub async fn get_task(&self, id: &str) -> Result<TaskRecord> {
        let token = self.token_or_bail()?;
        let resp = self
            .client
            .get(self.url(&format!("/tasks/{id}/")))
            .bearer_auth(token)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// Create a task, retrying transient failures (network errors and 5xx).
    pub async fn create_task(&self, req: &CreateTaskRequest) -> Result<TaskRecord> {
        let token = self.token_or_bail()?;
        let body = serde_json::to_value(req)?;
        let resp = post_json_with_retry(
            &self.client,
            &self.url("/tasks/"),
            token,
            &body,
            &RetryConfig::default(),
        )
        .await?;
        Ok(resp.json().await?)
    }

    pub async fn update_task(&self, id: &str, req: &UpdateTaskRequest) -> Result<TaskRecord> {
        let token = self.token_or_bail()?;
        let resp = self
            .client
            .patch(self.url(&format!("/tasks/{id}/")))
            .bearer_auth(token)
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn delete_task(&self, id: &str) -> Result<()> {
        let token = self.token_or_bail()?;
        let resp = self
            .client
            .delete(self.url(&format!("/tasks/{id}/")))
            .bearer_auth(token)
            .send()
            .await?;
        expect_success(resp).await
    }
}

/// Parse an HTTP response: return the deserialized body on 2xx, or an
/// [`HttpError`] carrying the status and the backend's message.
async fn parse_response<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let resp = check_status(resp).await?;
    Ok(resp.json().await?)
}

/// Like [`parse_response`] but for endpoints with empty bodies (DELETE → 204).
async fn expect_success(resp: reqwest::Response) -> Result<()> {
    check_status(resp).await.map(|_| ())
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    if resp.status().is_success() {
        Ok(resp)
    } else {
        Err(response_error(resp).await)
    }
}

/// Turn a non-2xx response into a typed [`HttpError`]. The backend wraps
/// error messages as `{"detail": "..."}`; fall back to the raw body.
pub(crate) async fn response_error(resp: reqwest::Response) -> anyhow::Error {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|e| e.detail)
        .unwrap_or(body);
    HttpError {
        status: status.as_u16(),
        message,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{spawn_one_shot, spawn_sequence};

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://127.0.0.1:8000/", Duration::from_secs(5))
            .expect("build client");
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
        assert_eq!(client.url("/tasks/"), "http://127.0.0.1:8000/api/tasks/");
    }

    #[test]
    fn authed_calls_without_token_fail_fast() {
        let client =
            ApiClient::new("http://127.0.0.1:8000", Duration::from_secs(5)).expect("build client");
        assert!(client.token_or_bail().is_err());
    }

    #[tokio::test]
    async fn list_tasks_parses_a_bare_array_response() {
        let base = spawn_one_shot(
            "HTTP/1.1 200 OK\r\n\
             Content-Type: application/json\r\n\
             Content-Length: 45\r\n\
             Connection: close\r\n\r\n\
             [{\"id\": 1, \"title\": \"a\", \"completed\": false}]",
        )
        .await;

        let mut client = ApiClient::new(&base, Duration::from_secs(5)).expect("build client");
        client.set_auth("tok".to_string());
        let records = client.list_tasks().await.expect("list tasks");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "1");
    }

    #[tokio::test]
    async fn unauthorized_surfaces_the_backend_detail_message() {
        let base = spawn_one_shot(
            "HTTP/1.1 401 Unauthorized\r\n\
             Content-Type: application/json\r\n\
             Content-Length: 45\r\n\
             Connection: close\r\n\r\n\
             {\"detail\": \"Given token not valid for any t\"}",
        )
        .await;

        let mut client = ApiClient::new(&base, Duration::from_secs(5)).expect("build client");
        client.set_auth("expired".to_string());
        let err = client.list_tasks().await.expect_err("should be 401");
        let http = err.downcast_ref::<HttpError>().expect("HttpError");
        assert!(http.is_unauthorized());
        assert_eq!(http.message, "Given token not valid for any t");
    }

    #[tokio::test]
    async fn create_task_retries_a_transient_server_error() {
        let base = spawn_sequence(vec![
            "HTTP/1.1 500 Internal Server Error\r\n\
             Content-Length: 0\r\n\
             Connection: close\r\n\r\n",
            "HTTP/1.1 201 Created\r\n\
             Content-Type: application/json\r\n\
             Content-Length: 43\r\n\
             Connection: close\r\n\r\n\
             {\"id\": 7, \"title\": \"a\", \"completed\": false}",
        ])
        .await;

        let mut client = ApiClient::new(&base, Duration::from_secs(5)).expect("build client");
        client.set_auth("tok".to_string());
        let record = client
            .create_task(&CreateTaskRequest {
                title: "a".to_string(),
                due_date: None,
                priority: "medium".to_string(),
            })
            .await
            .expect("created after one retry");
        assert_eq!(record.id, "7");
        assert_eq!(record.title, "a");
    }
}
