use std::time::Duration;

use anyhow::{Context, Result};
use tracing::warn;

use crate::client::response_error;

/// Backoff schedule for create-style POSTs: one attempt per delay slot plus
/// the initial try.
pub struct RetryConfig {
    pub delays: Vec<u64>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            delays: vec![1, 2, 4],
        }
    }
}

impl RetryConfig {
    fn max_attempts(&self) -> usize {
        self.delays.len() + 1
    }
}

/// POST a JSON body with exponential backoff.
///
/// Network errors and 5xx responses are retried on the configured schedule;
/// once it is exhausted the last 5xx comes back as a typed
/// [`HttpError`](crate::HttpError). A 4xx means the request itself is bad
/// and is surfaced immediately with the backend's `detail` message instead
/// of being retried.
pub async fn post_json_with_retry(
    client: &reqwest::Client,
    url: &str,
    auth_token: &str,
    body: &serde_json::Value,
    config: &RetryConfig,
) -> Result<reqwest::Response> {
    for attempt in 0..config.max_attempts() {
        let req = client.post(url).bearer_auth(auth_token).json(body);
        match req.send().await {
            Ok(resp) if resp.status().is_server_error() => {
                if attempt < config.delays.len() {
                    warn!(
                        "POST {} attempt {}/{} failed (HTTP {}), retrying in {}s",
                        url,
                        attempt + 1,
                        config.max_attempts(),
                        resp.status(),
                        config.delays[attempt],
                    );
                    tokio::time::sleep(Duration::from_secs(config.delays[attempt])).await;
                } else {
                    return Err(response_error(resp).await);
                }
            }
            Ok(resp) if !resp.status().is_success() => return Err(response_error(resp).await),
            Ok(resp) => return Ok(resp),
            Err(e) => {
                if attempt < config.delays.len() {
                    warn!(
                        "POST {} attempt {}/{} failed ({}), retrying in {}s",
                        url,
                        attempt + 1,
                        config.max_attempts(),
                        e,
                        config.delays[attempt],
                    );
                    tokio::time::sleep(Duration::from_secs(config.delays[attempt])).await;
                } else {
                    return Err(e).context("Failed to connect after retries");
                }
            }
        }
    }

    unreachable!()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::HttpError;
    use crate::testutil::spawn_sequence;

    fn no_wait() -> RetryConfig {
        RetryConfig { delays: vec![0, 0] }
    }

    #[tokio::test]
    async fn server_errors_are_retried_until_success() {
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

        let client = reqwest::Client::new();
        let body = serde_json::json!({"title": "a", "priority": "medium"});
        let resp =
            post_json_with_retry(&client, &format!("{base}/api/tasks/"), "tok", &body, &no_wait())
                .await
                .expect("second attempt succeeds");
        assert_eq!(resp.status().as_u16(), 201);
    }

    #[tokio::test]
    async fn client_errors_short_circuit_with_the_backend_detail() {
        let base = spawn_sequence(vec![
            "HTTP/1.1 400 Bad Request\r\n\
             Content-Type: application/json\r\n\
             Content-Length: 36\r\n\
             Connection: close\r\n\r\n\
             {\"detail\": \"title may not be blank\"}",
        ])
        .await;

        let client = reqwest::Client::new();
        let body = serde_json::json!({"title": ""});
        let err =
            post_json_with_retry(&client, &format!("{base}/api/tasks/"), "tok", &body, &no_wait())
                .await
                .expect_err("400 is terminal");
        let http = err.downcast_ref::<HttpError>().expect("typed error");
        assert_eq!(http.status, 400);
        assert_eq!(http.message, "title may not be blank");
    }

    #[tokio::test]
    async fn exhausted_retries_surface_the_last_server_error() {
        let failure = "HTTP/1.1 503 Service Unavailable\r\n\
             Content-Length: 0\r\n\
             Connection: close\r\n\r\n";
        let base = spawn_sequence(vec![failure, failure, failure]).await;

        let client = reqwest::Client::new();
        let body = serde_json::json!({"title": "a"});
        let err =
            post_json_with_retry(&client, &format!("{base}/api/tasks/"), "tok", &body, &no_wait())
                .await
                .expect_err("schedule exhausted");
        let http = err.downcast_ref::<HttpError>().expect("typed error");
        assert_eq!(http.status, 503);
    }
}
