//! Shared client plumbing for authenticated commands: build an [`ApiClient`]
//! from config, and refresh-then-retry once on a 401.

use std::future::Future;
use std::time::Duration;

use anyhow::{Result, bail};

use taskdeck_api::RefreshRequest;
use taskdeck_api_client::{ApiClient, HttpError};

use crate::config::{self, CliConfig};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build a client for the configured server, with the stored access token
/// attached when present.
pub fn build_client(config: &CliConfig) -> Result<ApiClient> {
    let mut client = ApiClient::new(&config.server.url, REQUEST_TIMEOUT)?;
    if !config.auth.access_token.trim().is_empty() {
        client.set_auth(config.auth.access_token.clone());
    }
    Ok(client)
}

/// Run an authenticated call. On a 401 the stored refresh token is used to
/// obtain a new access token (persisted back to config) and the call is
/// retried once; a second failure or a failed refresh means the session is
/// gone and the user has to log in again.
pub async fn with_reauth<T, F, Fut>(config: &mut CliConfig, call: F) -> Result<T>
where
    F: Fn(ApiClient) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if config.auth.access_token.trim().is_empty() {
        bail!("Not logged in. Run `taskdeck login` first.");
    }

    match call(build_client(config)?).await {
        Err(err) if is_unauthorized(&err) => {
            refresh_access_token(config).await?;
            call(build_client(config)?).await
        }
        other => other,
    }
}

fn is_unauthorized(err: &anyhow::Error) -> bool {
    err.downcast_ref::<HttpError>()
        .is_some_and(HttpError::is_unauthorized)
}

async fn refresh_access_token(config: &mut CliConfig) -> Result<()> {
    if config.auth.refresh_token.trim().is_empty() {
        bail!("Session expired. Run `taskdeck login` again.");
    }

    let client = build_client(config)?;
    let resp = client
        .refresh(&RefreshRequest {
            refresh: config.auth.refresh_token.clone(),
        })
        .await
        .map_err(|_| anyhow::anyhow!("Session expired. Run `taskdeck login` again."))?;

    config.auth.access_token = resp.access;
    config::save_config(config)?;
    Ok(())
}
