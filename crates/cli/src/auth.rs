use anyhow::{Context, Result};
use dialoguer::{Input, Password};

use taskdeck_api::LoginRequest;
use taskdeck_api_client::HttpError;

use crate::config::{AuthConfig, load_config, save_config};
use crate::remote::build_client;

/// Log in against the token endpoint and persist the access/refresh pair.
pub async fn run_login(username: Option<String>) -> Result<()> {
    let mut config = load_config()?;

    let username = match username {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .context("Failed to read username")?,
    };
    let password = Password::new()
        .with_prompt("Password")
        .interact()
        .context("Failed to read password")?;

    let client = build_client(&config)?;
    let tokens = client
        .login(&LoginRequest {
            username: username.clone(),
            password,
        })
        .await
        .map_err(|err| match err.downcast_ref::<HttpError>() {
            Some(http) if http.is_unauthorized() => {
                anyhow::anyhow!("Login failed: {}", http.message)
            }
            _ => err.context(format!("Could not reach {}", config.server.url)),
        })?;

    config.auth = AuthConfig {
        username: username.clone(),
        access_token: tokens.access,
        refresh_token: tokens.refresh,
    };
    save_config(&config)?;

    println!("Logged in as {username}.");
    Ok(())
}

/// Forget the stored tokens.
pub fn run_logout() -> Result<()> {
    let mut config = load_config()?;
    config.auth = AuthConfig::default();
    save_config(&config)?;
    println!("Logged out.");
    Ok(())
}
