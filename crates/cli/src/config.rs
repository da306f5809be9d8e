use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "taskdeck.toml";

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_url")]
    pub url: String,
}

/// Stored credentials. The access/refresh pair is written on login and
/// cleared on logout; the core logic never sees any of this.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
        }
    }
}

/// Config directory path (~/.config/taskdeck/).
pub fn config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Could not determine home directory")?;
    Ok(PathBuf::from(home).join(".config").join("taskdeck"))
}

/// Canonical config file path.
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

fn load_from(path: &Path) -> Result<CliConfig> {
    if !path.exists() {
        return Ok(CliConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    let mut config: CliConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config at {}", path.display()))?;
    if config.server.url.trim().is_empty() {
        config.server.url = default_server_url();
    }
    Ok(config)
}

fn save_to(config: &CliConfig, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config dir at {}", dir.display()))?;
    }
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config at {}", path.display()))?;
    Ok(())
}

/// Load config from disk, returning defaults if the file does not exist.
pub fn load_config() -> Result<CliConfig> {
    load_from(&config_path()?)
}

/// Save config to the canonical location.
pub fn save_config(config: &CliConfig) -> Result<()> {
    save_to(config, &config_path()?)
}

/// Print current config.
pub fn show_config() -> Result<()> {
    let config = load_config()?;
    let path = config_path()?;
    println!("Config file: {}", path.display());
    println!();
    println!("[server]");
    println!("  url = {}", config.server.url);
    println!();
    println!("[auth]");
    println!(
        "  username = {}",
        if config.auth.username.is_empty() {
            "(not set)"
        } else {
            &config.auth.username
        }
    );
    println!(
        "  access_token = {}",
        if config.auth.access_token.is_empty() {
            "(not set)".to_string()
        } else {
            format!(
                "{}...",
                &config.auth.access_token[..8.min(config.auth.access_token.len())]
            )
        }
    );
    Ok(())
}

/// Update config with provided values.
pub fn set_config(server_url: Option<String>) -> Result<()> {
    let mut config = load_config()?;

    if let Some(url) = server_url {
        config.server.url = url;
    }

    save_config(&config)?;
    println!("Configuration updated.");
    show_config()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().expect("create tempdir");
        let config = load_from(&dir.path().join(CONFIG_FILE_NAME)).expect("load defaults");
        assert_eq!(config.server.url, DEFAULT_SERVER_URL);
        assert!(config.auth.access_token.is_empty());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let dir = tempdir().expect("create tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = CliConfig::default();
        config.server.url = "https://tasks.example.com".to_string();
        config.auth.username = "alice".to_string();
        config.auth.access_token = "access-abc".to_string();
        config.auth.refresh_token = "refresh-def".to_string();

        save_to(&config, &path).expect("save config");
        let loaded = load_from(&path).expect("reload config");

        assert_eq!(loaded.server.url, "https://tasks.example.com");
        assert_eq!(loaded.auth.username, "alice");
        assert_eq!(loaded.auth.access_token, "access-abc");
        assert_eq!(loaded.auth.refresh_token, "refresh-def");
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let dir = tempdir().expect("create tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[auth]\nusername = \"bob\"\n").expect("write partial config");

        let loaded = load_from(&path).expect("load partial config");
        assert_eq!(loaded.server.url, DEFAULT_SERVER_URL);
        assert_eq!(loaded.auth.username, "bob");
    }

    #[test]
    fn empty_server_url_falls_back_to_default() {
        let dir = tempdir().expect("create tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[server]\nurl = \"\"\n").expect("write config");

        let loaded = load_from(&path).expect("load config");
        assert_eq!(loaded.server.url, DEFAULT_SERVER_URL);
    }
}
