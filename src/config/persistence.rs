//! Config file and auth file loading, credential resolution.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::types::{Credentials, ProbeConfig};
use crate::error::ProbeError;

/// `config.json` next to the executable.
pub fn default_config_path() -> Result<PathBuf> {
    let exe_dir = std::env::current_exe()?
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine executable directory"))?
        .to_path_buf();
    Ok(exe_dir.join("config.json"))
}

/// Load the probe configuration.
///
/// An explicit path must exist. Without one, `config.json` next to the
/// executable is used if present, otherwise the built-in defaults.
pub async fn load_config(path: Option<&Path>) -> Result<ProbeConfig> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let default_path = default_config_path()?;
            if !default_path.exists() {
                debug!("No config file at {:?}, using defaults", default_path);
                return Ok(ProbeConfig::default());
            }
            default_path
        }
    };

    let content = tokio::fs::read_to_string(&config_path)
        .await
        .with_context(|| format!("Failed to read config: {:?}", config_path))?;
    let config: ProbeConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config JSON: {:?}", config_path))?;

    info!("Loaded configuration from: {:?}", config_path);
    Ok(config)
}

/// Read `{ "username": ..., "password": ... }` from an auth file.
pub async fn load_auth_file(path: &Path) -> Result<Credentials> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read auth file: {:?}", path))?;
    let mut credentials: Credentials = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse auth file JSON: {:?}", path))?;

    credentials.password = sanitize_password(&credentials.password);
    Ok(credentials)
}

/// Strip shell quoting left around the password and drop backslashes.
pub fn sanitize_password(raw: &str) -> String {
    raw.trim_matches('\'').replace('\\', "")
}

/// Pick the racadm login: the auth file takes precedence over `-u`/`-p`,
/// which must then both be present.
pub async fn resolve_credentials(
    authfile: Option<&Path>,
    username: Option<&str>,
    password: Option<&str>,
) -> Result<Credentials, ProbeError> {
    if let Some(path) = authfile {
        let credentials = load_auth_file(path).await?;
        debug!("Using credentials from auth file {:?}", path);
        return Ok(credentials);
    }

    match (username, password) {
        (Some(username), Some(password)) => Ok(Credentials {
            username: username.to_string(),
            password: sanitize_password(password),
        }),
        _ => Err(ProbeError::Validation(
            "--username and --password are required unless --authfile is given".to_string(),
        )),
    }
}
