use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use url::Url;

/// Overrides `api.token` from the config file when set.
pub const TOKEN_ENV_VAR: &str = "CLUSTERCTL_TOKEN";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
}

#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the clusters management API, e.g. `https://api.openshift.com`.
    pub url: Url,
    /// Bearer token sent with every request.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct IdentityConfig {
    /// ARN of the cloud identity that created the clusters to manage.
    #[serde(default)]
    pub creator_arn: Option<String>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Config {
    #[tracing::instrument(name = "config::Config::from_file", skip_all, fields(
        file_path = ?file_path.as_ref()
    ))]
    pub async fn from_file(file_path: impl AsRef<Path>) -> Result<Self> {
        let file_contents = tokio::fs::read_to_string(file_path.as_ref())
            .await
            .with_context(|| format!("reading config file {:?}", file_path.as_ref()))?;

        let config: Config = serde_yaml::from_str(&file_contents)?;

        Ok(config.with_token_override(std::env::var(TOKEN_ENV_VAR).ok()))
    }

    /// Replaces the configured token with `token` when it is non-empty.
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|token| !token.trim().is_empty()) {
            self.api.token = Some(token);
        }
        self
    }
}
