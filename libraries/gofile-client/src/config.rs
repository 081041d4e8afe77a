//! Client configuration.

use crate::error::{GofileError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Placeholder substituted with the chosen server name in `upload_url`.
pub const SERVER_PLACEHOLDER: &str = "{server}";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Base URL for every call except uploads
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Upload host template, e.g. `https://{server}.gofile.io`
    #[serde(default = "default_upload_url")]
    pub upload_url: String,

    /// Bearer token; guest mode when absent
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Seed of the upload server shuffle
    #[serde(default)]
    pub server_seed: u64,
}

impl ClientConfig {
    /// Config pointing at a custom API host, uploads still on the default template.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_upload_url(mut self, upload_url: impl Into<String>) -> Self {
        self.upload_url = upload_url.into();
        self
    }

    pub fn with_server_seed(mut self, seed: u64) -> Self {
        self.server_seed = seed;
        self
    }

    /// Load configuration from `gofile.toml` and the environment
    pub fn load() -> Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = PathBuf::from("gofile.toml");
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        // GOFILE_TOKEN, GOFILE_API_URL, ...
        settings = settings.add_source(
            config::Environment::with_prefix("GOFILE")
                .prefix_separator("_")
                .separator("__"),
        );

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Load configuration from a single file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Check the URLs and strip trailing slashes.
    pub fn normalized(self) -> Result<Self> {
        let api_url = normalize_url(&self.api_url, "API URL")?;
        let upload_url = normalize_url(&self.upload_url, "Upload URL")?;

        if !upload_url.contains(SERVER_PLACEHOLDER) {
            return Err(GofileError::InvalidUrl(format!(
                "Upload URL must contain {}",
                SERVER_PLACEHOLDER
            )));
        }

        Ok(Self {
            api_url,
            upload_url,
            token: self.token.filter(|t| !t.is_empty()),
            ..self
        })
    }

    /// API URL for a path given as segments. Each segment is percent-encoded,
    /// so ids containing `/`, `?` or `#` stay a single segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<String> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| GofileError::InvalidUrl(format!("{}: {}", self.api_url, e)))?;
        url.path_segments_mut()
            .map_err(|()| GofileError::InvalidUrl(format!("{} cannot be a base", self.api_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }

    /// Upload host for a given server name.
    pub fn server_url(&self, server: &str) -> String {
        self.upload_url.replace(SERVER_PLACEHOLDER, server)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn normalize_url(url: &str, what: &str) -> Result<String> {
    if url.is_empty() {
        return Err(GofileError::InvalidUrl(format!("{} cannot be empty", what)));
    }

    let url = url.trim_end_matches('/');
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(GofileError::InvalidUrl(format!(
            "{} must start with http:// or https://",
            what
        )));
    }

    Ok(url.to_string())
}

// Default values
fn default_api_url() -> String {
    "https://api.gofile.io".to_string()
}

fn default_upload_url() -> String {
    "https://{server}.gofile.io".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            upload_url: default_upload_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            server_seed: 0,
        }
    }
}
