use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path, time::Duration};
use validator::Validate;

use crate::error::{Error, Result};

pub const API_BASE_URL: &str = "https://api.cloudflare.com/client/v4/";
pub const DEFAULT_USER_AGENT: &str = "cfclient (https://github.com/felixchiasson/clouddns)";
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Credentials and connection settings, fixed once a client is built.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct ClientConfig {
    #[validate(length(min = 1, message = "email cannot be empty"))]
    pub email: String,

    #[validate(length(min = 1, message = "API key cannot be empty"))]
    pub api_key: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_content_type")]
    #[validate(length(min = 1, message = "content type cannot be empty"))]
    pub content_type: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout")]
    #[validate(range(min = 1, message = "timeout must be greater than 0"))]
    pub timeout: u64,

    #[serde(default = "default_base_url")]
    #[validate(url(message = "base URL must be a valid URL"))]
    pub base_url: String,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("email", &self.email)
            .field("api_key", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("content_type", &self.content_type)
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(email: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            api_key: api_key.into(),
            user_agent: default_user_agent(),
            content_type: default_content_type(),
            timeout: default_timeout(),
            base_url: default_base_url(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = secs;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(contents)
            .map_err(|e| Error::Configuration(format!("failed to parse config: {e}")))?;
        config.check()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!(
                "failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Runs every field rule in one pass; whitespace-only credentials count as missing.
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        if self.email.trim().is_empty() {
            return Err(Error::Configuration("email cannot be empty".into()));
        }
        if self.api_key.trim().is_empty() {
            return Err(Error::Configuration("API key cannot be empty".into()));
        }
        Ok(())
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_content_type() -> String {
    DEFAULT_CONTENT_TYPE.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_base_url() -> String {
    API_BASE_URL.to_string()
}
