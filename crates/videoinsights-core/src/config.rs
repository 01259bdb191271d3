use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Deserializer};
use tokio::fs;

use crate::{error::ConfigError, types::Credential};

/// Environment variables checked for the API key, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_AI_STUDIO_API_KEY"];

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Full `generateContent` URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub auth_header: AuthHeader,

    /// Language hint used when the caller does not pass one
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub on_gateway_error: GatewayErrorPolicy,

    #[serde(default, deserialize_with = "deserialize_credential")]
    pub api_key: Option<Credential>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthHeader {
    /// `Authorization: Bearer <key>`
    #[default]
    Bearer,
    /// `x-goog-api-key: <key>`
    ApiKey,
}

/// What the analyzer does when the provider call fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GatewayErrorPolicy {
    /// Return the canned fallback record and flag the result as degraded
    #[default]
    Degrade,
    /// Return the gateway error to the caller
    Propagate,
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        .to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_language() -> String {
    "auto".to_string()
}

fn deserialize_credential<'de, D>(deserializer: D) -> Result<Option<Credential>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(Credential::new))
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            auth_header: AuthHeader::default(),
            language: default_language(),
            on_gateway_error: GatewayErrorPolicy::default(),
            api_key: None,
        }
    }
}

/// `<config dir>/videoinsights/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("videoinsights")
        .join("config.toml")
}

impl AppConfig {
    /// Load the config file and apply the API key environment override.
    ///
    /// An explicit `path` must exist; the default location is optional and
    /// falls back to built-in defaults when absent.
    pub async fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path).await?,
            None => {
                let path = default_config_path();
                if fs::try_exists(&path).await.unwrap_or(false) {
                    Self::from_file(&path).await?
                } else {
                    Self::default()
                }
            }
        };
        Ok(config.with_env_credential(|name| std::env::var(name).ok()))
    }

    pub async fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml(&content).map_err(|err| match err {
            ParseFailure::Toml(source) => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            ParseFailure::Invalid(error) => error,
        })
    }

    fn from_toml(content: &str) -> Result<Self, ParseFailure> {
        let config: AppConfig = toml::from_str(content).map_err(ParseFailure::Toml)?;
        config.validate().map_err(ParseFailure::Invalid)?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                reason: "timeout_secs must be greater than zero".to_string(),
            });
        }
        url::Url::parse(&self.endpoint).map_err(|e| ConfigError::Invalid {
            reason: format!("endpoint {:?} is not a URL: {}", self.endpoint, e),
        })?;
        Ok(())
    }

    /// An API key found in the environment wins over the file
    pub fn with_env_credential(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(credential) = API_KEY_ENV_VARS
            .iter()
            .filter_map(|&name| lookup(name))
            .find_map(Credential::new)
        {
            self.api_key = Some(credential);
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug)]
enum ParseFailure {
    Toml(toml::de::Error),
    Invalid(ConfigError),
}
