use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid video URL {url}: {reason}")]
    InvalidVideoUrl { url: String, reason: String },

    #[error("Unsupported video host in {url}")]
    UnsupportedHost { url: String },

    #[error("No video id found in {url}")]
    MissingVideoId { url: String },

    #[error("Empty {kind} payload")]
    EmptyPayload { kind: &'static str },

    #[error("The {kind} payload is {len} bytes, the limit is {max}")]
    PayloadTooLarge {
        kind: &'static str,
        len: u64,
        max: u64,
    },
}

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Missing API key: set api_key in the config or GEMINI_API_KEY")]
    Auth,

    #[error("Could not reach the provider (timed out: {timed_out}): {source}")]
    Transport {
        timed_out: bool,
        #[source]
        source: reqwest::Error,
    },

    #[error("Provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("Provider response contained no text")]
    EmptyResponse,

    #[error("Provider response was not valid JSON: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

impl From<reqwest::Error> for GatewayError {
    fn from(source: reqwest::Error) -> Self {
        GatewayError::Transport {
            timed_out: source.is_timeout(),
            source,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config: {reason}")]
    Invalid { reason: String },
}

#[derive(Error, Debug)]
pub enum VideoInsightsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VideoInsightsError>;
