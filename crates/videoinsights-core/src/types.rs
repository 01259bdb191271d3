use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{error::ValidationError, media::parse_video_url};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoInsight {
    pub title: String,
    pub summary: String,
    pub description: String,
    pub tags: Vec<String>,
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Minutes and seconds, e.g. "05:30"
    pub time: String,
    pub title: String,
}

impl Chapter {
    pub fn new(time: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            title: title.into(),
        }
    }
}

/// What the model is asked to look at
#[derive(Clone, PartialEq, Eq)]
pub enum MediaRef {
    RemoteUrl { url: String, video_id: String },
    InlineImage { bytes: Vec<u8> },
    InlineVideo { bytes: Vec<u8> },
}

impl MediaRef {
    pub const REMOTE_URL: &'static str = "remote-url";
    pub const INLINE_IMAGE: &'static str = "inline-image";
    pub const INLINE_VIDEO: &'static str = "inline-video";

    /// Validate a video-hosting URL and keep its extracted id
    pub fn from_url(url: &str) -> Result<Self, ValidationError> {
        let video_id = parse_video_url(url)?;
        Ok(MediaRef::RemoteUrl {
            url: url.trim().to_string(),
            video_id,
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            MediaRef::RemoteUrl { .. } => Self::REMOTE_URL,
            MediaRef::InlineImage { .. } => Self::INLINE_IMAGE,
            MediaRef::InlineVideo { .. } => Self::INLINE_VIDEO,
        }
    }
}

// Payloads can be hundreds of megabytes; only their size is worth printing.
impl fmt::Debug for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaRef::RemoteUrl { url, video_id } => f
                .debug_struct("RemoteUrl")
                .field("url", url)
                .field("video_id", video_id)
                .finish(),
            MediaRef::InlineImage { bytes } => f
                .debug_struct("InlineImage")
                .field("len", &bytes.len())
                .finish(),
            MediaRef::InlineVideo { bytes } => f
                .debug_struct("InlineVideo")
                .field("len", &bytes.len())
                .finish(),
        }
    }
}

/// Opaque bearer token for the provider. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    const PLACEHOLDER: &'static str = "your_api_key_here";

    /// Returns `None` for blank values and the config template placeholder
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == Self::PLACEHOLDER {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub media: MediaRef,
    /// ISO-ish language code, or "auto"
    pub language: String,
    pub credential: Option<Credential>,
}

impl AnalysisRequest {
    pub fn new(media: MediaRef, language: impl Into<String>, credential: Option<Credential>) -> Self {
        Self {
            media,
            language: language.into(),
            credential,
        }
    }
}
