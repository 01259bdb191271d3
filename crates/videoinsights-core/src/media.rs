//! Video-hosting URL recognition.
//!
//! Two shapes are accepted: `youtube.com/watch?v=<id>` (any subdomain, any
//! other query parameters) and the short link `youtu.be/<id>`.

use url::Url;

use crate::error::ValidationError;

/// Extract the video id from a recognized video-hosting URL
pub fn parse_video_url(url: &str) -> Result<String, ValidationError> {
    let raw = url.trim();
    let parsed = Url::parse(raw).map_err(|e| ValidationError::InvalidVideoUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    let host = parsed
        .host_str()
        .map(|h| h.to_ascii_lowercase())
        .ok_or_else(|| ValidationError::InvalidVideoUrl {
            url: raw.to_string(),
            reason: "missing host".to_string(),
        })?;

    let id = if host.contains("youtube.com") {
        parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
    } else if host == "youtu.be" {
        parsed
            .path_segments()
            .and_then(|mut segments| segments.next())
            .map(str::to_string)
    } else {
        return Err(ValidationError::UnsupportedHost {
            url: raw.to_string(),
        });
    };

    match id {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(ValidationError::MissingVideoId {
            url: raw.to_string(),
        }),
    }
}
