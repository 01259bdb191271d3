use base64::{Engine, engine::general_purpose::STANDARD};
use serde::Serialize;

use crate::{error::ValidationError, media::parse_video_url, types::MediaRef};

pub const TEMPERATURE: f64 = 0.4;
pub const MAX_OUTPUT_TOKENS: u32 = 2048;
/// Largest inline image or video accepted (500 MB)
pub const MAX_INLINE_BYTES: u64 = 500 * 1024 * 1024;

static ANALYSIS_PROMPT: &str = r#"Provide the following in a structured format:
1. A suggested title (engaging and descriptive)
2. A text response summarizing the main content and key points
3. A detailed description with 2-3 paragraphs
4. Relevant hashtags and tags (max 8)
5. Chapter divisions with timestamps (at least 5 sections)

For each section, provide appropriate information based on the actual content of the video.
Format your response with clear section headers."#;

/// Gemini `generateContent` request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
    FileData { file_data: FileData },
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    /// base64 encoded payload
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileData {
    pub mime_type: String,
    pub file_uri: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

/// Build the provider request for one piece of media
pub fn build_request(media: &MediaRef, language: &str) -> Result<ProviderRequest, ValidationError> {
    let (subject, media_part) = match media {
        MediaRef::RemoteUrl { url, .. } => {
            parse_video_url(url)?;
            (
                format!("Analyze this YouTube video with URL: {}.", url.trim()),
                Part::FileData {
                    file_data: FileData {
                        mime_type: "video/*".to_string(),
                        file_uri: url.trim().to_string(),
                    },
                },
            )
        }
        MediaRef::InlineImage { bytes } => (
            "Analyze this video frame. This is a still taken from a video; describe what the video likely contains.".to_string(),
            inline_part(bytes, "image/jpeg", media.kind())?,
        ),
        MediaRef::InlineVideo { bytes } => (
            "Analyze this video file.".to_string(),
            inline_part(bytes, "video/mp4", media.kind())?,
        ),
    };

    let mut instruction = format!("{}\n{}", subject, ANALYSIS_PROMPT);
    if let Some(name) = language_name(language) {
        instruction.push_str(&format!("\nWrite ALL text content in {} language.", name));
    }

    Ok(ProviderRequest {
        contents: vec![Content {
            parts: vec![Part::Text { text: instruction }, media_part],
        }],
        generation_config: GenerationConfig::default(),
    })
}

/// Reject inline payloads over [`MAX_INLINE_BYTES`]; callers can check a
/// file's size before reading it
pub fn check_inline_size(kind: &'static str, len: u64) -> Result<(), ValidationError> {
    if len > MAX_INLINE_BYTES {
        return Err(ValidationError::PayloadTooLarge {
            kind,
            len,
            max: MAX_INLINE_BYTES,
        });
    }
    Ok(())
}

fn inline_part(bytes: &[u8], mime_type: &str, kind: &'static str) -> Result<Part, ValidationError> {
    if bytes.is_empty() {
        return Err(ValidationError::EmptyPayload { kind });
    }
    check_inline_size(kind, bytes.len() as u64)?;
    Ok(Part::InlineData {
        inline_data: InlineData {
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(bytes),
        },
    })
}

/// Human name for a language hint; `None` lets the model pick
fn language_name(hint: &str) -> Option<String> {
    let hint = hint.trim();
    if hint.is_empty() || hint.eq_ignore_ascii_case("auto") {
        return None;
    }
    let primary = hint
        .split(['-', '_'])
        .next()
        .unwrap_or(hint)
        .to_ascii_lowercase();
    let name = match primary.as_str() {
        "en" => "English",
        "he" | "iw" => "Hebrew",
        "ar" => "Arabic",
        "es" => "Spanish",
        "fr" => "French",
        "de" => "German",
        "ru" => "Russian",
        "uk" => "Ukrainian",
        "pt" => "Portuguese",
        "it" => "Italian",
        "ja" => "Japanese",
        "zh" => "Chinese",
        _ => return Some(hint.to_string()),
    };
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_url_envelope() {
        let media = MediaRef::from_url("https://youtube.com/watch?v=xyz").unwrap();
        let request = build_request(&media, "auto").unwrap();
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["generationConfig"]["temperature"], 0.4);
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 2048);

        let parts = value["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        let text = parts[0]["text"].as_str().unwrap();
        assert!(text.contains("https://youtube.com/watch?v=xyz"));
        assert!(text.contains("1. A suggested title"));
        assert!(text.contains("5. Chapter divisions with timestamps"));
        assert!(!text.contains("Write ALL text content"));
        assert_eq!(
            parts[1]["file_data"]["file_uri"],
            "https://youtube.com/watch?v=xyz"
        );
    }

    #[test]
    fn test_remote_url_is_revalidated() {
        let media = MediaRef::RemoteUrl {
            url: "https://example.com/x".to_string(),
            video_id: "x".to_string(),
        };
        assert!(matches!(
            build_request(&media, "en"),
            Err(ValidationError::UnsupportedHost { .. })
        ));
    }

    #[test]
    fn test_inline_payloads_are_base64() {
        let image = MediaRef::InlineImage {
            bytes: b"jpeg".to_vec(),
        };
        let value = serde_json::to_value(build_request(&image, "en").unwrap()).unwrap();
        let part = &value["contents"][0]["parts"][1]["inline_data"];
        assert_eq!(part["mime_type"], "image/jpeg");
        assert_eq!(part["data"], "anBlZw==");

        let video = MediaRef::InlineVideo {
            bytes: vec![0, 1, 2],
        };
        let value = serde_json::to_value(build_request(&video, "en").unwrap()).unwrap();
        assert_eq!(
            value["contents"][0]["parts"][1]["inline_data"]["mime_type"],
            "video/mp4"
        );
    }

    #[test]
    fn test_empty_payload_is_rejected() {
        let media = MediaRef::InlineVideo { bytes: Vec::new() };
        assert_eq!(
            build_request(&media, "en").unwrap_err(),
            ValidationError::EmptyPayload {
                kind: "inline-video"
            }
        );
    }

    #[test]
    fn test_inline_size_limit() {
        assert!(check_inline_size(MediaRef::INLINE_VIDEO, MAX_INLINE_BYTES).is_ok());
        assert_eq!(
            check_inline_size(MediaRef::INLINE_VIDEO, MAX_INLINE_BYTES + 1).unwrap_err(),
            ValidationError::PayloadTooLarge {
                kind: "inline-video",
                len: MAX_INLINE_BYTES + 1,
                max: MAX_INLINE_BYTES,
            }
        );
    }

    #[test]
    fn test_oversized_payload_fails_before_encoding() {
        let media = MediaRef::InlineImage {
            bytes: vec![0; MAX_INLINE_BYTES as usize + 1],
        };
        assert!(matches!(
            build_request(&media, "en"),
            Err(ValidationError::PayloadTooLarge {
                kind: "inline-image",
                ..
            })
        ));
    }

    #[test]
    fn test_language_line() {
        let media = MediaRef::InlineImage { bytes: vec![1] };
        let request = build_request(&media, "he-IL").unwrap();
        let Part::Text { text } = &request.contents[0].parts[0] else {
            panic!("first part should be the instruction");
        };
        assert!(text.ends_with("Write ALL text content in Hebrew language."));

        assert_eq!(language_name("auto"), None);
        assert_eq!(language_name("AUTO"), None);
        assert_eq!(language_name("ar").as_deref(), Some("Arabic"));
        assert_eq!(language_name("tlh").as_deref(), Some("tlh"));
    }
}
