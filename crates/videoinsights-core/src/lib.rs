//! VideoInsights Core Library
//!
//! Asks a multimodal Gemini model about a video (YouTube link, still frame or
//! inline clip) and turns its free-text answer into a title, summary,
//! description, tags and timestamped chapters.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod format;
pub mod gateway;
pub mod media;
pub mod request;
pub mod types;

// Re-export commonly used items at crate root
pub use analyzer::{Analysis, DegradeReason, Outcome, VideoAnalyzer};
pub use config::{AppConfig, AuthHeader, GatewayErrorPolicy, default_config_path};
pub use error::{ConfigError, GatewayError, Result, ValidationError, VideoInsightsError};
pub use extract::{default_chapters, extract};
pub use fallback::{Locale, synthesize};
pub use format::{format_insight_readable, save_insight};
pub use gateway::{GeminiGateway, ModelGateway};
pub use media::parse_video_url;
pub use request::{MAX_INLINE_BYTES, ProviderRequest, build_request, check_inline_size};
pub use types::{AnalysisRequest, Chapter, Credential, MediaRef, VideoInsight};
