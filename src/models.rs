//! Data models and structures
//!
//! Defines the core data structures for caption requests, persisted records,
//! and process configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Prompt flavor for the caption instruction sent to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptStyle {
    Instagram,
    Linkedin,
}

impl PromptStyle {
    /// Case-insensitive parse of a form/config value.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "instagram" => Some(Self::Instagram),
            "linkedin" => Some(Self::Linkedin),
            _ => None,
        }
    }
}

/// One user action: a free-text requirement plus the uploaded image bytes.
///
/// Ephemeral; lives for the duration of a single generation.
#[derive(Debug, Clone)]
pub struct CaptionRequest {
    pub requirement: String,
    pub image_bytes: Vec<u8>,
    pub style: PromptStyle,
}

/// Transport-ready representation of an uploaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: String,
    /// Base64 (standard alphabet) of the raw upload bytes.
    pub data: String,
}

/// Durable public address returned by the media host. Opaque, authoritative.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishedImage {
    pub secure_url: String,
}

/// Persisted document capturing one completed caption generation.
///
/// Insert-only: never updated or deleted by this service, and there is no
/// idempotency key, so re-running an identical request stores a duplicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionRecord {
    pub image_url: String,
    pub captions: Vec<String>,
    pub job_description: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
}

impl CaptionRecord {
    /// Assemble a record from the model's raw text, stamped with the current
    /// UTC time.
    pub fn new(image_url: String, response_text: &str, job_description: String) -> Self {
        Self {
            image_url,
            captions: split_captions(response_text),
            job_description,
            timestamp: Utc::now(),
        }
    }
}

/// Split model output into caption candidates on newlines.
///
/// The model is not bound to any line count or structure; empty segments are
/// kept so the stored sequence matches the raw response exactly.
pub fn split_captions(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

/// What the web layer hands back to the user after a successful generation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub captions: Vec<String>,
    pub image_url: String,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub caption_model: String,
    pub cloudinary_cloud_name: String,
    pub cloudinary_api_key: String,
    pub cloudinary_api_secret: String,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub mongodb_collection: String,
    pub request_timeout: Duration,
    pub default_style: PromptStyle,
    pub credit_handle: String,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let timeout_secs = match std::env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                crate::Error::Config(format!("REQUEST_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            Err(_) => 30,
        };

        let default_style = match std::env::var("DEFAULT_STYLE") {
            Ok(raw) => PromptStyle::parse(&raw)
                .ok_or_else(|| crate::Error::Config(format!("Unknown DEFAULT_STYLE: {}", raw)))?,
            Err(_) => PromptStyle::Instagram,
        };

        Ok(Self {
            gemini_api_key: require_env("GOOGLE_GEMINI_KEY")?,
            caption_model: std::env::var("CAPTION_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            cloudinary_cloud_name: require_env("CLOUDINARY_CLOUD_NAME")?,
            cloudinary_api_key: require_env("CLOUDINARY_API_KEY")?,
            cloudinary_api_secret: require_env("CLOUDINARY_API_SECRET")?,
            mongodb_uri: require_env("MONGODB_URI")?,
            mongodb_database: std::env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "utube".to_string()),
            mongodb_collection: std::env::var("MONGODB_COLLECTION")
                .unwrap_or_else(|_| "captions".to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
            default_style,
            credit_handle: std::env::var("CAPTION_CREDIT")
                .unwrap_or_else(|_| "@yourhandle".to_string()),
        })
    }
}

fn require_env(name: &str) -> crate::Result<String> {
    std::env::var(name).map_err(|_| crate::Error::Config(format!("{} not set", name)))
}
