use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Form submission for POST /api/ads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdRequest {
    pub product: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_mode: Option<String>,
    pub audio_format: String,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_context: Option<String>,
}

/// Output of one pipeline run
#[derive(Debug, Clone)]
pub struct GeneratedAd {
    pub script: String,
    pub audio_path: PathBuf,
    pub audio: Vec<u8>,
    pub duration_seconds: u32,
    pub estimated_seconds: f64,
    pub word_count: usize,
    pub truncated: bool,
}
