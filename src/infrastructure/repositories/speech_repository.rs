use super::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Voice to synthesize with, as resolved from the language catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSelection {
    pub language_code: String,
    pub voice_name: String,
}

/// Repository for speech synthesis operations.
/// Abstracts the underlying TTS provider (Google Cloud Text-to-Speech, ...).
#[async_trait]
pub trait SpeechRepository: Send + Sync {
    /// Synthesize `text` with the given voice at natural speaking rate
    ///
    /// Returns MP3 audio bytes.
    async fn synthesize(&self, text: &str, voice: &VoiceSelection) -> Result<Vec<u8>, ProviderError>;
}
