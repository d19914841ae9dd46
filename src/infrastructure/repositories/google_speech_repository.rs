use super::speech_repository::{SpeechRepository, VoiceSelection};
use super::ProviderError;
use crate::infrastructure::google::GoogleTokenProvider;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const PROVIDER: &str = "Google TTS";

/// Google caps synthesis input at 5000 bytes per request
pub const MAX_INPUT_BYTES: usize = 5000;

const SPEAKING_RATE: f32 = 1.0;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelectionParams<'a>,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelectionParams<'a> {
    language_code: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
    speaking_rate: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: Option<String>,
}

/// Google Cloud Text-to-Speech implementation of the speech repository
pub struct GoogleSpeechRepository {
    http_client: reqwest::Client,
    token_provider: Arc<GoogleTokenProvider>,
    base_url: String,
}

impl GoogleSpeechRepository {
    pub fn new(token_provider: Arc<GoogleTokenProvider>, base_url: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            token_provider,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl SpeechRepository for GoogleSpeechRepository {
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceSelection,
    ) -> Result<Vec<u8>, ProviderError> {
        let start_time = std::time::Instant::now();

        if text.len() > MAX_INPUT_BYTES {
            return Err(ProviderError::Rejected(format!(
                "Script is {} bytes, Google TTS accepts at most {}",
                text.len(),
                MAX_INPUT_BYTES
            )));
        }

        tracing::info!(
            language_code = %voice.language_code,
            voice = %voice.voice_name,
            text_length = text.len(),
            "Calling Google Text-to-Speech"
        );

        let token = self.token_provider.access_token().await?;

        let request = SynthesizeRequest {
            input: SynthesisInput { text },
            voice: VoiceSelectionParams {
                language_code: &voice.language_code,
                name: &voice.voice_name,
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
                speaking_rate: SPEAKING_RATE,
            },
        };

        let response = self
            .http_client
            .post(format!("{}/v1/text:synthesize", self.base_url))
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::from_transport(PROVIDER, e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            if status == reqwest::StatusCode::UNAUTHORIZED {
                // Revoked or expired early; the next request mints a new token
                self.token_provider.invalidate().await;
            }
            let err = ProviderError::from_status(PROVIDER, status, &error_text);
            tracing::error!(
                error = %err,
                voice = %voice.voice_name,
                "Google TTS call failed"
            );
            return Err(err);
        }

        let body: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(format!("Failed to parse TTS response: {}", e)))?;

        let audio = decode_audio(body)?;

        tracing::info!(
            provider = "google",
            voice = %voice.voice_name,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            audio_size_bytes = audio.len(),
            "TTS synthesis completed"
        );

        Ok(audio)
    }
}

fn decode_audio(body: SynthesizeResponse) -> Result<Vec<u8>, ProviderError> {
    let content = body
        .audio_content
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ProviderError::Malformed("Google TTS returned no audio".to_string()))?;

    STANDARD
        .decode(content)
        .map_err(|e| ProviderError::Malformed(format!("Invalid base64 audio: {}", e)))
}
