use super::dto::{AdRequest, GeneratedAd};
use super::duration::DurationPolicy;
use super::error::AdServiceError;
use super::prompt::build_marketing_prompt;
use crate::domain::catalog::Catalog;
use crate::infrastructure::repositories::{
    AudioStore, ScriptRepository, SpeechRepository, VoiceSelection,
};
use async_trait::async_trait;
use std::sync::Arc;

pub struct AdStudioService {
    catalog: Arc<Catalog>,
    script_repo: Arc<dyn ScriptRepository>,
    speech_repo: Arc<dyn SpeechRepository>,
    audio_store: Arc<AudioStore>,
    duration_policy: DurationPolicy,
}

impl AdStudioService {
    pub fn new(
        catalog: Arc<Catalog>,
        script_repo: Arc<dyn ScriptRepository>,
        speech_repo: Arc<dyn SpeechRepository>,
        audio_store: Arc<AudioStore>,
        duration_policy: DurationPolicy,
    ) -> Self {
        Self {
            catalog,
            script_repo,
            speech_repo,
            audio_store,
            duration_policy,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn model(&self) -> &str {
        self.script_repo.model()
    }
}

#[async_trait]
pub trait AdStudioApi: Send + Sync {
    /// Generate a brand-safe audio ad
    ///
    /// This operation:
    /// - Resolves the form labels against the catalog
    /// - Builds the copywriting prompt and generates a script
    /// - Trims the script to the format's duration
    /// - Synthesizes speech and overwrites the audio artifact
    ///
    /// Any failing stage fails the whole run; nothing partial is returned.
    async fn generate(&self, request: AdRequest) -> Result<GeneratedAd, AdServiceError>;
}

#[async_trait]
impl AdStudioApi for AdStudioService {
    async fn generate(&self, request: AdRequest) -> Result<GeneratedAd, AdServiceError> {
        tracing::info!(
            product = %request.product,
            story_mode = ?request.story_mode,
            audio_format = %request.audio_format,
            language = %request.language,
            has_campaign_context = request.campaign_context.is_some(),
            "Ad generation request"
        );

        // 1. Resolve labels
        let ad = self.catalog.resolve(
            &request.product,
            request.story_mode.as_deref(),
            &request.audio_format,
            &request.language,
        )?;

        // 2. Build prompt
        let prompt = build_marketing_prompt(&ad, request.campaign_context.as_deref());

        // 3. Generate script
        let generated = self
            .script_repo
            .generate(&prompt)
            .await
            .map_err(AdServiceError::Generation)?;

        // 4. Enforce duration
        let script = self.duration_policy.enforce(&generated, ad.duration_seconds);
        let word_count = script.split_whitespace().count();
        let truncated = script != generated;

        if truncated {
            tracing::info!(
                generated_words = generated.split_whitespace().count(),
                kept_words = word_count,
                target_seconds = ad.duration_seconds,
                "Script truncated to fit duration"
            );
        }
        if script.is_empty() {
            tracing::warn!(
                target_seconds = ad.duration_seconds,
                "Script is empty after duration enforcement"
            );
        }

        // 5. Synthesize and persist audio
        let voice = VoiceSelection {
            language_code: ad.language_code.clone(),
            voice_name: ad.voice_name.clone(),
        };
        let audio = self
            .speech_repo
            .synthesize(&script, &voice)
            .await
            .map_err(AdServiceError::Synthesis)?;
        let audio_path = self.audio_store.save(&audio).await?;

        tracing::info!(
            product = %ad.product,
            word_count = word_count,
            audio_size = audio.len(),
            audio_path = %audio_path.display(),
            "Ad generated"
        );

        Ok(GeneratedAd {
            estimated_seconds: self.duration_policy.estimate_seconds(&script),
            script,
            audio_path,
            audio,
            duration_seconds: ad.duration_seconds,
            word_count,
            truncated,
        })
    }
}
