use axum::Router;
use std::sync::Arc;

use crate::controllers::ads::AdsController;
use crate::domain::ad::AdStudioService;
use crate::domain::catalog::Catalog;
use crate::infrastructure::config::Config;
use crate::infrastructure::google::{
    write_credentials_file, CredentialsError, GoogleTokenProvider, ServiceAccountKey,
};
use crate::infrastructure::http::build_router;
use crate::infrastructure::repositories::{
    AudioStore, GeminiScriptRepository, GenerationSettings, GoogleSpeechRepository, ProviderError,
};

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Wire credentials, repositories, services and controllers into the router.
///
/// This is the single initialization step: the service-account file is written
/// here and the resulting client handles are passed down explicitly.
pub async fn build_app(config: &Config) -> Result<Router, BootstrapError> {
    // Persist the service account once and load it back as the TTS credential
    write_credentials_file(&config.credentials_path, &config.service_account_json).await?;
    let service_account = ServiceAccountKey::from_file(&config.credentials_path).await?;
    tracing::info!(
        credentials_path = %config.credentials_path.display(),
        client_email = %service_account.client_email,
        "Google service account loaded"
    );
    let token_provider = Arc::new(GoogleTokenProvider::new(service_account)?);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Catalog tables, built once
    let catalog = Arc::new(Catalog::pepsico());

    // 2. Instantiate repositories (inject clients)
    tracing::info!("Instantiating repositories...");
    let script_repo = Arc::new(GeminiScriptRepository::new(
        config.google_api_key.clone(),
        config.gemini_base_url.clone(),
        GenerationSettings {
            model: config.gemini_model.clone(),
            temperature: config.gemini_temperature,
            max_output_tokens: config.gemini_max_output_tokens,
        },
    ));
    let speech_repo = Arc::new(GoogleSpeechRepository::new(
        token_provider,
        config.tts_base_url.clone(),
    ));
    let audio_store = Arc::new(AudioStore::new(config.audio_output_path.clone()));

    // 3. Instantiate services
    tracing::info!(
        duration_policy = ?config.duration_policy,
        model = %config.gemini_model,
        "Instantiating services..."
    );
    let ad_service = Arc::new(AdStudioService::new(
        catalog,
        script_repo,
        speech_repo,
        audio_store.clone(),
        config.duration_policy,
    ));

    // 4. Instantiate controllers
    let ads_controller = Arc::new(AdsController::new(ad_service.clone(), audio_store));

    Ok(build_router(ad_service, ads_controller))
}
