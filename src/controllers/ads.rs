use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::{
        ad::{AdRequest, AdStudioApi, AdStudioService},
        catalog::CatalogOptions,
    },
    error::{AppError, AppResult},
    infrastructure::repositories::AudioStore,
};

/// Response for POST /api/ads
#[derive(Debug, Serialize, Deserialize)]
pub struct AdResponse {
    pub script: String,
    pub audio_path: String,
    pub duration_seconds: u32,
    pub estimated_seconds: f64,
    pub word_count: usize,
    pub truncated: bool,
    pub audio_base64: String,
}

pub struct AdsController {
    ad_service: Arc<AdStudioService>,
    audio_store: Arc<AudioStore>,
}

impl AdsController {
    pub fn new(ad_service: Arc<AdStudioService>, audio_store: Arc<AudioStore>) -> Self {
        Self {
            ad_service,
            audio_store,
        }
    }

    /// GET /api/catalog - Choices offered by the studio form
    pub async fn get_catalog(
        State(controller): State<Arc<AdsController>>,
    ) -> Json<CatalogOptions> {
        Json(controller.ad_service.catalog().options())
    }

    /// POST /api/ads - Generate a script and its audio
    pub async fn generate(
        State(controller): State<Arc<AdsController>>,
        Json(request): Json<AdRequest>,
    ) -> AppResult<Json<AdResponse>> {
        let ad = controller
            .ad_service
            .generate(request)
            .await
            .map_err(AppError::from)?;

        Ok(Json(AdResponse {
            audio_base64: STANDARD.encode(&ad.audio),
            script: ad.script,
            audio_path: ad.audio_path.display().to_string(),
            duration_seconds: ad.duration_seconds,
            estimated_seconds: ad.estimated_seconds,
            word_count: ad.word_count,
            truncated: ad.truncated,
        }))
    }

    /// GET /api/ads/audio - Latest generated audio artifact
    pub async fn get_audio(
        State(controller): State<Arc<AdsController>>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let audio = controller
            .audio_store
            .load()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read audio: {}", e)))?
            .ok_or_else(|| AppError::NotFound("No audio generated yet".to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/mpeg"));
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

        Ok((StatusCode::OK, headers, Body::from(audio)))
    }
}
