use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::ad::AdStudioService;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(service): State<Arc<AdStudioService>>) -> impl IntoResponse {
    let catalog = service.catalog();
    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "model": service.model(),
            "catalog": {
                "products": catalog.products().len(),
                "story_modes": catalog.story_modes().len(),
                "audio_formats": catalog.audio_formats().len(),
                "languages": catalog.languages().len(),
            }
        })),
    )
}
