use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod request_id;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

use crate::controllers::{ads::AdsController, health};
use crate::domain::ad::AdStudioService;
use crate::infrastructure::config::Config;

/// Build the application router with all routes configured
pub fn build_router(ad_service: Arc<AdStudioService>, ads_controller: Arc<AdsController>) -> Router {
    let ads_routes = Router::new()
        .route("/api/catalog", get(AdsController::get_catalog))
        .route("/api/ads", axum::routing::post(AdsController::generate))
        .route("/api/ads/audio", get(AdsController::get_audio))
        .with_state(ads_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(ad_service)
        .merge(ads_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
