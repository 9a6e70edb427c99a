use crate::controller::{
    health_check_controller, summary_controller, transcript_controller,
};
use crate::AppState;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path must be listed here.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tubebrief Gateway API"
    ),
    paths(
        transcript_controller::get_transcript,
        summary_controller::get_summary,
        health_check_controller::health_check,
    ),
    tags(
        (name = "tubebrief", description = "Video transcript & summary gateway API")
    )
)]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    let cors = cors_layer(&app_state);
    let static_dir = app_state.config.static_dir().to_string();

    Router::new()
        .merge(transcript_routes(app_state.clone()))
        .merge(summary_routes(app_state.clone()))
        .merge(health_routes())
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
        .fallback_service(static_routes(&static_dir))
        .layer(cors)
}

fn transcript_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/transcript",
            get(transcript_controller::get_transcript),
        )
        .with_state(app_state)
}

fn summary_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/summary", get(summary_controller::get_summary))
        .with_state(app_state)
}

fn health_routes() -> Router {
    Router::new().route("/api/health", get(health_check_controller::health_check))
}

/// Serves the bundled single-page app; the directory index covers `GET /`.
pub fn static_routes(static_dir: &str) -> ServeDir {
    ServeDir::new(static_dir)
}

fn cors_layer(app_state: &AppState) -> CorsLayer {
    let origins = &app_state.config.allowed_origins;
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
