//! HTTP surface of the tubebrief gateway: routing, controllers, and the
//! error-to-response adapter.

pub use self::error::{Error, Result};
pub use service::AppState;

pub(crate) mod controller;
mod error;
pub(crate) mod params;
pub mod router;

use axum::Router;

/// Builds the complete application router: API routes, OpenAPI docs, CORS,
/// and the static single-page app fallback. This is the request-handling
/// entry point a managed runtime drives directly instead of binding a port.
pub fn init_router(app_state: AppState) -> Router {
    router::define_routes(app_state)
}
