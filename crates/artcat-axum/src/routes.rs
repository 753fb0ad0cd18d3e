//! Route definitions and router construction.
//!
//! Axum 0.8 uses brace syntax for path parameters: `{id}`, `{image_id}`.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth::require_api_key;
use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Largest request body accepted, sized for several full-resolution uploads.
pub const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// JSON API routes without the `/api` prefix (nested by the caller).
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/artworks",
            get(handlers::artworks::list).post(handlers::artworks::create),
        )
        .route(
            "/artworks/{id}",
            get(handlers::artworks::get)
                .patch(handlers::artworks::update)
                .delete(handlers::artworks::remove),
        )
        .route(
            "/artworks/{id}/images-json",
            post(handlers::artworks::upload_images_json),
        )
        .route(
            "/images/{id}",
            get(handlers::images::get).delete(handlers::images::remove),
        )
        .route("/images/{id}/primary", post(handlers::images::set_primary))
}

/// HTML page routes.
pub(crate) fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::pages::index))
        .route("/artworks", post(handlers::pages::create))
        .route("/artworks/new", get(handlers::pages::new_form))
        .route("/artworks/{id}", get(handlers::pages::show))
        .route(
            "/artworks/{id}/edit",
            get(handlers::pages::edit_form).post(handlers::pages::update),
        )
        .route("/artworks/{id}/delete", post(handlers::pages::delete_artwork))
        .route("/artworks/{id}/images", post(handlers::pages::upload_images))
        .route(
            "/artworks/{id}/images/{image_id}/primary",
            post(handlers::pages::set_primary),
        )
        .route(
            "/artworks/{id}/images/{image_id}/delete",
            post(handlers::pages::delete_image),
        )
        .route(
            "/artworks/{id}/onepager.pdf",
            get(handlers::export::onepager),
        )
}

/// Create the main router: pages, `/api`, `/media` and `/health`.
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let media = ServeDir::new(&ctx.paths.media_root);
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    let api = api_routes()
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_api_key,
        ))
        .layer(cors);

    Router::new()
        .route("/health", get(health_check))
        .merge(page_routes())
        .nest("/api", api)
        .nest_service("/media", media)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
