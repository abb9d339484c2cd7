use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use scribe_sdk::Scribe;

use crate::handler::{self, AppState};

/// Build the axum router with all Scribe endpoints.
pub fn build_router(scribe: Scribe) -> Router {
    let state = AppState::new(scribe);
    Router::new()
        .route("/health", get(handler::health_handler))
        .route("/info", get(handler::info_handler))
        .route(
            "/authors",
            get(handler::list_authors).post(handler::create_author),
        )
        .route(
            "/authors/:id",
            get(handler::get_author)
                .put(handler::update_author)
                .delete(handler::delete_author),
        )
        .route(
            "/blogposts",
            get(handler::list_blogposts).post(handler::create_blogpost),
        )
        .route(
            "/blogposts/:id",
            get(handler::get_blogpost)
                .put(handler::update_blogpost)
                .delete(handler::delete_blogpost),
        )
        .route("/blogposts/:id/comments", post(handler::add_comment))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// CORS layer for the configured origins. No origins means any origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(%origin, "ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };
    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
