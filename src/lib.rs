use axum::{
    Router,
    http::HeaderValue,
    routing::get,
};
use std::error::Error;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::handler::{AppState, healthcheck};
use crate::marks::Collection;

pub mod config;
pub mod db;
pub mod error;
pub mod handler;
pub mod marks;

/// Browser access is limited to the configured origins; any method and
/// header is allowed from them.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "ignoring invalid cors origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub fn app(state: AppState, cfg: &Config) -> Router {
    Router::new()
        .route("/", get(healthcheck))
        .nest("/favorites", marks::routes(Collection::Favorites))
        .nest("/watched", marks::routes(Collection::Watched))
        .layer(cors_layer(&cfg.app.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn unpack_error(err: &(dyn Error)) -> String {
    let mut parts = Vec::new();
    parts.push(err.to_string());
    let mut current = err.source();
    while let Some(source) = current {
        parts.push(source.to_string());
        current = source.source();
    }
    parts.join(": ")
}
