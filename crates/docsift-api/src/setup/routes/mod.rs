//! Route configuration and setup.
//!
//! Conversion endpoints sit behind the API key check; health, service
//! metadata and the OpenAPI docs stay public.

pub(crate) mod health;

use crate::auth::{auth_middleware, AuthState};
use crate::error::hide_error_details;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use docsift_core::{constants::MULTIPART_OVERHEAD_BYTES, Config};
use docsift_infra::{make_request_span, request_id_middleware};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router<()> {
    let auth_state = Arc::new(AuthState::new(config.api_key().map(str::to_string)));
    if auth_state.api_key.is_none() {
        tracing::warn!("API_KEY is not set; conversion endpoints accept unauthenticated requests");
    }

    let body_limit = config
        .max_file_size()
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let protected_routes = protected_routes()
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum::middleware::from_fn_with_state(auth_state, auth_middleware));

    let mut app = public_routes()
        .merge(protected_routes)
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"));
    if config.is_production() {
        app = app.layer(axum::middleware::from_fn(hide_error_details));
    }

    app.layer(TraceLayer::new_for_http().make_span_with(make_request_span::<axum::body::Body>))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state)
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(health::service_info))
        .route("/health", get(health::health_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::ApiDoc::openapi()) }),
        )
}

fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/convert/markdown", post(handlers::convert::convert_markdown))
        .route("/convert/json", post(handlers::convert::convert_json))
        .route("/extract/invoice", post(handlers::invoice::extract_invoice))
}
