use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use docsift_core::{constants::API_KEY_HEADER, AppError};
use std::sync::Arc;
use subtle::ConstantTimeEq;

#[derive(Clone, Default)]
pub struct AuthState {
    /// `None` disables the check entirely.
    pub api_key: Option<String>,
}

impl AuthState {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }
}

fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = auth_state.api_key.as_deref() else {
        return next.run(request).await;
    };

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(key) if secure_compare(key, expected) => next.run(request).await,
        Some(_) => {
            tracing::warn!(path = %request.uri().path(), "Rejected request with wrong API key");
            unauthorized()
        }
        None => {
            tracing::debug!(path = %request.uri().path(), "Rejected request without API key");
            unauthorized()
        }
    }
}

fn unauthorized() -> Response {
    HttpAppError(AppError::Unauthorized(
        "Invalid or missing API key".to_string(),
    ))
    .into_response()
}
