//! Static bearer-token check for `/secure/*` routes.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::MessageResponse;

#[derive(Clone)]
pub struct AuthState {
    expected: Arc<String>,
}

impl AuthState {
    pub fn new(token: &str) -> Self {
        Self {
            expected: Arc::new(format!("Bearer {token}")),
        }
    }
}

/// 401 when the header is missing or not a bearer credential, 403 when the
/// token does not match.
pub async fn require_bearer(
    State(auth): State<AuthState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned);

    match authorization.as_deref() {
        Some(value) if value == auth.expected.as_str() => next.run(request).await,
        Some(value) if value.starts_with("Bearer") => {
            warn!(path = %request.uri().path(), "rejected bearer token");
            MessageResponse::new(StatusCode::FORBIDDEN, "forbidden").into_response()
        }
        _ => {
            warn!(path = %request.uri().path(), "missing bearer token");
            MessageResponse::new(StatusCode::UNAUTHORIZED, "unauthorized").into_response()
        }
    }
}
