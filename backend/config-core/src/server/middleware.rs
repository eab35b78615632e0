//! Request hooks shared by the API routes.

use crate::auth::session_cookie;
use crate::server::context::ServerContext;

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use log::warn;

/// Runs before anything else on API routes, authenticated or not: any
/// traffic, including keep-alive pings and failed logins, keeps the server up.
pub async fn reset_idle_timer(
    State(ctx): State<Arc<ServerContext>>,
    request: Request,
    next: Next,
) -> Response {
    ctx.idle_timer.reset();
    next.run(request).await
}

/// Reject data requests whose session cookie does not carry the token.
pub async fn require_session(
    State(ctx): State<Arc<ServerContext>>,
    request: Request,
    next: Next,
) -> Response {
    if ctx.auth.is_authorized(session_cookie(request.headers())) {
        next.run(request).await
    } else {
        warn!("Rejected unauthenticated request to {}", request.uri().path());
        StatusCode::FORBIDDEN.into_response()
    }
}
