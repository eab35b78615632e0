//! HTTP handlers for the login handshake, settings, symbol tables and pages.

use crate::auth::session_cookie_header;
use crate::persistence::{Config, TextResource};
use crate::server::ack::Ack;
use crate::server::context::ServerContext;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, Path, Request, State};
use axum::http::StatusCode;
use axum::http::header::{LOCATION, SET_COOKIE};
use axum::response::{IntoResponse, Response};
use log::{error, warn};
use serde::Deserialize;
use serde_json::Value;
use tower::ServiceExt;
use tower_http::services::ServeFile;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    token: String,
}

/// `POST /login/{page}`: on a matching token set the session cookie and
/// redirect to `/{page}.html`; otherwise answer an empty 200.
///
/// A body that is not a form counts as a wrong token.
pub async fn login(
    State(ctx): State<Arc<ServerContext>>,
    Path(page): Path<String>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Response {
    let token = match form {
        Ok(Form(form)) => form.token,
        Err(rejection) => {
            warn!("Login body rejected: {rejection}");
            String::new()
        }
    };

    if !ctx.auth.login(&token) {
        return StatusCode::OK.into_response();
    }

    (
        StatusCode::FOUND,
        [
            (SET_COOKIE, session_cookie_header(ctx.auth.token())),
            (LOCATION, format!("/{page}.html")),
        ],
    )
        .into_response()
}

pub async fn get_config(State(ctx): State<Arc<ServerContext>>) -> Json<Config> {
    Json(ctx.store.load_config())
}

/// `POST /config`: store the posted document as-is (last writer wins).
pub async fn post_config(State(ctx): State<Arc<ServerContext>>, body: Bytes) -> Ack {
    let document: Value = match serde_json::from_slice(&body) {
        Ok(document) => document,
        Err(e) => {
            warn!("Rejected config update: body is not JSON: {e}");
            return Ack::failure(format!("Invalid JSON: {e}"));
        }
    };

    let result = ctx.store.save_config(&document);
    if let Err(e) = &result {
        error!("Failed to save config: {e}");
    }
    result.into()
}

pub async fn get_symbol_table(State(ctx): State<Arc<ServerContext>>) -> String {
    ctx.store.load_text(TextResource::SymbolTable)
}

pub async fn post_symbol_table(State(ctx): State<Arc<ServerContext>>, body: String) -> Ack {
    save_text(&ctx, TextResource::SymbolTable, &body)
}

pub async fn get_foreign_languages_symbols(State(ctx): State<Arc<ServerContext>>) -> String {
    ctx.store.load_text(TextResource::ForeignLanguageSymbols)
}

pub async fn post_foreign_languages_symbols(
    State(ctx): State<Arc<ServerContext>>,
    body: String,
) -> Ack {
    save_text(&ctx, TextResource::ForeignLanguageSymbols, &body)
}

/// `GET /keep_alive`: the reset itself happens in the idle-timer middleware.
pub async fn keep_alive() -> Ack {
    Ack::success()
}

/// `GET /{path}.html` from the asset directory, nested pages included.
pub async fn html_page(
    State(ctx): State<Arc<ServerContext>>,
    Path(path): Path<String>,
    request: Request,
) -> Response {
    let Some(file) = page_path(&ctx.assets.static_dir, &path) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let service = ServeFile::new(file);
    match service.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

/// Resolve a requested page under `static_dir`.
///
/// `None` unless the path ends in `.html` and every segment is a plain name:
/// no empty, dot-prefixed or backslash-carrying segments.
fn page_path(static_dir: &std::path::Path, path: &str) -> Option<PathBuf> {
    if !path.ends_with(".html") {
        return None;
    }

    let mut file = static_dir.to_path_buf();
    for segment in path.split('/') {
        if segment.is_empty() || segment.starts_with('.') || segment.contains(['\\', ':']) {
            return None;
        }
        file.push(segment);
    }
    Some(file)
}

fn save_text(ctx: &ServerContext, resource: TextResource, text: &str) -> Ack {
    let result = ctx.store.save_text(resource, text);
    if let Err(e) = &result {
        error!("Failed to save {resource}: {e}");
    }
    result.into()
}
