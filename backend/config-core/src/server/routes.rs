//! Route table for the config server.

use crate::server::context::ServerContext;
use crate::server::handlers;
use crate::server::middleware::{require_session, reset_idle_timer};

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use tower_http::services::{ServeDir, ServeFile};

const ASSET_FOLDERS: [&str; 4] = ["css", "images", "js", "fonts"];

/// Build the router.
///
/// - API routes reset the idle timer first, then data routes check the session cookie.
/// - API bodies are not size-limited; symbol tables can be large.
/// - Static pages and assets are public and do not count as activity.
pub fn build_router(ctx: Arc<ServerContext>) -> Router {
    let protected = Router::new()
        .route(
            "/config",
            get(handlers::get_config).post(handlers::post_config),
        )
        .route(
            "/symbol_table",
            get(handlers::get_symbol_table).post(handlers::post_symbol_table),
        )
        .route(
            "/foreign_languages_symbols_table",
            get(handlers::get_foreign_languages_symbols)
                .post(handlers::post_foreign_languages_symbols),
        )
        .route("/keep_alive", get(handlers::keep_alive))
        .route_layer(from_fn_with_state(ctx.clone(), require_session));

    let api = Router::new()
        .route("/login/{page}", post(handlers::login))
        .merge(protected)
        .route_layer(from_fn_with_state(ctx.clone(), reset_idle_timer))
        .layer(DefaultBodyLimit::disable());

    let mut assets = Router::new()
        .route("/{*path}", get(handlers::html_page))
        .route_service("/version.txt", ServeFile::new(&ctx.assets.version_file));

    for folder in ASSET_FOLDERS {
        assets = assets.nest_service(
            &format!("/{folder}"),
            ServeDir::new(ctx.assets.static_dir.join(folder)),
        );
    }

    api.merge(assets).with_state(ctx)
}
