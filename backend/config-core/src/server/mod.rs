//! Loopback HTTP server for the settings UI.
//!
//! The server:
//!
//! - Listens on `127.0.0.1` only, on a randomly drawn port
//! - Authenticates the browser with a per-launch token (see [`crate::auth`])
//! - Shuts itself down after [`SERVER_TIMEOUT`] without API traffic
//!
//! Runs on whatever tokio runtime it is started from; the binary uses a
//! current-thread runtime so handlers never run in parallel.

mod ack;
mod context;
mod handle;
mod handlers;
mod middleware;
mod routes;

pub use ack::Ack;
pub use context::ServerContext;
pub use handle::ConfigServerHandle;
pub use routes::build_router;

use crate::SERVER_TIMEOUT;
use crate::auth::Session;
use crate::error::server::ServerError;
use crate::paths::{AppPaths, AssetPaths};
use crate::persistence::Store;
use crate::port_binder::PortBinder;

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use log::info;

/// Everything needed to start a server.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub paths: AppPaths,
    pub assets: AssetPaths,
    pub idle_timeout: Duration,
    pub port_binder: PortBinder,
}

impl ServerOptions {
    pub fn new(paths: AppPaths, assets: AssetPaths) -> Self {
        Self {
            paths,
            assets,
            idle_timeout: SERVER_TIMEOUT,
            port_binder: PortBinder::default(),
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn with_port_binder(mut self, port_binder: PortBinder) -> Self {
        self.port_binder = port_binder;
        self
    }
}

/// Bind a port, issue the session, and start serving in a background task.
///
/// # Errors
/// Returns [`ServerError::Port`] if no loopback port could be bound.
pub async fn start_config_server(options: ServerOptions) -> Result<ConfigServerHandle, ServerError> {
    let bound = options.port_binder.bind().await?;

    let context = Arc::new(ServerContext::new(
        Session::generate(),
        options.idle_timeout,
        Store::new(options.paths.config_dir),
        options.assets,
        bound.port,
    ));

    let router = build_router(context.clone());
    let shutdown_context = context.clone();
    let listener = bound.listener;

    info!(
        "Config server listening on {}:{}",
        crate::CONFIG_SERVER_HOSTNAME,
        bound.port
    );

    let task = tokio::spawn(async move {
        // No drain: whatever is in flight when the signal fires is dropped.
        tokio::select! {
            served = axum::serve(listener, router).into_future() => {
                served?;
            }
            _ = shutdown_context.shutdown_signal() => {
                info!("Config server shutting down");
            }
        }
        Ok::<(), ServerError>(())
    });

    Ok(ConfigServerHandle { context, task })
}
