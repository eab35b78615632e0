//! Process-wide server state, passed to every handler as axum state.

use crate::auth::{AuthGate, Session};
use crate::idle_timer::IdleTimer;
use crate::paths::AssetPaths;
use crate::persistence::Store;

use std::time::Duration;

use log::info;
use tokio::sync::Notify;

/// Everything a request handler may touch: the session, the idle timer, the
/// persisted files, and where the static assets live.
#[derive(Debug)]
pub struct ServerContext {
    pub auth: AuthGate,
    pub idle_timer: IdleTimer,
    pub store: Store,
    pub assets: AssetPaths,
    pub port: u16,
    quit: Notify,
}

impl ServerContext {
    pub fn new(
        session: Session,
        idle_timeout: Duration,
        store: Store,
        assets: AssetPaths,
        port: u16,
    ) -> Self {
        Self {
            auth: AuthGate::new(session),
            idle_timer: IdleTimer::new(idle_timeout),
            store,
            assets,
            port,
            quit: Notify::new(),
        }
    }

    /// Ask the server to stop; takes effect even if nobody is waiting yet.
    pub fn request_quit(&self) {
        info!("Quit requested");
        self.quit.notify_one();
    }

    /// Resolve when the server should stop: idle expiry, explicit quit, or Ctrl-C.
    pub async fn shutdown_signal(&self) {
        let ctrl_c = async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Ctrl-C received"),
                // Without a signal handler the remaining triggers still apply.
                Err(_) => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            _ = self.idle_timer.expired() => {}
            _ = self.quit.notified() => {}
            _ = ctrl_c => {}
        }
    }
}
