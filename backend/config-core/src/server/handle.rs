//! Handle to a running config server.

use crate::error::server::ServerError;
use crate::server::context::ServerContext;
use crate::{CONFIG_SERVER_BASE_URL, auth::AuthState};

use common::SessionToken;

use std::sync::Arc;

use tokio::task::JoinHandle;

/// Returned by [`start_config_server`](crate::server::start_config_server).
///
/// The server runs in a background task until it goes idle, is told to quit,
/// or receives Ctrl-C. Dropping the handle does not stop it.
pub struct ConfigServerHandle {
    pub(crate) context: Arc<ServerContext>,
    pub(crate) task: JoinHandle<Result<(), ServerError>>,
}

impl ConfigServerHandle {
    pub fn port(&self) -> u16 {
        self.context.port
    }

    /// `http://127.0.0.1:{port}`
    pub fn base_url(&self) -> String {
        format!("{CONFIG_SERVER_BASE_URL}:{}", self.context.port)
    }

    pub fn session_token(&self) -> &SessionToken {
        self.context.auth.token()
    }

    pub fn auth_state(&self) -> AuthState {
        self.context.auth.state()
    }

    /// Stop the server without waiting for the idle timeout.
    pub fn quit(&self) {
        self.context.request_quit();
    }

    /// Wait until the server has stopped.
    ///
    /// # Errors
    /// Returns [`ServerError`] if serving failed or the server task panicked.
    pub async fn wait(self) -> Result<(), ServerError> {
        self.task.await?
    }
}
