pub mod auth;
pub mod error;
pub mod idle_timer;
pub mod launch;
pub mod paths;
pub mod persistence;
pub mod port_binder;
pub mod server;

#[cfg(test)]
mod tests;

use std::time::Duration;

pub const CONFIG_SERVER_HOSTNAME: &str = "127.0.0.1";
pub const CONFIG_SERVER_BASE_URL: &str = const_format::concatcp!("http://", CONFIG_SERVER_HOSTNAME);

/// Cookie carrying the session token after a successful login.
pub const COOKIE_NAME: &str = "mctabim_config_token";

/// Inactivity window after which the server shuts itself down.
pub const SERVER_TIMEOUT: Duration = Duration::from_secs(120);
