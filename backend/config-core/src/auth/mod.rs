//! Session authentication for the config server.
//!
//! One [`Session`] is generated per process. The browser proves it was
//! launched by this process by posting the token to `/login/{page}`; the
//! server answers with a cookie that every data endpoint then checks.
//!
//! # Security
//!
//! - The token travels in a form POST body, never in a URL
//! - The token is never logged (see [`SessionToken`])
//! - There is no logout; the session ends with the process

mod cookie;
mod gate;

pub use cookie::{session_cookie, session_cookie_header};
pub use gate::{AuthGate, AuthState, Session};

pub use common::SessionToken;
