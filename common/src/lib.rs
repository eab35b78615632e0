//! Shared building blocks for the McTabim config tool.
//!
//! ## Architecture
//!
//! - **common** (this crate): error location tracking and secret handling
//! - **config-core**: persistence, auth, idle timer, port binding and the HTTP server
//! - **config-tool**: the binary wiring everything together
//!
//! Nothing here knows about HTTP or the filesystem.

pub mod error;
pub mod session_token;

pub use error::error_location::ErrorLocation;
pub use error::secret_error::SecretError;
pub use session_token::SessionToken;
