//! Per-launch session secret with redacted Debug output.

use crate::SecretError;

use std::fmt;

use serde::ser::Error;
use uuid::Uuid;
use zeroize::Zeroize;

/// The session token proving a browser was launched by this process.
///
/// Never exposes its value in logs or debug output.
#[derive(Clone)]
pub struct SessionToken {
    inner: String,
}

impl SessionToken {
    /// Wrap an existing token value.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            inner: token.into(),
        }
    }

    /// Generate a fresh random token (UUIDv4, 32 lowercase hex characters).
    pub fn generate() -> Self {
        Self::new(Uuid::new_v4().simple().to_string())
    }

    /// Get the actual token value.
    ///
    /// # Security Note
    /// Only call this when embedding the token in the bootstrap page, the
    /// session cookie, or when comparing it.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Get the token length (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Exact comparison against a token supplied by a client.
    ///
    /// An empty token never matches anything.
    pub fn matches(&self, supplied: &str) -> bool {
        !self.inner.is_empty() && self.inner == supplied
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken([REDACTED])")
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED SESSION TOKEN]")
    }
}

impl Drop for SessionToken {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

// Prevent accidental serialization
impl serde::Serialize for SessionToken {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(SecretError::serialization("SessionToken")))
    }
}
