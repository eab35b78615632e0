//! Random loopback port acquisition.
//!
//! The server has no fixed port: several instances (or other local services)
//! may be running, so a port is drawn at random from [`PORT_RANGE_START`]..=
//! [`PORT_RANGE_END`] and bound; a port that fails to bind is discarded and
//! another is drawn, up to a fixed number of attempts.

use crate::CONFIG_SERVER_HOSTNAME;
use crate::error::port::PortError;

use std::ops::RangeInclusive;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::net::TcpListener;

pub const PORT_RANGE_START: u16 = 1025;
pub const PORT_RANGE_END: u16 = 65535;
pub const DEFAULT_MAX_ATTEMPTS: usize = 64;

/// A listener bound on loopback together with its port.
#[derive(Debug)]
pub struct BoundPort {
    pub listener: TcpListener,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct PortBinder {
    range: RangeInclusive<u16>,
    max_attempts: usize,
}

impl PortBinder {
    pub fn new() -> Self {
        Self {
            range: PORT_RANGE_START..=PORT_RANGE_END,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Restrict draws to a sub-range of the allowed ports.
    ///
    /// # Errors
    /// Returns [`PortError::InvalidRange`] if the range is empty or leaves
    /// [`PORT_RANGE_START`]..=[`PORT_RANGE_END`].
    pub fn with_range(mut self, range: RangeInclusive<u16>) -> Result<Self, PortError> {
        let (start, end) = (*range.start(), *range.end());
        if start > end || start < PORT_RANGE_START {
            return Err(PortError::invalid_range(start, end));
        }
        self.range = range;
        Ok(self)
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn range(&self) -> &RangeInclusive<u16> {
        &self.range
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Bind a random free loopback port.
    ///
    /// # Errors
    /// Returns [`PortError::Exhausted`] if every attempt failed to bind.
    pub async fn bind(&self) -> Result<BoundPort, PortError> {
        let mut rng = StdRng::from_entropy();
        self.bind_with(&mut rng).await
    }

    /// Bind using the given random source.
    pub async fn bind_with<R: Rng + Send>(&self, rng: &mut R) -> Result<BoundPort, PortError> {
        for attempt in 1..=self.max_attempts {
            let port = rng.gen_range(self.range.clone());

            match TcpListener::bind((CONFIG_SERVER_HOSTNAME, port)).await {
                Ok(listener) => {
                    info!("Bound {CONFIG_SERVER_HOSTNAME}:{port} after {attempt} attempt(s)");
                    return Ok(BoundPort { listener, port });
                }
                Err(e) => {
                    debug!("Port {port} unavailable ({e}), drawing another");
                }
            }
        }

        Err(PortError::exhausted(self.max_attempts))
    }
}

impl Default for PortBinder {
    fn default() -> Self {
        Self::new()
    }
}
