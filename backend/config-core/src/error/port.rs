use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum PortError {
    #[error("Invalid Port Range Error: {start}..={end} {location}")]
    InvalidRange {
        start: u16,
        end: u16,
        location: ErrorLocation,
    },

    #[error("Port Exhausted Error: no free loopback port after {attempts} attempts {location}")]
    Exhausted {
        attempts: usize,
        location: ErrorLocation,
    },
}

impl PortError {
    #[track_caller]
    pub fn invalid_range(start: u16, end: u16) -> Self {
        PortError::InvalidRange {
            start,
            end,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn exhausted(attempts: usize) -> Self {
        PortError::Exhausted {
            attempts,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
