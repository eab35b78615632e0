use crate::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SecretError {
    #[error("Secret Error: {secret} cannot be serialized, read it with as_str() {location}")]
    Serialization {
        secret: &'static str,
        location: ErrorLocation,
    },
}

impl SecretError {
    #[track_caller]
    pub fn serialization(secret: &'static str) -> Self {
        SecretError::Serialization {
            secret,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
