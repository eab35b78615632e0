use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum PathError {
    #[error("Path Detection Error: {message} {location}")]
    Detection {
        message: String,
        location: ErrorLocation,
    },
}

impl PathError {
    #[track_caller]
    pub fn detection(message: impl Into<String>) -> Self {
        PathError::Detection {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
