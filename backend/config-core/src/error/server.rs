use crate::error::port::PortError;

use common::ErrorLocation;

use std::io::Error as IoError;
use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ServerError {
    #[error(transparent)]
    Port(#[from] PortError),

    #[error("Serve Error: {message} {location}")]
    Serve {
        message: String,
        location: ErrorLocation,
    },

    #[error("Assets Error: {message} {location}")]
    Assets {
        message: String,
        location: ErrorLocation,
    },

    #[error("Join Error: {message} {location}")]
    Join {
        message: String,
        location: ErrorLocation,
    },
}

impl From<IoError> for ServerError {
    #[track_caller]
    fn from(error: IoError) -> Self {
        ServerError::Serve {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<tokio::task::JoinError> for ServerError {
    #[track_caller]
    fn from(error: tokio::task::JoinError) -> Self {
        ServerError::Join {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
