use config_core::error::CoreError;

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error;

/// Errors that stop `mctabim-config` from starting.
#[derive(Debug, Error)]
pub enum ConfigToolError {
    /// Error from this app (logging setup, directories)
    #[error("Config Tool Error: {message} {location}")]
    Tool {
        message: String,
        location: ErrorLocation,
    },

    /// Error from config-core (paths, port binding, server, launch)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },
}

impl From<CoreError> for ConfigToolError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        ConfigToolError::Core {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
