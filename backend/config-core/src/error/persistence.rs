//! Error types for the persistence adapter.
//!
//! Load paths collapse every variant into "use defaults", but each one is
//! logged differently, so the variants keep "absent" apart from "unreadable"
//! apart from "unparseable".

use std::path::PathBuf;

use common::ErrorLocation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Not Found Error: {path} {location}")]
    NotFound {
        location: ErrorLocation,
        path: PathBuf,
    },

    #[error("Read Error: {path}: {source} {location}")]
    Read {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse Error: {path}: {reason} {location}")]
    Parse {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Create Directory Error: {path}: {source} {location}")]
    CreateDir {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization Error: {reason} {location}")]
    Serialize {
        location: ErrorLocation,
        reason: String,
    },

    #[error("Write Error: {path}: {source} {location}")]
    Write {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    /// True when the file simply does not exist yet (first run).
    pub fn is_not_found(&self) -> bool {
        matches!(self, PersistenceError::NotFound { .. })
    }

    /// Short category name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            PersistenceError::NotFound { .. } => "not_found",
            PersistenceError::Read { .. } => "read",
            PersistenceError::Parse { .. } => "parse",
            PersistenceError::CreateDir { .. } => "create_dir",
            PersistenceError::Serialize { .. } => "serialize",
            PersistenceError::Write { .. } => "write",
        }
    }
}
