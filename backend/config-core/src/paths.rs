//! Platform-aware detection of the tool's per-user directories.
//!
//! - Settings live in the roaming config directory (`%APPDATA%` on Windows).
//! - Bootstrap pages and the log file live in the local data directory
//!   (`%LOCALAPPDATA%` on Windows).
//!
//! Both are namespaced under `PIME/mctabim`, the directory the input method
//! itself reads its settings from.

use crate::error::paths::PathError;
use crate::error::server::ServerError;

use common::ErrorLocation;

use std::panic::Location;
use std::path::{Path, PathBuf};

use log::debug;

const VENDOR_DIR: &str = "PIME";
const APP_DIR: &str = "mctabim";

/// Per-user directories the server reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    /// Holds `config.json` and the symbol table files.
    pub config_dir: PathBuf,
    /// Holds the generated `launch_{page}.html` pages and the log file.
    pub local_data_dir: PathBuf,
}

impl AppPaths {
    pub fn new(config_dir: impl Into<PathBuf>, local_data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            local_data_dir: local_data_dir.into(),
        }
    }

    /// Detect the directories from the user profile via the `dirs` crate.
    ///
    /// # Errors
    /// Returns [`PathError::Detection`] if the platform exposes no config or
    /// local data directory (e.g. no home directory).
    pub fn detect() -> Result<Self, PathError> {
        let config_base = dirs::config_dir()
            .ok_or_else(|| PathError::detection("Cannot determine the user config directory"))?;
        let local_base = dirs::data_local_dir().ok_or_else(|| {
            PathError::detection("Cannot determine the user local data directory")
        })?;

        let paths = Self::new(
            config_base.join(VENDOR_DIR).join(APP_DIR),
            local_base.join(VENDOR_DIR).join(APP_DIR),
        );

        debug!("Config dir: {:?}", paths.config_dir);
        debug!("Local data dir: {:?}", paths.local_data_dir);

        Ok(paths)
    }
}

/// Where static UI assets are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    /// Directory holding `*.html` pages and the `css`, `images`, `js`, `fonts` folders.
    pub static_dir: PathBuf,
    /// The `version.txt` file, which lives outside the app directory.
    pub version_file: PathBuf,
}

impl AssetPaths {
    pub fn new(static_dir: impl Into<PathBuf>, version_file: impl Into<PathBuf>) -> Self {
        Self {
            static_dir: static_dir.into(),
            version_file: version_file.into(),
        }
    }

    /// Assets installed next to the running executable.
    ///
    /// `version.txt` sits three levels above the app directory in the PIME
    /// install tree.
    pub fn beside(app_dir: &Path) -> Self {
        Self::new(
            app_dir,
            app_dir.join("..").join("..").join("..").join("version.txt"),
        )
    }

    /// # Errors
    /// Returns [`ServerError::Assets`] if the executable path cannot be resolved.
    #[track_caller]
    pub fn beside_executable() -> Result<Self, ServerError> {
        let exe = std::env::current_exe().map_err(|e| ServerError::Assets {
            message: format!("Failed to resolve executable path: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let app_dir = exe.parent().ok_or_else(|| ServerError::Assets {
            message: format!("Executable has no parent directory: {}", exe.display()),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self::beside(app_dir))
    }
}
