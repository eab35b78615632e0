//! Persistence adapter for the settings document and the two symbol tables.
//!
//! Loads never fail: a missing, unreadable or unparseable file falls back to
//! the built-in defaults and the reason is logged. Saves report failures to
//! the caller so the UI can show them.

pub mod defaults;

use crate::error::persistence::PersistenceError;

use common::ErrorLocation;

use std::fmt;
use std::io::ErrorKind;
use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const CONFIG_FILE_NAME: &str = "config.json";
const SYMBOL_TABLE_FILE_NAME: &str = "symbol_table.txt";
const FOREIGN_LANGUAGES_SYMBOLS_FILE_NAME: &str = "foreign_languages_symbols.txt";

// ============================================
// CONFIG DOCUMENT
// ============================================

/// Settings document: defaults with the persisted top-level keys laid over them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config(Map<String, Value>);

impl Config {
    pub fn defaults() -> Self {
        Self(defaults::DEFAULT_CONFIG.clone())
    }

    /// Shallow overlay: every top-level key of `persisted` replaces the
    /// default wholesale, nested objects included. Unknown keys are kept.
    pub fn overlay(mut self, persisted: Map<String, Value>) -> Self {
        for (key, value) in persisted {
            self.0.insert(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

// ============================================
// TEXT RESOURCES
// ============================================

/// The raw-text resources stored next to `config.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextResource {
    SymbolTable,
    ForeignLanguageSymbols,
}

impl TextResource {
    pub fn file_name(self) -> &'static str {
        match self {
            TextResource::SymbolTable => SYMBOL_TABLE_FILE_NAME,
            TextResource::ForeignLanguageSymbols => FOREIGN_LANGUAGES_SYMBOLS_FILE_NAME,
        }
    }

    pub fn default_text(self) -> &'static str {
        match self {
            TextResource::SymbolTable => defaults::DEFAULT_SYMBOL_TABLE,
            TextResource::ForeignLanguageSymbols => defaults::DEFAULT_FOREIGN_LANGUAGES_SYMBOL_TABLE,
        }
    }
}

impl fmt::Display for TextResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextResource::SymbolTable => write!(f, "symbol table"),
            TextResource::ForeignLanguageSymbols => write!(f, "foreign languages symbol table"),
        }
    }
}

// ============================================
// STORE
// ============================================

/// Reads and writes the persisted files under one config directory.
#[derive(Debug, Clone)]
pub struct Store {
    config_dir: PathBuf,
}

impl Store {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    pub fn text_path(&self, resource: TextResource) -> PathBuf {
        self.config_dir.join(resource.file_name())
    }

    /// Load the settings: defaults overlaid with whatever `config.json` holds.
    ///
    /// Falls back to the defaults alone on any read or parse failure.
    pub fn load_config(&self) -> Config {
        match self.read_config() {
            Ok(persisted) => Config::defaults().overlay(persisted),
            Err(e) => {
                log_load_failure("config", &e);
                Config::defaults()
            }
        }
    }

    /// Read and parse `config.json` without applying defaults.
    ///
    /// # Errors
    ///
    /// - [`PersistenceError::NotFound`] if the file does not exist
    /// - [`PersistenceError::Read`] if it cannot be read (permissions, I/O)
    /// - [`PersistenceError::Parse`] if it is not a JSON object
    pub fn read_config(&self) -> Result<Map<String, Value>, PersistenceError> {
        let path = self.config_path();
        let contents = read_file(&path)?;

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(PersistenceError::Parse {
                location: ErrorLocation::from(Location::caller()),
                path,
                reason: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
            Err(e) => Err(PersistenceError::Parse {
                location: ErrorLocation::from(Location::caller()),
                path,
                reason: e.to_string(),
            }),
        }
    }

    /// Write `document` to `config.json` as indented JSON, replacing the file.
    ///
    /// The document is stored as given; merging with defaults happens on load.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the directory cannot be created, the
    /// document cannot be serialized, or the write fails.
    pub fn save_config(&self, document: &Value) -> Result<(), PersistenceError> {
        let json =
            serde_json::to_string_pretty(document).map_err(|e| PersistenceError::Serialize {
                location: ErrorLocation::from(Location::caller()),
                reason: e.to_string(),
            })?;

        self.write_file(CONFIG_FILE_NAME, &json)?;

        info!("Config saved to {}", self.config_path().display());
        Ok(())
    }

    /// Load a symbol table, or its built-in default if the file is unusable.
    pub fn load_text(&self, resource: TextResource) -> String {
        match self.read_text(resource) {
            Ok(text) => text,
            Err(e) => {
                log_load_failure(resource.file_name(), &e);
                resource.default_text().to_string()
            }
        }
    }

    /// Read a symbol table verbatim.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Store::read_config`]; contents that are not valid
    /// UTF-8 are a [`PersistenceError::Parse`].
    pub fn read_text(&self, resource: TextResource) -> Result<String, PersistenceError> {
        read_file(&self.text_path(resource))
    }

    /// Store a symbol table verbatim.
    pub fn save_text(&self, resource: TextResource, text: &str) -> Result<(), PersistenceError> {
        self.write_file(resource.file_name(), text)?;

        info!("Saved {} to {}", resource, self.text_path(resource).display());
        Ok(())
    }

    /// Create the directory, write to a temp file, then rename into place.
    fn write_file(&self, file_name: &str, contents: &str) -> Result<(), PersistenceError> {
        std::fs::create_dir_all(&self.config_dir).map_err(|e| PersistenceError::CreateDir {
            location: ErrorLocation::from(Location::caller()),
            path: self.config_dir.clone(),
            source: e,
        })?;

        let path = self.config_dir.join(file_name);
        let temp_path = self.config_dir.join(format!("{file_name}.tmp"));

        std::fs::write(&temp_path, contents).map_err(|e| PersistenceError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &path).map_err(|e| PersistenceError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: path.clone(),
            source: e,
        })
    }
}

#[track_caller]
fn read_file(path: &Path) -> Result<String, PersistenceError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PersistenceError::NotFound {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
        },
        ErrorKind::InvalidData => PersistenceError::Parse {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
            reason: String::from("file is not valid UTF-8"),
        },
        _ => PersistenceError::Read {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
            source: e,
        },
    })
}

fn log_load_failure(what: &str, error: &PersistenceError) {
    if error.is_not_found() {
        info!("No saved {what} found, using defaults");
    } else {
        warn!(
            "Failed to load {what} ({}), using defaults: {error}",
            error.kind()
        );
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
