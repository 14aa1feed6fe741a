//! Store location configuration.
//!
//! The only configurable knob is where the backing database lives.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Database file name used when nothing else is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "pokedex.db";
/// Environment variable holding the database path.
pub const DB_PATH_ENV: &str = "POKEDEX_DB_PATH";
/// Location string selecting a private in-memory database.
pub const MEMORY_LOCATION: &str = ":memory:";

/// Where the backing database lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum StoreLocation {
    File(PathBuf),
    Memory,
}

/// Configuration for opening a `PokemonStore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub location: StoreLocation,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::file(DEFAULT_DB_FILE_NAME)
    }
}

impl StoreConfig {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            location: StoreLocation::File(path.into()),
        }
    }

    pub fn memory() -> Self {
        Self {
            location: StoreLocation::Memory,
        }
    }

    /// Builds a config from `POKEDEX_DB_PATH`, falling back to the default.
    pub fn from_env() -> Self {
        match std::env::var(DB_PATH_ENV) {
            Ok(value) => Self::from_location_str(&value),
            Err(_) => Self::default(),
        }
    }

    /// Parses a location string.
    ///
    /// - blank -> default file
    /// - `:memory:` -> in-memory
    /// - anything else -> file path (surrounding whitespace trimmed)
    pub fn from_location_str(value: &str) -> Self {
        match value.trim() {
            "" => Self::default(),
            MEMORY_LOCATION => Self::memory(),
            path => Self::file(path),
        }
    }
}
