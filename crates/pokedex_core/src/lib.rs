//! Core persistence for the Pokedex.
//! Owns the Pokemon record model and its single-table SQLite store.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::{StoreConfig, StoreLocation};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::pokemon::{Pokemon, PokemonValidationError, MAX_NAME_CHARS};
pub use model::pokemon_type::{parse_pokemon_type, PokemonType, PokemonTypeParseError};
pub use repo::pokemon_store::{PokemonRepository, PokemonStore, RepoError, RepoResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
