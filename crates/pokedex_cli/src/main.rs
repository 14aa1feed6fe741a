//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `pokedex_core` linkage and print its version.
//! - Optionally open a store and report how many records it holds.
//!
//! Usage: `pokedex_cli [DB_PATH]`. Without an argument the store is only
//! opened when `POKEDEX_DB_PATH` is set.

use pokedex_core::config::DB_PATH_ENV;
use pokedex_core::{PokemonRepository, PokemonStore, StoreConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("pokedex_core version={}", pokedex_core::core_version());

    let config = match std::env::args().nth(1) {
        Some(location) => StoreConfig::from_location_str(&location),
        None if std::env::var_os(DB_PATH_ENV).is_some() => StoreConfig::from_env(),
        None => return ExitCode::SUCCESS,
    };

    match PokemonStore::open(&config).and_then(|store| store.read_all()) {
        Ok(pokedex) => {
            println!("pokedex records={}", pokedex.len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("pokedex error: {err}");
            ExitCode::FAILURE
        }
    }
}
