//! Persistence access for Pokemon records.
//!
//! # Responsibility
//! - Define the name-keyed CRUD contract.
//! - Isolate SQLite query details from callers.
//!
//! # Invariants
//! - `NotFound` and `DuplicateName` are returned as values, never panics.

pub mod pokemon_store;
