//! Domain model for persisted Pokemon records.
//!
//! # Responsibility
//! - Define the record shape consumed and produced by the store.
//! - Own the closed typing enumeration and its string encoding.

pub mod pokemon;
pub mod pokemon_type;
