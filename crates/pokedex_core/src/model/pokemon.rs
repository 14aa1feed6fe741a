//! Pokemon domain record.
//!
//! # Responsibility
//! - Define the attribute bundle persisted by the store.
//! - Validate record invariants before they reach storage.
//!
//! # Invariants
//! - `name` is the identity key: non-blank and at most `MAX_NAME_CHARS`.
//! - Base stats are non-negative by construction (`u32`).

use crate::model::pokemon_type::PokemonType;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Upper bound for `Pokemon::name`, mirrored by the storage CHECK constraint.
pub const MAX_NAME_CHARS: usize = 50;

/// One persisted Pokemon: identity name, typing and six base stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PokemonWire")]
pub struct Pokemon {
    /// Unique lookup key. Never changed by updates.
    pub name: String,
    pub primary_type: PokemonType,
    /// `PokemonType::None` when the species has a single type.
    pub secondary_type: PokemonType,
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
}

/// Reasons a `Pokemon` is rejected before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PokemonValidationError {
    EmptyName,
    NameTooLong { chars: usize, max: usize },
}

impl Display for PokemonValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "pokemon name must not be empty"),
            Self::NameTooLong { chars, max } => {
                write!(f, "pokemon name has {chars} characters; at most {max} allowed")
            }
        }
    }
}

impl Error for PokemonValidationError {}

impl Pokemon {
    /// Creates a record with all base stats set to zero.
    ///
    /// # Errors
    /// - Returns `PokemonValidationError` when `name` breaks the name rules.
    pub fn new(
        name: impl Into<String>,
        primary_type: PokemonType,
        secondary_type: PokemonType,
    ) -> Result<Self, PokemonValidationError> {
        let pokemon = Self {
            name: name.into(),
            primary_type,
            secondary_type,
            health: 0,
            attack: 0,
            defense: 0,
            special_attack: 0,
            special_defense: 0,
            speed: 0,
        };
        pokemon.validate()?;
        Ok(pokemon)
    }

    /// Re-checks record invariants.
    ///
    /// Fields are public, so callers may break invariants after `new`; write
    /// paths call this before touching storage.
    pub fn validate(&self) -> Result<(), PokemonValidationError> {
        if self.name.trim().is_empty() {
            return Err(PokemonValidationError::EmptyName);
        }
        let chars = self.name.chars().count();
        if chars > MAX_NAME_CHARS {
            return Err(PokemonValidationError::NameTooLong {
                chars,
                max: MAX_NAME_CHARS,
            });
        }
        Ok(())
    }

    /// Sum of the six base stats.
    pub fn base_stat_total(&self) -> u64 {
        [
            self.health,
            self.attack,
            self.defense,
            self.special_attack,
            self.special_defense,
            self.speed,
        ]
        .iter()
        .map(|stat| u64::from(*stat))
        .sum()
    }
}

#[derive(Deserialize)]
struct PokemonWire {
    name: String,
    primary_type: PokemonType,
    secondary_type: PokemonType,
    health: u32,
    attack: u32,
    defense: u32,
    special_attack: u32,
    special_defense: u32,
    speed: u32,
}

impl TryFrom<PokemonWire> for Pokemon {
    type Error = PokemonValidationError;

    fn try_from(wire: PokemonWire) -> Result<Self, Self::Error> {
        let pokemon = Self {
            name: wire.name,
            primary_type: wire.primary_type,
            secondary_type: wire.secondary_type,
            health: wire.health,
            attack: wire.attack,
            defense: wire.defense,
            special_attack: wire.special_attack,
            special_defense: wire.special_defense,
            speed: wire.speed,
        };
        pokemon.validate()?;
        Ok(pokemon)
    }
}
