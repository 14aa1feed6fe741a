//! Closed typing enumeration for Pokemon records.
//!
//! # Invariants
//! - The stored/wire form is the upper-case constant name (`"ELECTRIC"`).
//! - Decoding is exact and case-sensitive; unknown strings are rejected.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Elemental typing category.
///
/// `None` stands in for an absent secondary type so both type slots stay
/// non-optional in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
    None,
}

impl PokemonType {
    /// Every variant in declaration order.
    pub const ALL: [PokemonType; 19] = [
        Self::Normal,
        Self::Fire,
        Self::Water,
        Self::Grass,
        Self::Electric,
        Self::Ice,
        Self::Fighting,
        Self::Poison,
        Self::Ground,
        Self::Flying,
        Self::Psychic,
        Self::Bug,
        Self::Rock,
        Self::Ghost,
        Self::Dragon,
        Self::Dark,
        Self::Steel,
        Self::Fairy,
        Self::None,
    ];

    /// Stable string id used for storage columns.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Fire => "FIRE",
            Self::Water => "WATER",
            Self::Grass => "GRASS",
            Self::Electric => "ELECTRIC",
            Self::Ice => "ICE",
            Self::Fighting => "FIGHTING",
            Self::Poison => "POISON",
            Self::Ground => "GROUND",
            Self::Flying => "FLYING",
            Self::Psychic => "PSYCHIC",
            Self::Bug => "BUG",
            Self::Rock => "ROCK",
            Self::Ghost => "GHOST",
            Self::Dragon => "DRAGON",
            Self::Dark => "DARK",
            Self::Steel => "STEEL",
            Self::Fairy => "FAIRY",
            Self::None => "NONE",
        }
    }
}

impl Display for PokemonType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PokemonType {
    type Err = PokemonTypeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_pokemon_type(value)
    }
}

/// Parses one typing category from its stored string id.
pub fn parse_pokemon_type(value: &str) -> Result<PokemonType, PokemonTypeParseError> {
    PokemonType::ALL
        .into_iter()
        .find(|kind| kind.as_str() == value)
        .ok_or_else(|| PokemonTypeParseError(value.to_string()))
}

/// Raised when a string does not name any `PokemonType`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonTypeParseError(pub String);

impl Display for PokemonTypeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown pokemon type `{}`", self.0)
    }
}

impl Error for PokemonTypeParseError {}
