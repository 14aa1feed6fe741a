//! Pokemon store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD keyed by name over the single `pokemon` table.
//! - Keep SQL and row mapping inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `Pokemon::validate()` before any SQL mutation.
//! - Name lookup is exact equality through a bound parameter.
//! - Rows are decoded by column name; undecodable rows are fatal
//!   `InvalidData`, never masked.

use crate::config::{StoreConfig, StoreLocation};
use crate::db::{bootstrap_connection, open_db, open_db_in_memory, DbError};
use crate::model::pokemon::{Pokemon, PokemonValidationError};
use crate::model::pokemon_type::{parse_pokemon_type, PokemonType};
use log::debug;
use rusqlite::{ffi, params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const POKEMON_TABLE: &str = "pokemon";

const REQUIRED_COLUMNS: &[&str] = &[
    "name",
    "primary_type",
    "secondary_type",
    "health",
    "attack",
    "defense",
    "special_attack",
    "special_defense",
    "speed",
];

const POKEMON_SELECT_SQL: &str = "SELECT
    name,
    primary_type,
    secondary_type,
    health,
    attack,
    defense,
    special_attack,
    special_defense,
    speed
FROM pokemon";

pub type RepoResult<T> = Result<T, RepoError>;

/// Store error taxonomy.
///
/// `NotFound`, `DuplicateName` and `Validation` are caller-recoverable; the
/// rest signal infrastructure failure or corrupted data.
#[derive(Debug)]
pub enum RepoError {
    NotFound(String),
    DuplicateName(String),
    Validation(PokemonValidationError),
    Db(DbError),
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    MissingUniqueConstraint {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    /// Whether the caller can act on this error (retry with other input,
    /// report to the user) rather than abort the operation.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::DuplicateName(_) | Self::Validation(_)
        )
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "pokemon not found: {name}"),
            Self::DuplicateName(name) => write!(f, "pokemon already exists: {name}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted pokemon data: {message}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
            Self::MissingUniqueConstraint { table, column } => {
                write!(f, "missing unique constraint on `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PokemonValidationError> for RepoError {
    fn from(value: PokemonValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// CRUD contract for Pokemon records keyed by unique name.
pub trait PokemonRepository {
    fn create(&self, pokemon: &Pokemon) -> RepoResult<()>;
    fn read_by_name(&self, name: &str) -> RepoResult<Pokemon>;
    fn read_all(&self) -> RepoResult<Vec<Pokemon>>;
    fn update(&self, pokemon: &Pokemon) -> RepoResult<()>;
    fn delete_by_name(&self, name: &str) -> RepoResult<()>;
}

/// SQLite-backed store owning its connection for its whole lifetime.
pub struct PokemonStore {
    conn: Connection,
}

impl PokemonStore {
    /// Opens the database described by `config` and ensures the schema.
    pub fn open(config: &StoreConfig) -> RepoResult<Self> {
        let conn = match &config.location {
            StoreLocation::File(path) => open_db(path)?,
            StoreLocation::Memory => open_db_in_memory()?,
        };
        Self::ready(conn)
    }

    pub fn open_in_memory() -> RepoResult<Self> {
        Self::ready(open_db_in_memory()?)
    }

    /// Takes ownership of an existing connection and bootstraps it.
    ///
    /// A pre-existing `pokemon` table is kept, but must carry every
    /// required column.
    pub fn from_connection(mut conn: Connection) -> RepoResult<Self> {
        bootstrap_connection(&mut conn)?;
        Self::ready(conn)
    }

    fn ready(conn: Connection) -> RepoResult<Self> {
        ensure_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl PokemonRepository for PokemonStore {
    fn create(&self, pokemon: &Pokemon) -> RepoResult<()> {
        pokemon.validate()?;

        match self.read_by_name(&pokemon.name) {
            Ok(_) => {
                debug!("event=pokemon_create module=repo status=duplicate");
                return Err(RepoError::DuplicateName(pokemon.name.clone()));
            }
            Err(RepoError::NotFound(_)) => {}
            Err(err) => return Err(err),
        }

        let inserted = self.conn.execute(
            "INSERT INTO pokemon (
                name,
                primary_type,
                secondary_type,
                health,
                attack,
                defense,
                special_attack,
                special_defense,
                speed
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                pokemon.name.as_str(),
                pokemon.primary_type.as_str(),
                pokemon.secondary_type.as_str(),
                pokemon.health,
                pokemon.attack,
                pokemon.defense,
                pokemon.special_attack,
                pokemon.special_defense,
                pokemon.speed,
            ],
        );

        match inserted {
            Ok(_) => {
                debug!("event=pokemon_create module=repo status=ok");
                Ok(())
            }
            // Why: the pre-check and the insert are separate statements; a
            // concurrent writer can insert the same name in between, and the
            // UNIQUE index is what catches it.
            Err(err) if is_unique_violation(&err) => {
                debug!("event=pokemon_create module=repo status=duplicate");
                Err(RepoError::DuplicateName(pokemon.name.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn read_by_name(&self, name: &str) -> RepoResult<Pokemon> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POKEMON_SELECT_SQL} WHERE name = ?1;"))?;
        let mut rows = stmt.query([name])?;
        let row = rows.next()?;

        match row {
            Some(row) => parse_pokemon_row(row),
            None => Err(RepoError::NotFound(name.to_string())),
        }
    }

    fn read_all(&self) -> RepoResult<Vec<Pokemon>> {
        // Why: rowid follows insertion order, so listings stay stable across
        // calls without adding a column the record does not have.
        let mut stmt = self
            .conn
            .prepare(&format!("{POKEMON_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut pokedex = Vec::new();

        while let Some(row) = rows.next()? {
            pokedex.push(parse_pokemon_row(row)?);
        }

        debug!(
            "event=pokemon_read_all module=repo status=ok count={}",
            pokedex.len()
        );
        Ok(pokedex)
    }

    fn update(&self, pokemon: &Pokemon) -> RepoResult<()> {
        pokemon.validate()?;

        let changed = self.conn.execute(
            "UPDATE pokemon
             SET
                primary_type = ?1,
                secondary_type = ?2,
                health = ?3,
                attack = ?4,
                defense = ?5,
                special_attack = ?6,
                special_defense = ?7,
                speed = ?8
             WHERE name = ?9;",
            params![
                pokemon.primary_type.as_str(),
                pokemon.secondary_type.as_str(),
                pokemon.health,
                pokemon.attack,
                pokemon.defense,
                pokemon.special_attack,
                pokemon.special_defense,
                pokemon.speed,
                pokemon.name.as_str(),
            ],
        )?;

        if changed == 0 {
            debug!("event=pokemon_update module=repo status=not_found");
            return Err(RepoError::NotFound(pokemon.name.clone()));
        }

        debug!("event=pokemon_update module=repo status=ok");
        Ok(())
    }

    fn delete_by_name(&self, name: &str) -> RepoResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM pokemon WHERE name = ?1;", [name])?;

        if removed == 0 {
            debug!("event=pokemon_delete module=repo status=not_found");
            return Err(RepoError::NotFound(name.to_string()));
        }

        debug!("event=pokemon_delete module=repo status=ok");
        Ok(())
    }
}

fn ensure_schema(conn: &Connection) -> RepoResult<()> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([POKEMON_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    if columns.is_empty() {
        return Err(RepoError::MissingRequiredTable(POKEMON_TABLE));
    }

    if let Some(column) = REQUIRED_COLUMNS
        .iter()
        .copied()
        .find(|required| !columns.iter().any(|column| column == *required))
    {
        return Err(RepoError::MissingRequiredColumn {
            table: POKEMON_TABLE,
            column,
        });
    }

    if !has_unique_name_index(conn)? {
        return Err(RepoError::MissingUniqueConstraint {
            table: POKEMON_TABLE,
            column: "name",
        });
    }

    Ok(())
}

/// Whether some unique index on `pokemon` covers exactly the `name` column.
fn has_unique_name_index(conn: &Connection) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM pragma_index_list(?1) AS il
            WHERE il.\"unique\" = 1
              AND (SELECT count(*) FROM pragma_index_info(il.name)) = 1
              AND (SELECT ii.name FROM pragma_index_info(il.name) AS ii) = 'name'
        );",
        [POKEMON_TABLE],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn parse_pokemon_row(row: &Row<'_>) -> RepoResult<Pokemon> {
    let pokemon = Pokemon {
        name: row.get("name")?,
        primary_type: parse_type_column(row, "primary_type")?,
        secondary_type: parse_type_column(row, "secondary_type")?,
        health: row.get("health")?,
        attack: row.get("attack")?,
        defense: row.get("defense")?,
        special_attack: row.get("special_attack")?,
        special_defense: row.get("special_defense")?,
        speed: row.get("speed")?,
    };

    pokemon.validate().map_err(|err| {
        RepoError::InvalidData(format!("invalid name in pokemon.name: {err}"))
    })?;
    Ok(pokemon)
}

fn parse_type_column(row: &Row<'_>, column: &str) -> RepoResult<PokemonType> {
    let value: String = row.get(column)?;
    parse_pokemon_type(&value).map_err(|_| {
        RepoError::InvalidData(format!("invalid pokemon type `{value}` in pokemon.{column}"))
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
