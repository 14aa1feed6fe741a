//! Ordered schema migrations for the Pokedex database.
//!
//! # Invariants
//! - `version` values are strictly increasing.
//! - Every migration statement is idempotent (`IF NOT EXISTS`), so running
//!   against a database that already has the table is harmless.
//! - The applied version is mirrored to `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use log::debug;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const POKEMON_TABLE_SQL: &str = include_str!("0001_pokemon.sql");

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: POKEMON_TABLE_SQL,
}];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Reads the schema version recorded on `conn`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

/// Applies every pending migration inside one transaction.
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` when the database is newer than
///   this binary.
/// - `DbError::Sqlite` when a migration statement fails; nothing is applied.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current = schema_version(conn)?;
    let latest = latest_version();

    if current > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }
    if current == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        tx.execute_batch(migration.sql)?;
        tx.pragma_update(None, "user_version", migration.version)?;
        debug!(
            "event=db_migrate module=db status=ok version={}",
            migration.version
        );
    }
    tx.commit()?;

    Ok(())
}

/// Runs the create-if-absent `pokemon` table statement unconditionally.
///
/// The recorded version may have been set by another component sharing the
/// database, so it cannot prove the table exists.
pub fn ensure_pokemon_table(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(POKEMON_TABLE_SQL)?;
    Ok(())
}
