use rusqlite::{params, Connection, OptionalExtension, ToSql, Transaction};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

use super::schema_gen::{generate_create_table, generate_indexes};
use crate::error::StorageError;
use crate::normalize::PokemonData;
use crate::schema::{get_table, TableSchema, ALL_TABLES};

/// Result of one upsert call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted { id: i64, name: String },
    /// A creature with this identifier was already stored; nothing was written
    Skipped { id: i64, name: String },
}

impl UpsertOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, UpsertOutcome::Inserted { .. })
    }
}

impl fmt::Display for UpsertOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpsertOutcome::Inserted { id, name } => {
                write!(f, "Inserted {} (ID: {}) successfully.", name, id)
            }
            UpsertOutcome::Skipped { id, name } => {
                write!(f, "Pokemon {} ({}) already exists; skipping.", id, name)
            }
        }
    }
}

/// Row found by [`find_or_create`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Existing(i64),
    Created(i64),
}

impl Entry {
    pub fn id(self) -> i64 {
        match self {
            Entry::Existing(id) | Entry::Created(id) => id,
        }
    }
}

pub struct PokedexWriter {
    conn: Connection,
}

impl PokedexWriter {
    /// Open (or create) the database file and make sure all tables exist
    pub fn open(db_path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)?;
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        let writer = Self { conn };
        writer.create_tables(ALL_TABLES)?;
        Ok(writer)
    }

    /// Create the given tables (and their indexes) unless they already exist
    pub fn create_tables(&self, schemas: &[&TableSchema]) -> Result<(), StorageError> {
        for schema in schemas {
            debug!(table = schema.name, "ensuring table");
            self.conn.execute(&generate_create_table(schema), [])?;

            for index_sql in generate_indexes(schema) {
                self.conn.execute(&index_sql, [])?;
            }
        }
        Ok(())
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Write one canonical record in its own transaction.
    ///
    /// Nothing is committed unless every row for the creature was written.
    pub fn ingest(&mut self, data: &PokemonData) -> Result<UpsertOutcome, StorageError> {
        let tx = self.conn.transaction()?;
        let outcome = upsert_pokemon(&tx, data)?;
        if outcome.is_inserted() {
            tx.commit()?;
        }
        Ok(outcome)
    }

    /// Number of rows in one of the store's tables
    pub fn row_count(&self, table: &str) -> Result<u64, StorageError> {
        let schema =
            get_table(table).ok_or_else(|| StorageError::UnknownTable(table.to_string()))?;
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", schema.name),
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}

/// Look up a row id with `lookup_sql`, inserting through `create` when absent.
///
/// Every "reference by key, never duplicate" rule in the store goes through
/// here.
pub fn find_or_create<K, F>(
    tx: &Transaction<'_>,
    lookup_sql: &str,
    key: K,
    create: F,
) -> Result<Entry, StorageError>
where
    K: ToSql,
    F: FnOnce(&Transaction<'_>) -> Result<i64, StorageError>,
{
    let existing: Option<i64> = tx
        .query_row(lookup_sql, [key], |row| row.get(0))
        .optional()?;

    match existing {
        Some(id) => Ok(Entry::Existing(id)),
        None => Ok(Entry::Created(create(tx)?)),
    }
}

/// Insert a creature with its types, stats and sprites, unless one with the
/// same identifier is already stored.
///
/// The caller owns `tx` and decides whether to commit.
pub fn upsert_pokemon(
    tx: &Transaction<'_>,
    data: &PokemonData,
) -> Result<UpsertOutcome, StorageError> {
    let creature = find_or_create(tx, "SELECT id FROM pokemon WHERE id = ?1", data.id(), |tx| {
        tx.execute(
            "INSERT INTO pokemon (id, name, height, weight) VALUES (?1, ?2, ?3, ?4)",
            params![data.id(), data.name(), data.height(), data.weight()],
        )?;
        Ok(tx.last_insert_rowid())
    })?;

    let pokemon_id = match creature {
        Entry::Existing(id) => {
            info!(id, name = data.name(), "already exists; skipping");
            return Ok(UpsertOutcome::Skipped {
                id,
                name: data.name().to_string(),
            });
        }
        Entry::Created(id) => id,
    };

    let mut linked: HashSet<i64> = HashSet::new();
    for t in data.types() {
        let type_id = find_type_or_create(tx, &t.type_name)?;
        if !linked.insert(type_id) {
            warn!(id = pokemon_id, type_name = %t.type_name, "duplicate type entry; skipping");
            continue;
        }
        tx.execute(
            "INSERT INTO pokemon_type (pokemon_id, type_id, slot) VALUES (?1, ?2, ?3)",
            params![pokemon_id, type_id, t.slot],
        )?;
    }

    {
        let mut stmt = tx.prepare_cached(
            "INSERT INTO pokemon_stat (pokemon_id, stat_name, base_stat) VALUES (?1, ?2, ?3)",
        )?;
        for s in data.stats() {
            stmt.execute(params![pokemon_id, s.stat_name, s.base_stat])?;
        }
    }

    {
        let mut stmt =
            tx.prepare_cached("INSERT INTO sprite (pokemon_id, variant, url) VALUES (?1, ?2, ?3)")?;
        for (variant, url) in data.sprites() {
            stmt.execute(params![pokemon_id, variant, url])?;
        }
    }

    info!(id = pokemon_id, name = data.name(), "inserted");
    Ok(UpsertOutcome::Inserted {
        id: pokemon_id,
        name: data.name().to_string(),
    })
}

fn find_type_or_create(tx: &Transaction<'_>, name: &str) -> Result<i64, StorageError> {
    let entry = find_or_create(tx, "SELECT id FROM type WHERE name = ?1", name, |tx| {
        tx.execute("INSERT INTO type (name) VALUES (?1)", [name])?;
        Ok(tx.last_insert_rowid())
    })?;
    if let Entry::Created(id) = entry {
        debug!(id, name, "created type label");
    }
    Ok(entry.id())
}
