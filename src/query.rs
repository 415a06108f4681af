//! Read side of the store: reassembles the denormalized view of a creature.

use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::StorageError;
use crate::schema::{EXPECTED_SPRITE_VARIANTS, STAT_NAMES};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeInfo {
    pub name: String,
    pub slot: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stat {
    pub name: String,
    pub base_stat: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PokemonView {
    pub id: i64,
    pub name: String,
    pub height_m: f64,
    pub weight_kg: f64,
    pub types: Vec<TypeInfo>,
    pub stats: Vec<Stat>,
    /// Every expected variant is present; missing ones are `None`
    pub sprites: BTreeMap<String, Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpriteView {
    pub url: Option<String>,
    pub available: bool,
}

/// Load one creature with its types, stats and sprites
pub fn get_pokemon(conn: &Connection, id: i64) -> Result<Option<PokemonView>, StorageError> {
    let row: Option<(String, i64, i64)> = conn
        .query_row(
            "SELECT name, height, weight FROM pokemon WHERE id = ?1",
            [id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()?;

    let Some((name, height, weight)) = row else {
        return Ok(None);
    };

    let mut stmt = conn.prepare_cached(
        "SELECT t.name, pt.slot FROM pokemon_type pt
         JOIN type t ON t.id = pt.type_id
         WHERE pt.pokemon_id = ?1
         ORDER BY pt.slot",
    )?;
    let types = stmt
        .query_map([id], |row| {
            Ok(TypeInfo {
                name: row.get(0)?,
                slot: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn
        .prepare_cached("SELECT stat_name, base_stat FROM pokemon_stat WHERE pokemon_id = ?1")?;
    let mut stats = stmt
        .query_map([id], |row| {
            Ok(Stat {
                name: row.get(0)?,
                base_stat: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    stats.sort_by_key(|s| stat_order(&s.name));

    let mut sprites: BTreeMap<String, Option<String>> = EXPECTED_SPRITE_VARIANTS
        .iter()
        .map(|v| (v.to_string(), None))
        .collect();
    let mut stmt = conn.prepare_cached("SELECT variant, url FROM sprite WHERE pokemon_id = ?1")?;
    let rows = stmt.query_map([id], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;
    for row in rows {
        let (variant, url) = row?;
        sprites.insert(variant, Some(url));
    }

    Ok(Some(PokemonView {
        id,
        name,
        height_m: height as f64 / 10.0,
        weight_kg: weight as f64 / 10.0,
        types,
        stats,
        sprites,
    }))
}

/// Look up a single stored sprite
pub fn get_sprite(
    conn: &Connection,
    id: i64,
    variant: &str,
) -> Result<Option<SpriteView>, StorageError> {
    let url: Option<String> = conn
        .query_row(
            "SELECT url FROM sprite WHERE pokemon_id = ?1 AND variant = ?2",
            rusqlite::params![id, variant],
            |row| row.get(0),
        )
        .optional()?;

    Ok(url.map(|url| SpriteView {
        url: Some(url),
        available: true,
    }))
}

/// All stored creatures as (id, name), ordered by id
pub fn list_pokemon(conn: &Connection) -> Result<Vec<(i64, String)>, StorageError> {
    let mut stmt = conn.prepare_cached("SELECT id, name FROM pokemon ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Canonical stats first in their usual order, anything else after
fn stat_order(name: &str) -> (usize, String) {
    match STAT_NAMES.iter().position(|s| *s == name) {
        Some(idx) => (idx, String::new()),
        None => (STAT_NAMES.len(), name.to_string()),
    }
}
