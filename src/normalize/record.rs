use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::canonical::{BaseStat, PokemonData, TypeSlot};
use crate::error::ValidationError;
use crate::schema::STAT_NAMES;

/// Number of base stats every creature must carry
pub const REQUIRED_STAT_COUNT: usize = 6;

/// Normalize a raw PokeAPI record into its canonical form.
///
/// Fails when a core field is missing or mistyped, when the identifier is
/// not positive, or when there are not exactly six stats. An unusual number
/// of types only logs a warning.
pub fn normalize(raw: &Value) -> Result<PokemonData, ValidationError> {
    let id = require_i64(raw, "id")?;
    if id <= 0 {
        return Err(ValidationError::InvalidId(id));
    }
    let name = require_str(raw, "name")?.to_string();
    let height = require_i64(raw, "height")?;
    let weight = require_i64(raw, "weight")?;

    let types = optional_array(raw, "types")?
        .iter()
        .enumerate()
        .map(|(idx, entry)| parse_type_slot(entry, idx))
        .collect::<Result<Vec<_>, _>>()?;

    let stats = optional_array(raw, "stats")?
        .iter()
        .enumerate()
        .map(|(idx, entry)| parse_stat(entry, idx))
        .collect::<Result<Vec<_>, _>>()?;

    let sprites = optional_object(raw, "sprites")?
        .map(non_null_sprites)
        .unwrap_or_default();

    if stats.len() != REQUIRED_STAT_COUNT {
        return Err(ValidationError::StatCount(stats.len()));
    }
    for stat in &stats {
        if !STAT_NAMES.contains(&stat.stat_name.as_str()) {
            warn!(id, stat = %stat.stat_name, "unknown stat name");
        }
    }
    if !(1..=2).contains(&types.len()) {
        warn!(id, count = types.len(), "unusual number of types");
    }

    Ok(PokemonData::new(id, name, height, weight, types, stats, sprites))
}

fn parse_type_slot(entry: &Value, idx: usize) -> Result<TypeSlot, ValidationError> {
    let field = format!("types[{}]", idx);
    Ok(TypeSlot {
        slot: nested_i64(entry, &field, &["slot"])?,
        type_name: nested_str(entry, &field, &["type", "name"])?.to_string(),
    })
}

fn parse_stat(entry: &Value, idx: usize) -> Result<BaseStat, ValidationError> {
    let field = format!("stats[{}]", idx);
    Ok(BaseStat {
        stat_name: nested_str(entry, &field, &["stat", "name"])?.to_string(),
        base_stat: nested_i64(entry, &field, &["base_stat"])?,
    })
}

/// Keep only variants that carry a URL
fn non_null_sprites(sprites: &Map<String, Value>) -> BTreeMap<String, String> {
    let mut kept = BTreeMap::new();
    for (variant, value) in sprites {
        match value {
            Value::Null => {}
            Value::String(url) => {
                kept.insert(variant.clone(), url.clone());
            }
            // PokeAPI nests "other" and "versions" objects next to the URLs
            other => debug!(%variant, kind = json_kind(other), "skipping non-URL sprite entry"),
        }
    }
    kept
}

fn require<'a>(raw: &'a Value, key: &str) -> Result<&'a Value, ValidationError> {
    match raw.get(key) {
        None | Some(Value::Null) => Err(ValidationError::MissingField(key.to_string())),
        Some(v) => Ok(v),
    }
}

fn require_i64(raw: &Value, key: &str) -> Result<i64, ValidationError> {
    require(raw, key)?
        .as_i64()
        .ok_or_else(|| invalid(key, "integer"))
}

fn require_str<'a>(raw: &'a Value, key: &str) -> Result<&'a str, ValidationError> {
    require(raw, key)?
        .as_str()
        .ok_or_else(|| invalid(key, "string"))
}

fn nested<'a>(entry: &'a Value, field: &str, path: &[&str]) -> Result<&'a Value, ValidationError> {
    let mut current = entry;
    for key in path {
        current = match current.get(key) {
            None | Some(Value::Null) => {
                return Err(ValidationError::MissingField(format!("{}.{}", field, path.join("."))))
            }
            Some(v) => v,
        };
    }
    Ok(current)
}

fn nested_i64(entry: &Value, field: &str, path: &[&str]) -> Result<i64, ValidationError> {
    nested(entry, field, path)?
        .as_i64()
        .ok_or_else(|| invalid(&format!("{}.{}", field, path.join(".")), "integer"))
}

fn nested_str<'a>(entry: &'a Value, field: &str, path: &[&str]) -> Result<&'a str, ValidationError> {
    nested(entry, field, path)?
        .as_str()
        .ok_or_else(|| invalid(&format!("{}.{}", field, path.join(".")), "string"))
}

/// Missing or null sequences count as empty
fn optional_array<'a>(raw: &'a Value, key: &str) -> Result<&'a [Value], ValidationError> {
    match raw.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(invalid(key, "array")),
    }
}

fn optional_object<'a>(
    raw: &'a Value,
    key: &str,
) -> Result<Option<&'a Map<String, Value>>, ValidationError> {
    match raw.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(invalid(key, "object")),
    }
}

fn invalid(field: &str, expected: &'static str) -> ValidationError {
    ValidationError::InvalidField {
        field: field.to_string(),
        expected,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
