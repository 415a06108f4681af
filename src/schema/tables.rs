//! Table schema definitions for the Pokédex store

use super::types::*;

/// The six base stats every creature carries, in display order
pub const STAT_NAMES: &[&str] = &[
    "hp",
    "attack",
    "defense",
    "special-attack",
    "special-defense",
    "speed",
];

/// Sprite variants the read view always reports, present or not
pub const EXPECTED_SPRITE_VARIANTS: &[&str] = &[
    "front_default",
    "front_shiny",
    "back_default",
    "back_shiny",
    "front_female",
];

// =============================================================================
// Independent Tables (no FK dependencies)
// =============================================================================

pub static POKEMON: TableSchema = TableSchema {
    name: "pokemon",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::required("name", ColumnType::Text),
        Column::required("height", ColumnType::Integer),
        Column::required("weight", ColumnType::Integer),
    ],
    primary_key: PrimaryKey::Assigned("id"),
    foreign_keys: &[],
    indexes: &["name"],
};

pub static TYPE: TableSchema = TableSchema {
    name: "type",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::required("name", ColumnType::Text).unique(),
    ],
    primary_key: PrimaryKey::Surrogate("id"),
    foreign_keys: &[],
    indexes: &[],
};

// =============================================================================
// Association Tables
// =============================================================================

pub static POKEMON_TYPE: TableSchema = TableSchema {
    name: "pokemon_type",
    columns: &[
        Column::required("pokemon_id", ColumnType::Integer),
        Column::required("type_id", ColumnType::Integer),
        Column::required("slot", ColumnType::Integer),
    ],
    primary_key: PrimaryKey::Composite(&["pokemon_id", "type_id"]),
    foreign_keys: &[
        ForeignKey::new("pokemon_id", "pokemon"),
        ForeignKey::new("type_id", "type"),
    ],
    indexes: &[],
};

pub static POKEMON_STAT: TableSchema = TableSchema {
    name: "pokemon_stat",
    columns: &[
        Column::required("pokemon_id", ColumnType::Integer),
        Column::required("stat_name", ColumnType::Text),
        Column::required("base_stat", ColumnType::Integer),
    ],
    primary_key: PrimaryKey::Composite(&["pokemon_id", "stat_name"]),
    foreign_keys: &[ForeignKey::new("pokemon_id", "pokemon")],
    indexes: &[],
};

pub static SPRITE: TableSchema = TableSchema {
    name: "sprite",
    columns: &[
        Column::required("pokemon_id", ColumnType::Integer),
        Column::required("variant", ColumnType::Text),
        Column::required("url", ColumnType::Text),
    ],
    primary_key: PrimaryKey::Composite(&["pokemon_id", "variant"]),
    foreign_keys: &[ForeignKey::new("pokemon_id", "pokemon")],
    indexes: &[],
};

/// All tables, parents before children
pub static ALL_TABLES: &[&TableSchema] = &[&POKEMON, &TYPE, &POKEMON_TYPE, &POKEMON_STAT, &SPRITE];

/// Look up a table schema by name
pub fn get_table(name: &str) -> Option<&'static TableSchema> {
    ALL_TABLES.iter().find(|t| t.name == name).copied()
}

/// Get all table names
pub fn table_names() -> Vec<&'static str> {
    ALL_TABLES.iter().map(|t| t.name).collect()
}
