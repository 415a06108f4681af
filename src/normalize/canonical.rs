use serde::Serialize;
use std::collections::BTreeMap;

/// One entry of a creature's type list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeSlot {
    pub slot: i64,
    pub type_name: String,
}

/// One base stat
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseStat {
    pub stat_name: String,
    pub base_stat: i64,
}

/// Validated, normalized record ready for the writer.
///
/// Only [`normalize`](super::normalize) builds one, so the writer can trust
/// its shape: six stats, and sprites without null URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PokemonData {
    id: i64,
    name: String,
    height: i64,
    weight: i64,
    types: Vec<TypeSlot>,
    stats: Vec<BaseStat>,
    sprites: BTreeMap<String, String>,
}

impl PokemonData {
    pub(super) fn new(
        id: i64,
        name: String,
        height: i64,
        weight: i64,
        types: Vec<TypeSlot>,
        stats: Vec<BaseStat>,
        sprites: BTreeMap<String, String>,
    ) -> Self {
        Self {
            id,
            name,
            height,
            weight,
            types,
            stats,
            sprites,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Height in decimeters
    pub fn height(&self) -> i64 {
        self.height
    }

    /// Weight in hectograms
    pub fn weight(&self) -> i64 {
        self.weight
    }

    pub fn types(&self) -> &[TypeSlot] {
        &self.types
    }

    pub fn stats(&self) -> &[BaseStat] {
        &self.stats
    }

    /// Variant name to URL; variants without a URL are absent
    pub fn sprites(&self) -> &BTreeMap<String, String> {
        &self.sprites
    }
}
