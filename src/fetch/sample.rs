use serde_json::{json, Value};
use tracing::warn;

/// Identifier of the built-in reference record
pub const SAMPLE_ID: i64 = 1;

const SPRITE_BASE: &str = "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

/// Bulbasaur as PokeAPI serves it, trimmed to the fields the pipeline reads.
///
/// Used for offline loads and as the fallback when the source is unreachable.
pub fn sample_record() -> Value {
    json!({
        "id": SAMPLE_ID,
        "name": "bulbasaur",
        "height": 7,
        "weight": 69,
        "types": [
            {"slot": 1, "type": {"name": "grass"}},
            {"slot": 2, "type": {"name": "poison"}}
        ],
        "stats": [
            {"base_stat": 45, "stat": {"name": "hp"}},
            {"base_stat": 49, "stat": {"name": "attack"}},
            {"base_stat": 49, "stat": {"name": "defense"}},
            {"base_stat": 65, "stat": {"name": "special-attack"}},
            {"base_stat": 65, "stat": {"name": "special-defense"}},
            {"base_stat": 45, "stat": {"name": "speed"}}
        ],
        "sprites": {
            "front_default": format!("{}/1.png", SPRITE_BASE),
            "front_shiny": format!("{}/shiny/1.png", SPRITE_BASE),
            "back_default": format!("{}/back/1.png", SPRITE_BASE),
            "back_shiny": null,
            "front_female": null,
            "back_female": null
        }
    })
}

/// The reference record standing in for `requested`.
///
/// Warns when the caller asked for any identifier other than [`SAMPLE_ID`].
pub fn sample_for(requested: i64) -> Value {
    if requested != SAMPLE_ID {
        warn!(
            requested,
            returned = SAMPLE_ID,
            "sample record does not match the requested identifier"
        );
    }
    sample_record()
}
