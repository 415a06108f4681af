use tracing::info;

use crate::error::IngestError;
use crate::fetch::{sample_for, PokeApiClient};
use crate::normalize::normalize;
use crate::writer::{PokedexWriter, UpsertOutcome};

/// Fetch, normalize and store one creature.
///
/// With `use_sample` the built-in reference record is used and the network
/// is never touched.
pub fn ingest(
    writer: &mut PokedexWriter,
    client: &PokeApiClient,
    id: i64,
    use_sample: bool,
) -> Result<UpsertOutcome, IngestError> {
    let raw = if use_sample {
        info!(id, "using sample data");
        sample_for(id)
    } else {
        client.fetch_pokemon(id)?
    };

    let data = normalize(&raw)?;
    Ok(writer.ingest(&data)?)
}
