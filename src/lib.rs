pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod ingest;
pub mod normalize;
pub mod query;
pub mod schema;
pub mod writer;

pub use cli::{Cli, Commands};
pub use error::{FetchError, IngestError, StorageError, ValidationError};
pub use normalize::{normalize, PokemonData};
pub use writer::{PokedexWriter, UpsertOutcome};
