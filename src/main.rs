use anyhow::{bail, Context, Result};
use pokedex_etl::{
    cli::{Cli, Commands},
    config::resolve_db_path,
    fetch::{FetchConfig, PokeApiClient},
    ingest::ingest,
    query::{get_pokemon, get_sprite, list_pokemon},
    writer::PokedexWriter,
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();
    let db_path = resolve_db_path(cli.db)?;
    let mut writer = PokedexWriter::open(&db_path)
        .with_context(|| format!("Failed to open database {:?}", db_path))?;

    match cli.command {
        Commands::Load {
            id,
            sample,
            no_fallback,
        } => {
            let client = PokeApiClient::new(FetchConfig {
                base_url: cli.api_url,
                timeout: Duration::from_secs(cli.timeout),
                fallback: !no_fallback,
            })
            .context("Failed to create HTTP client")?;

            let outcome = ingest(&mut writer, &client, id, sample)
                .with_context(|| format!("Failed to load Pokemon {}", id))?;
            println!("{}", outcome);
            println!("ETL process completed.");
        }

        Commands::Show { id } => {
            let Some(view) = get_pokemon(writer.connection(), id)? else {
                bail!("Pokemon {} not found", id);
            };
            println!("{}", serde_json::to_string_pretty(&view)?);
        }

        Commands::Sprite { id, variant } => {
            let Some(sprite) = get_sprite(writer.connection(), id, &variant)? else {
                bail!("Sprite {} not found for Pokemon {}", variant, id);
            };
            println!("{}", serde_json::to_string_pretty(&sprite)?);
        }

        Commands::List => {
            let rows = list_pokemon(writer.connection())?;
            for (id, name) in &rows {
                println!("  {:>4}  {}", id, name);
            }
            println!("\n{} Pokemon in {:?}", rows.len(), db_path);
        }
    }

    Ok(())
}
