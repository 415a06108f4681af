use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::fetch::DEFAULT_BASE_URL;

#[derive(Parser, Debug)]
#[command(name = "pokedex-etl")]
#[command(version, about = "Load Pokémon from PokeAPI into a SQLite database")]
pub struct Cli {
    /// SQLite database path (defaults to the platform data directory)
    #[arg(long, global = true, env = "POKEDEX_DB")]
    pub db: Option<PathBuf>,

    /// Base URL of the PokeAPI-compatible source
    #[arg(long, global = true, env = "POKEDEX_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 5)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one Pokémon and store it (no-op if already stored)
    Load {
        /// Pokémon ID to load
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        id: i64,

        /// Use the built-in sample record instead of the API
        #[arg(long)]
        sample: bool,

        /// Fail instead of substituting the sample record when the fetch fails
        #[arg(long)]
        no_fallback: bool,
    },

    /// Print the stored view of one Pokémon as JSON
    Show {
        id: i64,
    },

    /// Print one stored sprite
    Sprite {
        id: i64,

        /// Variant name, e.g. front_default
        variant: String,
    },

    /// List stored Pokémon
    List,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_load() {
        let cli = Cli::try_parse_from(["pokedex-etl", "load", "25", "--sample", "--db", "x.db"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("x.db")));
        assert_eq!(cli.timeout, 5);
        match cli.command {
            Commands::Load { id, sample, no_fallback } => {
                assert_eq!(id, 25);
                assert!(sample);
                assert!(!no_fallback);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_non_positive_id() {
        assert!(Cli::try_parse_from(["pokedex-etl", "load", "0"]).is_err());
    }

    #[test]
    fn test_parse_sprite() {
        let cli = Cli::try_parse_from(["pokedex-etl", "sprite", "1", "front_shiny"]).unwrap();
        assert!(matches!(cli.command, Commands::Sprite { id: 1, ref variant } if variant == "front_shiny"));
    }
}
