//! End-to-end tests: fetch from a local stand-in for PokeAPI, normalize,
//! store in an on-disk SQLite database and read the view back.

use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tempfile::TempDir;

use pokedex_etl::fetch::{sample_record, FetchConfig, PokeApiClient};
use pokedex_etl::ingest::ingest;
use pokedex_etl::query::get_pokemon;
use pokedex_etl::{IngestError, PokedexWriter, UpsertOutcome, ValidationError};

// =============================================================================
// Test Fixtures
// =============================================================================

/// Serve exactly one HTTP response on a random local port
fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind listener");
    let base_url = format!("http://{}/api/v2", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("No request received");
        let mut reader = BufReader::new(stream);

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        // Drain headers up to the blank line
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if line == "\r\n" || line.is_empty() {
                break;
            }
        }

        let mut stream = reader.into_inner();
        write!(
            stream,
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        )
        .unwrap();
        stream.flush().unwrap();
        request_line
    });

    (base_url, handle)
}

fn client(base_url: String, fallback: bool) -> PokeApiClient {
    PokeApiClient::new(FetchConfig {
        base_url,
        timeout: Duration::from_secs(5),
        fallback,
    })
    .expect("Failed to create client")
}

fn charmander() -> Value {
    json!({
        "id": 4,
        "name": "charmander",
        "height": 6,
        "weight": 85,
        "types": [{"slot": 1, "type": {"name": "fire"}}],
        "stats": [
            {"base_stat": 39, "stat": {"name": "hp"}},
            {"base_stat": 52, "stat": {"name": "attack"}},
            {"base_stat": 43, "stat": {"name": "defense"}},
            {"base_stat": 60, "stat": {"name": "special-attack"}},
            {"base_stat": 50, "stat": {"name": "special-defense"}},
            {"base_stat": 65, "stat": {"name": "speed"}}
        ],
        "sprites": {
            "front_default": "https://img.test/4.png",
            "front_shiny": null,
            "back_default": "https://img.test/back/4.png",
            "front_female": null,
            "other": {"home": {"front_default": "https://img.test/home/4.png"}}
        }
    })
}

fn temp_store() -> (TempDir, PokedexWriter) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let writer = PokedexWriter::open(&dir.path().join("pokedex.db")).expect("Failed to open db");
    (dir, writer)
}

// =============================================================================
// Pipeline Tests
// =============================================================================

#[test]
fn test_live_fetch_is_stored() {
    let (base_url, server) = serve_once("200 OK", charmander().to_string());
    let (_dir, mut writer) = temp_store();

    let outcome = ingest(&mut writer, &client(base_url, false), 4, false).unwrap();
    assert_eq!(
        outcome,
        UpsertOutcome::Inserted {
            id: 4,
            name: "charmander".into()
        }
    );
    assert!(server.join().unwrap().starts_with("GET /api/v2/pokemon/4 "));

    let view = get_pokemon(writer.connection(), 4).unwrap().unwrap();
    assert_eq!(view.height_m, 0.6);
    assert_eq!(view.weight_kg, 8.5);
    assert_eq!(view.types.len(), 1);
    assert_eq!(view.stats.len(), 6);
    assert_eq!(view.sprites["front_default"].as_deref(), Some("https://img.test/4.png"));
    assert_eq!(view.sprites["front_shiny"], None);
    assert!(!view.sprites.contains_key("other"));
    assert_eq!(writer.row_count("sprite").unwrap(), 2);
}

#[test]
fn test_error_status_falls_back_to_sample() {
    let (base_url, server) = serve_once("404 Not Found", r#"{"detail":"Not found."}"#.to_string());
    let (_dir, mut writer) = temp_store();

    let outcome = ingest(&mut writer, &client(base_url, true), 1, false).unwrap();
    server.join().unwrap();

    assert_eq!(
        outcome,
        UpsertOutcome::Inserted {
            id: 1,
            name: "bulbasaur".into()
        }
    );
}

#[test]
fn test_undecodable_body_without_fallback_fails() {
    let (base_url, server) = serve_once("200 OK", "<html>oops</html>".to_string());
    let (_dir, mut writer) = temp_store();

    let err = ingest(&mut writer, &client(base_url, false), 1, false).unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, IngestError::Fetch(_)));
    assert_eq!(writer.row_count("pokemon").unwrap(), 0);
}

#[test]
fn test_invalid_record_writes_nothing() {
    let mut record = charmander();
    record["stats"].as_array_mut().unwrap().pop();
    let (base_url, server) = serve_once("200 OK", record.to_string());
    let (_dir, mut writer) = temp_store();

    let err = ingest(&mut writer, &client(base_url, false), 4, false).unwrap_err();
    server.join().unwrap();

    assert!(matches!(
        err,
        IngestError::Validation(ValidationError::StatCount(5))
    ));
    assert_eq!(writer.row_count("pokemon").unwrap(), 0);
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_reopened_store_keeps_data_and_stays_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("pokedex.db");
    let offline = client("http://127.0.0.1:1/api/v2".to_string(), false);

    {
        let mut writer = PokedexWriter::open(&db_path).unwrap();
        assert!(ingest(&mut writer, &offline, 1, true).unwrap().is_inserted());
    }

    let mut writer = PokedexWriter::open(&db_path).unwrap();
    let outcome = ingest(&mut writer, &offline, 1, true).unwrap();
    assert_eq!(
        outcome,
        UpsertOutcome::Skipped {
            id: 1,
            name: "bulbasaur".into()
        }
    );

    for (table, expected) in [
        ("pokemon", 1),
        ("type", 2),
        ("pokemon_type", 2),
        ("pokemon_stat", 6),
        ("sprite", 3),
    ] {
        assert_eq!(writer.row_count(table).unwrap(), expected, "{}", table);
    }
}

#[test]
fn test_sample_matches_reference_scenario() {
    let data = pokedex_etl::normalize(&sample_record()).unwrap();
    assert_eq!(data.id(), 1);
    assert_eq!(data.name(), "bulbasaur");
    assert_eq!((data.height(), data.weight()), (7, 69));
    assert_eq!(data.types().len(), 2);
    assert_eq!(data.stats().len(), 6);
    assert_eq!(data.sprites().len(), 3);
}
