use stationzip::{StationZip, StationZipError};

const API_KEY_VAR: &str = "GEOCODING_API_KEY";

const INPUT_PATH: &str = "station.csv";
const OUTPUT_PATH: &str = "station_with_zip.csv";

#[tokio::main]
async fn main() -> Result<(), StationZipError> {
    // Set RUST_LOG=info (or debug, trace) to see per-lookup messages.
    env_logger::init();

    let api_key =
        std::env::var(API_KEY_VAR).map_err(|e| StationZipError::ApiKeyMissing {
            var: API_KEY_VAR,
            source: e,
        })?;

    let client = StationZip::new(api_key);
    let enriched = client
        .enrich_file()
        .input(INPUT_PATH)
        .output(OUTPUT_PATH)
        .call()
        .await?;

    println!("{}", enriched);
    Ok(())
}
