//! This module provides the main entry point for the station enrichment
//! pipeline. It wires CSV I/O, the reverse-geocoding lookup, and the
//! sequential row mapping into one client.

use crate::enrich::postal_codes_for;
use crate::error::StationZipError;
use crate::geocoding::client::GeocodingClient;
use crate::stations::table::{append_postal_codes, coordinates, read_stations, write_stations};
use bon::bon;
use polars::prelude::DataFrame;
use std::path::PathBuf;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are represented as `f64`.
///
/// # Examples
///
/// ```
/// use stationzip::LatLon;
///
/// let sf_mission = LatLon(37.77, -122.42);
/// assert_eq!(sf_mission.0, 37.77); // Latitude
/// assert_eq!(sf_mission.1, -122.42); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// Default name of the latitude column in station tables.
pub const DEFAULT_LATITUDE_COLUMN: &str = "lat";
/// Default name of the longitude column in station tables.
pub const DEFAULT_LONGITUDE_COLUMN: &str = "long";
/// Default name of the appended postal-code column.
pub const DEFAULT_POSTAL_CODE_COLUMN: &str = "zip_code";

/// The main client for enriching station tables with postal codes.
///
/// Each row of a station table is mapped to a postal code through one
/// reverse-geocoding request; the codes are appended as a trailing column.
/// Rows are processed strictly in sequence with a single request in flight,
/// and the first failed lookup aborts the run before any output is written.
///
/// # Examples
///
/// ```no_run
/// # use stationzip::{StationZip, StationZipError};
/// # async fn run() -> Result<(), StationZipError> {
/// let client = StationZip::new("my-api-key");
/// let enriched = client
///     .enrich_file()
///     .input("station.csv")
///     .output("station_with_zip.csv")
///     .call()
///     .await?;
/// println!("{}", enriched);
/// # Ok(())
/// # }
/// ```
pub struct StationZip {
    geocoder: GeocodingClient,
}

#[bon]
impl StationZip {
    /// Creates a client talking to the real geocoding endpoint.
    ///
    /// The API key is supplied by the caller; it is never stored anywhere
    /// else and never written to logs.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            geocoder: GeocodingClient::new(api_key),
        }
    }

    /// Creates a client with a custom geocoding endpoint URL.
    ///
    /// Intended for mock servers in tests and alternative deployments of
    /// the same API.
    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            geocoder: GeocodingClient::with_endpoint(api_key, endpoint),
        }
    }

    /// Looks up the postal code for a single coordinate pair.
    ///
    /// Same lookup the pipeline performs per row.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use stationzip::{StationZip, StationZipError, LatLon};
    /// # async fn run() -> Result<(), StationZipError> {
    /// let client = StationZip::new("my-api-key");
    /// let code = client.postal_code(LatLon(37.77, -122.42)).await?;
    /// println!("{}", code);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn postal_code(&self, coordinate: LatLon) -> Result<String, StationZipError> {
        self.geocoder
            .postal_code(coordinate)
            .await
            .map_err(StationZipError::from)
    }

    /// Enriches an in-memory station table with a postal-code column.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.frame(DataFrame)`: **Required.** The station table to enrich.
    /// * `.latitude_column(&str)`: Optional. Defaults to `"lat"`.
    /// * `.longitude_column(&str)`: Optional. Defaults to `"long"`.
    /// * `.postal_code_column(&str)`: Optional. Defaults to `"zip_code"`.
    ///
    /// # Returns
    ///
    /// The same table with one added trailing string column, one postal code
    /// per row, row order untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StationZipError::StationTable`] variants when the coordinate
    /// columns are missing or hold null values, and
    /// [`StationZipError::Geocoding`] variants when any lookup fails. A
    /// failure on row N means rows N..end are never looked up.
    #[builder]
    pub async fn enrich_frame(
        &self,
        frame: DataFrame,
        latitude_column: Option<&str>,
        longitude_column: Option<&str>,
        postal_code_column: Option<&str>,
    ) -> Result<DataFrame, StationZipError> {
        let lat_col = latitude_column.unwrap_or(DEFAULT_LATITUDE_COLUMN);
        let lon_col = longitude_column.unwrap_or(DEFAULT_LONGITUDE_COLUMN);
        let zip_col = postal_code_column.unwrap_or(DEFAULT_POSTAL_CODE_COLUMN);

        let coords = coordinates(&frame, lat_col, lon_col)?;
        let codes = postal_codes_for(&coords, |c| self.geocoder.postal_code(c)).await?;
        let enriched = append_postal_codes(frame, codes, zip_col)?;
        Ok(enriched)
    }

    /// Runs the full file pipeline: read CSV, enrich, write CSV.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.input(path)`: **Required.** The station CSV to read.
    /// * `.output(path)`: **Required.** Where to write the enriched CSV.
    /// * `.latitude_column(&str)`: Optional. Defaults to `"lat"`.
    /// * `.longitude_column(&str)`: Optional. Defaults to `"long"`.
    /// * `.postal_code_column(&str)`: Optional. Defaults to `"zip_code"`.
    ///
    /// # Returns
    ///
    /// The enriched table, so callers can inspect or print it after the
    /// output file is written.
    ///
    /// # Errors
    ///
    /// Any read, lookup, or write failure aborts the run; on a lookup
    /// failure the output file is never created, so no partially enriched
    /// output can exist.
    #[builder]
    pub async fn enrich_file(
        &self,
        #[builder(into)] input: PathBuf,
        #[builder(into)] output: PathBuf,
        latitude_column: Option<&str>,
        longitude_column: Option<&str>,
        postal_code_column: Option<&str>,
    ) -> Result<DataFrame, StationZipError> {
        let frame = read_stations(&input).await?;
        let enriched = self
            .enrich_frame()
            .frame(frame)
            .maybe_latitude_column(latitude_column)
            .maybe_longitude_column(longitude_column)
            .maybe_postal_code_column(postal_code_column)
            .call()
            .await?;
        write_stations(enriched.clone(), &output).await?;
        Ok(enriched)
    }
}
