use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body from {0}")]
    ResponseBody(String, #[source] reqwest::Error),

    #[error("Failed to parse geocoding response from {url}")]
    JsonParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No geocoding results for coordinates ({lat}, {lon})")]
    NoResults { lat: f64, lon: f64 },

    #[error("Geocoding result for ({lat}, {lon}) has no address components")]
    MissingPostalCode { lat: f64, lon: f64 },
}
