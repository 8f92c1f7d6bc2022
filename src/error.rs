use crate::geocoding::error::GeocodingError;
use crate::stations::error::StationTableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StationZipError {
    #[error(transparent)]
    Geocoding(#[from] GeocodingError),

    #[error(transparent)]
    StationTable(#[from] StationTableError),

    #[error("Environment variable '{var}' holding the geocoding API key is not set")]
    ApiKeyMissing {
        var: &'static str,
        #[source]
        source: std::env::VarError,
    },
}
