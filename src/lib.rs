mod enrich;
mod error;
mod geocoding;
mod stations;
mod stationzip;

pub use error::StationZipError;
pub use stationzip::*;

pub use enrich::postal_codes_for;

pub use geocoding::client::GeocodingClient;
pub use geocoding::error::GeocodingError;

pub use stations::error::StationTableError;
pub use stations::table::{append_postal_codes, coordinates, read_stations, write_stations};
