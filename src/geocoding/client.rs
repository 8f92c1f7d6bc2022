use crate::geocoding::error::GeocodingError;
use crate::stationzip::LatLon;
use log::{info, warn};
use reqwest::Client;
use serde::Deserialize;

/// Default reverse-geocoding endpoint (Google Maps Geocoding API).
const GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Wire shape of the geocoding response. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResponse {
    pub(crate) results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResult {
    pub(crate) address_components: Vec<AddressComponent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddressComponent {
    pub(crate) long_name: String,
}

/// HTTP client for the reverse-geocoding service.
///
/// One instance holds the API key and the endpoint URL; every lookup is a
/// single GET request with `latlng` and `key` query parameters. The key is
/// passed as a query parameter only and never appears in log output or
/// error messages.
pub struct GeocodingClient {
    http: Client,
    api_key: String,
    endpoint: String,
}

impl GeocodingClient {
    /// Creates a client targeting the real geocoding endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(api_key, GEOCODE_ENDPOINT)
    }

    /// Creates a client targeting a custom endpoint URL.
    ///
    /// Useful for mock servers in tests or alternative deployments of the
    /// same API.
    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Looks up the postal code for a single coordinate pair.
    ///
    /// The postal code is the `long_name` of the last address component of
    /// the first geocoding result, which is where the API places it.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingError::NoResults`] when the service returns an
    /// empty results list, [`GeocodingError::MissingPostalCode`] when the
    /// first result has no address components, and transport/parse variants
    /// for network and payload failures. There is no retry.
    pub async fn postal_code(&self, coordinate: LatLon) -> Result<String, GeocodingError> {
        let latlng = format!("{},{}", coordinate.0, coordinate.1);
        info!("Looking up postal code for ({})", latlng);

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("latlng", latlng.as_str()), ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| GeocodingError::NetworkRequest(self.endpoint.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error from geocoding service for ({}): {:?}", latlng, e);
                return Err(if let Some(status) = e.status() {
                    GeocodingError::HttpStatus {
                        url: self.endpoint.clone(),
                        status,
                        source: e,
                    }
                } else {
                    GeocodingError::NetworkRequest(self.endpoint.clone(), e)
                });
            }
        };

        let body = response
            .text()
            .await
            .map_err(|e| GeocodingError::ResponseBody(self.endpoint.clone(), e))?;

        let payload: GeocodeResponse =
            serde_json::from_str(&body).map_err(|e| GeocodingError::JsonParse {
                url: self.endpoint.clone(),
                source: e,
            })?;

        Self::extract_postal_code(&payload, coordinate)
    }

    /// Pulls the postal code out of a parsed response payload.
    fn extract_postal_code(
        payload: &GeocodeResponse,
        coordinate: LatLon,
    ) -> Result<String, GeocodingError> {
        let result = payload.results.first().ok_or(GeocodingError::NoResults {
            lat: coordinate.0,
            lon: coordinate.1,
        })?;
        let component =
            result
                .address_components
                .last()
                .ok_or(GeocodingError::MissingPostalCode {
                    lat: coordinate.0,
                    lon: coordinate.1,
                })?;
        Ok(component.long_name.clone())
    }
}
