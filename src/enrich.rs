use crate::geocoding::error::GeocodingError;
use crate::stationzip::LatLon;
use std::future::Future;

/// Maps every coordinate pair to a postal code through the injected lookup
/// function, strictly in sequence.
///
/// Row N+1 is not looked up before row N has resolved, matching the one
/// request in flight at a time contract of the pipeline. The output vector
/// preserves input order. The first failed lookup aborts the whole mapping
/// and propagates; no partial result is returned and no null placeholder is
/// substituted.
///
/// Production passes [`crate::GeocodingClient::postal_code`]; tests can pass
/// any deterministic closure.
pub async fn postal_codes_for<F, Fut>(
    coordinates: &[LatLon],
    lookup: F,
) -> Result<Vec<String>, GeocodingError>
where
    F: Fn(LatLon) -> Fut,
    Fut: Future<Output = Result<String, GeocodingError>>,
{
    let mut codes = Vec::with_capacity(coordinates.len());
    for &coordinate in coordinates {
        codes.push(lookup(coordinate).await?);
    }
    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test]
    async fn maps_coordinates_in_row_order() -> Result<(), GeocodingError> {
        let coords = [LatLon(1.0, 2.0), LatLon(3.0, 4.0), LatLon(5.0, 6.0)];
        let seen = Mutex::new(Vec::new());

        let codes = postal_codes_for(&coords, |c| {
            seen.lock().unwrap().push(c);
            async move { Ok(format!("{}-{}", c.0, c.1)) }
        })
        .await?;

        assert_eq!(codes, vec!["1-2", "3-4", "5-6"]);
        assert_eq!(*seen.lock().unwrap(), coords);
        Ok(())
    }

    #[tokio::test]
    async fn empty_input_performs_zero_lookups() -> Result<(), GeocodingError> {
        let seen = Mutex::new(Vec::new());
        let codes = postal_codes_for(&[], |c| {
            seen.lock().unwrap().push(c);
            async move { Ok(String::new()) }
        })
        .await?;

        assert!(codes.is_empty());
        assert!(seen.lock().unwrap().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn first_failure_aborts_and_stops_later_lookups() {
        let coords = [LatLon(1.0, 2.0), LatLon(3.0, 4.0), LatLon(5.0, 6.0)];
        let seen = Mutex::new(Vec::new());

        let result = postal_codes_for(&coords, |c| {
            seen.lock().unwrap().push(c);
            async move {
                if c == LatLon(3.0, 4.0) {
                    Err(GeocodingError::NoResults { lat: c.0, lon: c.1 })
                } else {
                    Ok("ok".to_string())
                }
            }
        })
        .await;

        assert!(matches!(
            result,
            Err(GeocodingError::NoResults { lat, lon }) if lat == 3.0 && lon == 4.0
        ));
        // The third coordinate must never be looked up.
        assert_eq!(*seen.lock().unwrap(), coords[..2]);
    }

    #[tokio::test]
    async fn identical_input_yields_identical_output() -> Result<(), GeocodingError> {
        let coords = [LatLon(37.77, -122.42), LatLon(40.71, -74.01)];
        let lookup = |c: LatLon| async move { Ok(format!("{:.0}", c.0 * 100.0)) };

        let first = postal_codes_for(&coords, lookup).await?;
        let second = postal_codes_for(&coords, lookup).await?;
        assert_eq!(first, second);
        Ok(())
    }
}
