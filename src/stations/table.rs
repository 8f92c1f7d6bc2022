use crate::stations::error::StationTableError;
use crate::stationzip::LatLon;
use log::info;
use polars::prelude::*;
use std::path::Path;
use tokio::task;

/// Reads a headered station CSV into a DataFrame using a blocking task.
pub async fn read_stations(path: impl AsRef<Path>) -> Result<DataFrame, StationTableError> {
    let path_buf = path.as_ref().to_path_buf();
    task::spawn_blocking(move || {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path_buf.clone()))
            .map_err(|e| StationTableError::CsvRead(path_buf.clone(), e))?
            .finish()
            .map_err(|e| StationTableError::CsvRead(path_buf.clone(), e))?;
        info!(
            "Read {} station rows from {:?}",
            df.height(),
            path_buf
        );
        Ok(df)
    })
    .await?
}

/// Extracts the coordinate pairs from the latitude/longitude columns, in row
/// order.
///
/// Both columns are cast to `Float64`, so integer coordinate columns are
/// accepted. A missing column fails with [`StationTableError::MissingColumn`];
/// a null or unparseable value fails with
/// [`StationTableError::NullCoordinate`] naming the offending row.
pub fn coordinates(
    df: &DataFrame,
    lat_col: &str,
    lon_col: &str,
) -> Result<Vec<LatLon>, StationTableError> {
    let lats = coordinate_column(df, lat_col)?;
    let lons = coordinate_column(df, lon_col)?;

    let mut coords = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let lat = lats
            .get(row)
            .ok_or_else(|| StationTableError::NullCoordinate {
                column: lat_col.to_string(),
                row,
            })?;
        let lon = lons
            .get(row)
            .ok_or_else(|| StationTableError::NullCoordinate {
                column: lon_col.to_string(),
                row,
            })?;
        coords.push(LatLon(lat, lon));
    }
    Ok(coords)
}

fn coordinate_column(df: &DataFrame, name: &str) -> Result<Float64Chunked, StationTableError> {
    let column = df
        .column(name)
        .map_err(|e| StationTableError::MissingColumn {
            column: name.to_string(),
            source: e,
        })?;
    let cast = column
        .cast(&DataType::Float64)
        .map_err(|e| StationTableError::ColumnType {
            column: name.to_string(),
            source: e,
        })?;
    let chunked = cast.f64().map_err(|e| StationTableError::ColumnType {
        column: name.to_string(),
        source: e,
    })?;
    Ok(chunked.clone())
}

/// Appends the postal codes as a new trailing string column.
///
/// Existing columns keep their order; the code count must match the table
/// height exactly.
pub fn append_postal_codes(
    mut df: DataFrame,
    codes: Vec<String>,
    column: &str,
) -> Result<DataFrame, StationTableError> {
    if codes.len() != df.height() {
        return Err(StationTableError::LengthMismatch {
            codes: codes.len(),
            rows: df.height(),
        });
    }
    let codes = Column::new(column.into(), codes);
    df.with_column(codes)
        .map_err(|e| StationTableError::ColumnAppend {
            column: column.to_string(),
            source: e,
        })?;
    Ok(df)
}

/// Writes the station table as a headered CSV using a blocking task.
pub async fn write_stations(
    df: DataFrame,
    path: impl AsRef<Path>,
) -> Result<(), StationTableError> {
    let path_buf = path.as_ref().to_path_buf();
    let mut df = df;
    task::spawn_blocking(move || {
        let file = std::fs::File::create(&path_buf)
            .map_err(|e| StationTableError::FileCreate(path_buf.clone(), e))?;
        CsvWriter::new(file)
            .include_header(true)
            .finish(&mut df)
            .map_err(|e| StationTableError::CsvWrite(path_buf.clone(), e))?;
        info!("Wrote {} station rows to {:?}", df.height(), path_buf);
        Ok::<(), StationTableError>(())
    })
    .await??;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_preserve_row_order() -> Result<(), StationTableError> {
        let df = df!(
            "name" => ["a", "b", "c"],
            "lat" => [37.77, 40.71, 51.51],
            "long" => [-122.42, -74.01, -0.13],
        )
        .unwrap();

        let coords = coordinates(&df, "lat", "long")?;
        assert_eq!(
            coords,
            vec![
                LatLon(37.77, -122.42),
                LatLon(40.71, -74.01),
                LatLon(51.51, -0.13)
            ]
        );
        Ok(())
    }

    #[test]
    fn integer_coordinate_columns_are_accepted() -> Result<(), StationTableError> {
        let df = df!(
            "lat" => [37i64, 40],
            "long" => [-122i64, -74],
        )
        .unwrap();

        let coords = coordinates(&df, "lat", "long")?;
        assert_eq!(coords, vec![LatLon(37.0, -122.0), LatLon(40.0, -74.0)]);
        Ok(())
    }

    #[test]
    fn missing_column_is_reported() {
        let df = df!("lat" => [37.77]).unwrap();
        let err = coordinates(&df, "lat", "long").expect_err("missing column must fail");
        assert!(matches!(
            err,
            StationTableError::MissingColumn { column, .. } if column == "long"
        ));
    }

    #[test]
    fn null_coordinate_is_reported_with_row() {
        let df = df!(
            "lat" => [Some(37.77), None],
            "long" => [Some(-122.42), Some(-74.01)],
        )
        .unwrap();
        let err = coordinates(&df, "lat", "long").expect_err("null coordinate must fail");
        assert!(matches!(
            err,
            StationTableError::NullCoordinate { column, row } if column == "lat" && row == 1
        ));
    }

    #[test]
    fn non_numeric_coordinate_is_reported() {
        let df = df!(
            "lat" => ["north"],
            "long" => [-122.42],
        )
        .unwrap();
        // A string column casts to Float64 with nulls for unparseable values.
        let err = coordinates(&df, "lat", "long").expect_err("non-numeric value must fail");
        assert!(matches!(
            err,
            StationTableError::NullCoordinate { column, row } if column == "lat" && row == 0
        ));
    }

    #[test]
    fn append_keeps_column_order_and_adds_trailing_column() -> Result<(), StationTableError> {
        let df = df!(
            "name" => ["a", "b"],
            "lat" => [37.77, 40.71],
            "long" => [-122.42, -74.01],
        )
        .unwrap();

        let enriched =
            append_postal_codes(df, vec!["94103".to_string(), "10001".to_string()], "zip_code")?;
        assert_eq!(
            enriched.get_column_names(),
            ["name", "lat", "long", "zip_code"]
        );
        assert_eq!(enriched.height(), 2);
        let codes = enriched.column("zip_code").unwrap().str().unwrap();
        assert_eq!(codes.get(0), Some("94103"));
        assert_eq!(codes.get(1), Some("10001"));
        Ok(())
    }

    #[test]
    fn append_rejects_length_mismatch() {
        let df = df!("lat" => [37.77], "long" => [-122.42]).unwrap();
        let err = append_postal_codes(df, vec![], "zip_code").expect_err("mismatch must fail");
        assert!(matches!(
            err,
            StationTableError::LengthMismatch { codes: 0, rows: 1 }
        ));
    }

    #[test]
    fn append_to_empty_table_adds_header_only() -> Result<(), StationTableError> {
        let df = df!(
            "lat" => Vec::<f64>::new(),
            "long" => Vec::<f64>::new(),
        )
        .unwrap();

        let enriched = append_postal_codes(df, vec![], "zip_code")?;
        assert_eq!(enriched.height(), 0);
        assert_eq!(enriched.get_column_names(), ["lat", "long", "zip_code"]);
        Ok(())
    }

    #[tokio::test]
    async fn csv_round_trip_preserves_rows_and_columns() -> Result<(), StationTableError> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stations.csv");
        std::fs::write(&path, "name,lat,long\nsf,37.77,-122.42\nnyc,40.71,-74.01\n").unwrap();

        let df = read_stations(&path).await?;
        assert_eq!(df.height(), 2);
        assert_eq!(df.get_column_names(), ["name", "lat", "long"]);

        let out_path = dir.path().join("out.csv");
        write_stations(df, &out_path).await?;
        let written = std::fs::read_to_string(&out_path).unwrap();
        assert!(written.starts_with("name,lat,long\n"));
        assert_eq!(written.lines().count(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn read_missing_file_is_reported() {
        let err = read_stations("does/not/exist.csv")
            .await
            .expect_err("missing file must fail");
        assert!(matches!(err, StationTableError::CsvRead(..)));
    }
}
