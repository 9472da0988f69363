//! Spatial generalisation to hexagonal grid cells
//!
//! Two independently callable stages: [`format_coordinates`] parses free-text
//! `"[lat, lon]"` tokens into aligned numeric columns, and
//! [`generalise_spatial`] maps each coordinate pair to the H3 cell containing
//! it at a chosen resolution. Mapping a precise point to its cell removes the
//! ability to pinpoint a location beyond the cell's area.

use crate::domain::errors::AnonkitError;
use crate::domain::result::Result;
use crate::domain::{Series, Value};
use h3o::{LatLng, Resolution};

/// Parse a column of coordinate tokens into latitude and longitude columns.
///
/// Tokens are expected in the form `"[lat, lon]"` with optional surrounding
/// whitespace; scientific-notation numerals are accepted. An empty input
/// column yields two empty output columns.
///
/// # Errors
///
/// Returns [`AnonkitError::InvalidCoordinate`] naming the offending token if
/// it is not exactly two comma-separated numerals after stripping brackets
/// and whitespace, or if the cell is not text at all.
///
/// # Examples
///
/// ```
/// use anonkit::domain::Series;
/// use anonkit::generalisation::format_coordinates;
///
/// # fn example() -> anonkit::domain::Result<()> {
/// let tokens = Series::from_texts("location", ["[40.7128, -74.0060]"]);
/// let (latitude, longitude) = format_coordinates(&tokens)?;
/// assert_eq!(latitude, vec![40.7128]);
/// assert_eq!(longitude, vec![-74.0060]);
/// # Ok(())
/// # }
/// ```
pub fn format_coordinates(series: &Series) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut latitude = Vec::with_capacity(series.len());
    let mut longitude = Vec::with_capacity(series.len());

    for value in series.iter() {
        let token = match value {
            Value::Text(token) => token,
            other => return Err(AnonkitError::InvalidCoordinate(other.to_string())),
        };
        let (lat, lon) = parse_coordinate(token)?;
        latitude.push(lat);
        longitude.push(lon);
    }

    Ok((latitude, longitude))
}

fn parse_coordinate(token: &str) -> Result<(f64, f64)> {
    let invalid = || AnonkitError::InvalidCoordinate(token.to_string());

    let inner = token
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim();
    let fields: Vec<&str> = inner.split(',').collect();
    let [lat, lon] = fields.as_slice() else {
        return Err(invalid());
    };

    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;
    Ok((lat, lon))
}

/// Generalise coordinate pairs to H3 cell identifiers at a resolution.
///
/// Validation order: resolution range first, then latitude range, then
/// longitude range. The mapping is deterministic and has no memory across
/// calls; the output series is named `h3_index` and holds the canonical
/// lowercase-hex cell identifiers as text.
///
/// Latitude and longitude columns of unequal length are a data-quality
/// warning, not a hard failure: a `tracing` warning is emitted and only the
/// overlapping positions are processed.
///
/// # Errors
///
/// - [`AnonkitError::ResolutionOutOfRange`] if `spatial_resolution > 15`
/// - [`AnonkitError::LatitudeOutOfRange`] for a latitude outside `[-90, 90]`
///   or non-finite
/// - [`AnonkitError::LongitudeOutOfRange`] for a longitude outside
///   `[-180, 180]` or non-finite
pub fn generalise_spatial(
    latitude: &[f64],
    longitude: &[f64],
    spatial_resolution: u8,
) -> Result<Series> {
    let resolution = Resolution::try_from(spatial_resolution)
        .map_err(|_| AnonkitError::ResolutionOutOfRange(spatial_resolution))?;

    if let Some(bad) = latitude
        .iter()
        .copied()
        .find(|v| !v.is_finite() || !(-90.0..=90.0).contains(v))
    {
        return Err(AnonkitError::LatitudeOutOfRange(bad));
    }
    if let Some(bad) = longitude
        .iter()
        .copied()
        .find(|v| !v.is_finite() || !(-180.0..=180.0).contains(v))
    {
        return Err(AnonkitError::LongitudeOutOfRange(bad));
    }

    if latitude.len() != longitude.len() {
        tracing::warn!(
            latitude_len = latitude.len(),
            longitude_len = longitude.len(),
            "latitude and longitude columns are of unequal length; extra values will be ignored"
        );
    }

    let cells = latitude
        .iter()
        .zip(longitude.iter())
        .map(|(&lat, &lon)| {
            let coord = LatLng::new(lat, lon).map_err(|_| AnonkitError::LatitudeOutOfRange(lat))?;
            Ok(Value::Text(coord.to_cell(resolution).to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Series::new("h3_index", cells))
}
