//! Presentation columns: map links and readable area names.

use polars::prelude::*;

use libmap_common::{f64_values, format_numeric, has_column, string_column, string_values};
use libmap_model::columns::{census, derived, library};

use crate::error::{Result, require};

const MAP_ZOOM: u32 = 12;

/// OpenStreetMap link centred on a library's coordinates.
///
/// ```
/// use libmap_transform::geo_url;
///
/// assert_eq!(
///     geo_url(37.77, -122.27),
///     "https://www.openstreetmap.org/?mlat=37.77&mlon=-122.27&zoom=12"
/// );
/// ```
pub fn geo_url(latitude: f64, longitude: f64) -> String {
    format!(
        "https://www.openstreetmap.org/?mlat={}&mlon={}&zoom={MAP_ZOOM}",
        format_numeric(latitude),
        format_numeric(longitude),
    )
}

/// Adds `GEO_URL`; rows without both coordinates get null.
pub fn add_geo_url(df: &DataFrame) -> Result<DataFrame> {
    require(df, "map links", &[library::LATITUDE, library::LONGITUDE])?;
    let latitudes = f64_values(df, library::LATITUDE)?;
    let longitudes = f64_values(df, library::LONGITUDE)?;

    let urls: Vec<Option<String>> = latitudes
        .into_iter()
        .zip(longitudes)
        .map(|(lat, lon)| Some(geo_url(lat?, lon?)))
        .collect();

    let mut out = df.clone();
    out.with_column(string_column(derived::GEO_URL, urls))?;
    Ok(out)
}

/// Rewrites a `;`-separated Census area name as `area (county, state)`.
///
/// Names with any other shape are returned unchanged.
///
/// ```
/// use libmap_transform::area_description;
///
/// assert_eq!(
///     area_description("Census Tract 4001; Alameda County; California"),
///     "Census Tract 4001 (Alameda County, California)"
/// );
/// assert_eq!(area_description("ZCTA5 94501"), "ZCTA5 94501");
/// ```
pub fn area_description(name: &str) -> String {
    let parts: Vec<&str> = name.split("; ").collect();
    match parts.as_slice() {
        [area, county, state] => format!("{area} ({county}, {state})"),
        _ => name.to_string(),
    }
}

/// Adds `AREA_DESCRIPTION` from the demographic `NAME` column, when present.
pub fn describe_census_area(df: &DataFrame) -> Result<DataFrame> {
    if !has_column(df, census::NAME) {
        tracing::debug!("demographic table has no NAME column; no area descriptions");
        return Ok(df.clone());
    }
    let descriptions: Vec<Option<String>> = string_values(df, census::NAME)?
        .into_iter()
        .map(|name| name.map(|name| area_description(&name)))
        .collect();

    let mut out = df.clone();
    out.with_column(string_column(derived::AREA_DESCRIPTION, descriptions))?;
    Ok(out)
}
