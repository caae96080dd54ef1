//! Adds canonical join keys to the library table.

use polars::prelude::*;

use libmap_common::{has_column, string_column, string_values};
use libmap_model::columns::{derived, library};
use libmap_model::{GeoId, GeoLevel};

use crate::geo_id::{
    county_fips_from_parts, normalize_county_id, normalize_tract_id, normalize_zip_id,
};

/// Where the county FIPS code of a library row comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountySource {
    /// A single column holding the 5-digit FIPS code.
    Fips(String),
    /// Separate state and county code columns.
    StateAndCounty { state: String, county: String },
}

/// Raw identifier columns of the library table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryGeoColumns {
    pub tract: Option<String>,
    pub zip: String,
    pub county: CountySource,
}

impl Default for LibraryGeoColumns {
    fn default() -> Self {
        Self {
            tract: Some(library::TRACT.to_string()),
            zip: library::ZIP.to_string(),
            county: CountySource::StateAndCounty {
                state: library::STATE_FIPS.to_string(),
                county: library::COUNTY_FIPS.to_string(),
            },
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// First five digits of a well-formed tract code as a county key.
fn county_from_tract(tract: &GeoId) -> Option<GeoId> {
    let code = tract.code();
    if code.len() != GeoLevel::Tract.code_width() || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    code.get(..5).map(normalize_county_id)
}

fn keys_to_column(name: &str, ids: Vec<Option<GeoId>>) -> Column {
    string_column(name, ids.into_iter().map(|id| id.map(GeoId::into_string)).collect())
}

/// Returns a copy of `df` with `TRACT_GEO_ID`, `COUNTY_GEO_ID` and
/// `ZIP_GEO_ID` columns.
///
/// Missing raw cells give a null key. When the county columns are absent the
/// county key falls back to the first five digits of the tract code; when
/// neither is available the county key column is all null.
pub fn attach_geo_ids(df: &DataFrame, columns: &LibraryGeoColumns) -> PolarsResult<DataFrame> {
    let height = df.height();

    let tracts: Vec<Option<GeoId>> = match &columns.tract {
        Some(name) if has_column(df, name) => string_values(df, name)?
            .into_iter()
            .map(|raw| non_empty(raw).map(|raw| normalize_tract_id(&raw)))
            .collect(),
        _ => vec![None; height],
    };

    let zips: Vec<Option<GeoId>> = string_values(df, &columns.zip)?
        .into_iter()
        .map(|raw| non_empty(raw).map(|raw| normalize_zip_id(&raw)))
        .collect();

    let counties: Vec<Option<GeoId>> = match &columns.county {
        CountySource::Fips(name) if has_column(df, name) => string_values(df, name)?
            .into_iter()
            .map(|raw| non_empty(raw).map(|raw| normalize_county_id(&raw)))
            .collect(),
        CountySource::StateAndCounty { state, county }
            if has_column(df, state) && has_column(df, county) =>
        {
            let states = string_values(df, state)?;
            let codes = string_values(df, county)?;
            states
                .into_iter()
                .zip(codes)
                .map(|(state, county)| {
                    let fips = county_fips_from_parts(
                        state.as_deref().unwrap_or(""),
                        county.as_deref().unwrap_or(""),
                    )?;
                    Some(normalize_county_id(&fips.to_string()))
                })
                .collect()
        }
        _ => {
            tracing::debug!(
                source = ?columns.county,
                "county columns absent, deriving county keys from tract codes"
            );
            tracts
                .iter()
                .map(|tract| county_from_tract(tract.as_ref()?))
                .collect()
        }
    };

    let unmatched = counties.iter().filter(|id| id.is_none()).count();
    if unmatched > 0 {
        tracing::warn!(rows = unmatched, "library rows without a county key");
    }

    let mut out = df.clone();
    out.with_column(keys_to_column(derived::TRACT_GEO_ID, tracts))?;
    out.with_column(keys_to_column(derived::COUNTY_GEO_ID, counties))?;
    out.with_column(keys_to_column(derived::ZIP_GEO_ID, zips))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library_frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("LIBID".into(), vec!["A", "B", "C"]).into_column(),
            Series::new("ZIP".into(), vec![Some("94501"), Some("2134-0001"), None])
                .into_column(),
            Series::new("INCITSST".into(), vec![Some("6"), Some("25"), Some("")]).into_column(),
            Series::new("INCITSCO".into(), vec![Some("1"), Some("025"), Some("003")])
                .into_column(),
            Series::new(
                "CENTRACT".into(),
                vec![Some("6001400100"), None, Some("36061000100")],
            )
            .into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn adds_three_key_columns() {
        let df = attach_geo_ids(&library_frame(), &LibraryGeoColumns::default()).unwrap();
        assert_eq!(
            string_values(&df, derived::ZIP_GEO_ID).unwrap(),
            vec![
                Some("860Z200US94501".to_string()),
                Some("860Z200US02134".to_string()),
                None
            ]
        );
        assert_eq!(
            string_values(&df, derived::COUNTY_GEO_ID).unwrap(),
            vec![
                Some("0500000US06001".to_string()),
                Some("0500000US25025".to_string()),
                None
            ]
        );
        assert_eq!(
            string_values(&df, derived::TRACT_GEO_ID).unwrap(),
            vec![
                Some("1400000US06001400100".to_string()),
                None,
                Some("1400000US36061000100".to_string())
            ]
        );
    }

    #[test]
    fn county_falls_back_to_tract_prefix() {
        let df = library_frame().drop("INCITSCO").unwrap();
        let df = attach_geo_ids(&df, &LibraryGeoColumns::default()).unwrap();
        assert_eq!(
            string_values(&df, derived::COUNTY_GEO_ID).unwrap(),
            vec![
                Some("0500000US06001".to_string()),
                None,
                Some("0500000US36061".to_string())
            ]
        );
    }

    #[test]
    fn non_digit_tract_gives_no_county() {
        let df = DataFrame::new(vec![
            Series::new("ZIP".into(), vec!["00901", "94501"]).into_column(),
            Series::new("CENTRACT".into(), vec!["1234é12345", "6001400100"]).into_column(),
        ])
        .unwrap();

        let df = attach_geo_ids(&df, &LibraryGeoColumns::default()).unwrap();

        assert_eq!(
            string_values(&df, derived::COUNTY_GEO_ID).unwrap(),
            vec![None, Some("0500000US06001".to_string())]
        );
    }

    #[test]
    fn input_frame_is_untouched() {
        let input = library_frame();
        let _ = attach_geo_ids(&input, &LibraryGeoColumns::default()).unwrap();
        assert_eq!(input.width(), 5);
    }
}
