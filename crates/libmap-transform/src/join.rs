//! Library-to-demographics join with geography fallback.
//!
//! City libraries take demographic values from the fine index (county by
//! default, tract when configured); everyone else, and cities the fine index
//! does not cover, falls back to ZIP-area values.

use polars::prelude::*;

use libmap_common::{i64_values, string_column, string_values};
use libmap_model::columns::{derived, library};
use libmap_model::{GeoId, GeoLevel, LocaleType};

use crate::error::{Result, require};
use crate::index::DemographicIndex;
use crate::values::{ColumnValues, DemographicValue};

/// The parts of a library row that decide where its demographics come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibrarySite {
    pub locale: LocaleType,
    pub tract: Option<GeoId>,
    pub county: Option<GeoId>,
    pub zip: Option<GeoId>,
}

impl LibrarySite {
    /// The site's identifier at `level`.
    pub fn id_at(&self, level: GeoLevel) -> Option<&GeoId> {
        match level {
            GeoLevel::Tract => self.tract.as_ref(),
            GeoLevel::County => self.county.as_ref(),
            GeoLevel::Zip => self.zip.as_ref(),
        }
    }
}

/// Which index a site was matched in, and the row it matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteMatch {
    Fine(GeoLevel, usize),
    Zip(usize),
    Unmatched,
}

impl SiteMatch {
    /// Label written to `DEMO_GEO_LEVEL`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Fine(level, _) => level.as_str(),
            Self::Zip(_) => GeoLevel::Zip.as_str(),
            Self::Unmatched => "none",
        }
    }
}

/// Picks the demographic row for a site.
///
/// A city-band locale with an identifier present in `fine_index` wins, even
/// when the ZIP index also has an entry. Otherwise the ZIP index is tried.
pub fn match_site(
    site: &LibrarySite,
    fine_index: &DemographicIndex,
    zip_index: &DemographicIndex,
) -> SiteMatch {
    if site.locale.is_city() {
        let fine_row = site
            .id_at(fine_index.level())
            .and_then(|id| fine_index.row(id));
        if let Some(row) = fine_row {
            return SiteMatch::Fine(fine_index.level(), row);
        }
    }
    match site.zip.as_ref().and_then(|id| zip_index.row(id)) {
        Some(row) => SiteMatch::Zip(row),
        None => SiteMatch::Unmatched,
    }
}

/// Resolves one demographic field for a site.
///
/// `Ok(None)` means no index matched, or the matched row has no value; the
/// projector writes it as `-1`.
pub fn resolve_demographic_value(
    site: &LibrarySite,
    field: &str,
    county_index: &DemographicIndex,
    zip_index: &DemographicIndex,
) -> Result<Option<DemographicValue>> {
    match match_site(site, county_index, zip_index) {
        SiteMatch::Fine(_, row) => county_index.value_at(row, field),
        SiteMatch::Zip(row) => zip_index.value_at(row, field),
        SiteMatch::Unmatched => Ok(None),
    }
}

fn geo_ids(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<GeoId>>> {
    if !libmap_common::has_column(df, column) {
        return Ok(vec![None; df.height()]);
    }
    Ok(string_values(df, column)?
        .into_iter()
        .map(|raw| raw.and_then(|raw| GeoId::parse(&raw).ok()))
        .collect())
}

/// Reads the locale code and the three join keys of every library row.
///
/// Expects the key columns added by `attach_geo_ids`; a missing tract key
/// column is treated as all null.
pub fn library_sites(df: &DataFrame) -> Result<Vec<LibrarySite>> {
    require(
        df,
        "library sites",
        &[library::LOCALE, derived::COUNTY_GEO_ID, derived::ZIP_GEO_ID],
    )?;
    let locales = i64_values(df, library::LOCALE)?;
    let tracts = geo_ids(df, derived::TRACT_GEO_ID)?;
    let counties = geo_ids(df, derived::COUNTY_GEO_ID)?;
    let zips = geo_ids(df, derived::ZIP_GEO_ID)?;

    Ok(locales
        .into_iter()
        .zip(tracts)
        .zip(counties)
        .zip(zips)
        .map(|(((locale, tract), county), zip)| LibrarySite {
            locale: LocaleType(locale.unwrap_or(-1)),
            tract,
            county,
            zip,
        })
        .collect())
}

/// Left-joins demographic `fields` onto the library table.
///
/// Every library row is kept in its original order. Each requested field is
/// added as a column of the same type it has in the demographic table, null
/// where the row matched nothing, and `DEMO_GEO_LEVEL` records which index
/// supplied the row.
pub fn join_demographics(
    library_df: &DataFrame,
    fine_index: &DemographicIndex,
    zip_index: &DemographicIndex,
    fields: &[&str],
) -> Result<DataFrame> {
    require(fine_index.frame(), "demographic join", fields)?;
    require(zip_index.frame(), "demographic join", fields)?;

    let matches: Vec<SiteMatch> = library_sites(library_df)?
        .iter()
        .map(|site| match_site(site, fine_index, zip_index))
        .collect();

    let fine_rows: Vec<Option<usize>> = matches
        .iter()
        .map(|m| match m {
            SiteMatch::Fine(_, row) => Some(*row),
            _ => None,
        })
        .collect();
    let zip_rows: Vec<Option<usize>> = matches
        .iter()
        .map(|m| match m {
            SiteMatch::Zip(row) => Some(*row),
            _ => None,
        })
        .collect();

    let mut out = library_df.clone();
    for field in fields {
        let from_fine = ColumnValues::read(fine_index.frame(), field)?.gather(&fine_rows);
        let from_zip = ColumnValues::read(zip_index.frame(), field)?.gather(&zip_rows);
        out.with_column(from_fine.coalesce(&from_zip).into_column(field))?;
    }
    out.with_column(string_column(
        derived::DEMO_GEO_LEVEL,
        matches.iter().map(|m| Some(m.label().to_string())).collect(),
    ))?;

    let fine = fine_rows.iter().flatten().count();
    let zip = zip_rows.iter().flatten().count();
    tracing::info!(
        rows = matches.len(),
        fine,
        zip,
        unmatched = matches.len() - fine - zip,
        fine_level = %fine_index.level(),
        "joined demographics"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use libmap_model::columns::census;

    fn demographics() -> DataFrame {
        DataFrame::new(vec![
            Series::new(
                census::GEO_ID.into(),
                vec!["0500000US06001", "860Z200US94501"],
            )
            .into_column(),
            Series::new("MEDIAN_INCOME".into(), vec![Some(111i64), Some(222)]).into_column(),
        ])
        .unwrap()
    }

    fn site(locale: i64) -> LibrarySite {
        LibrarySite {
            locale: LocaleType(locale),
            tract: None,
            county: Some(GeoId::new(GeoLevel::County, "06001")),
            zip: Some(GeoId::new(GeoLevel::Zip, "94501")),
        }
    }

    fn indices() -> (DemographicIndex, DemographicIndex) {
        let df = demographics();
        (
            DemographicIndex::build(&df, GeoLevel::County).unwrap(),
            DemographicIndex::build(&df, GeoLevel::Zip).unwrap(),
        )
    }

    #[test]
    fn city_prefers_county_over_zip() {
        let (county, zip) = indices();
        assert_eq!(
            resolve_demographic_value(&site(15), "MEDIAN_INCOME", &county, &zip).unwrap(),
            Some(DemographicValue::Int(111))
        );
    }

    #[test]
    fn non_city_uses_zip() {
        let (county, zip) = indices();
        assert_eq!(
            resolve_demographic_value(&site(25), "MEDIAN_INCOME", &county, &zip).unwrap(),
            Some(DemographicValue::Int(222))
        );
    }

    #[test]
    fn city_without_county_entry_falls_back_to_zip() {
        let (county, zip) = indices();
        let mut s = site(11);
        s.county = Some(GeoId::new(GeoLevel::County, "36061"));
        assert_eq!(match_site(&s, &county, &zip), SiteMatch::Zip(1));
    }

    #[test]
    fn no_match_is_none() {
        let (county, zip) = indices();
        let s = LibrarySite {
            locale: LocaleType(42),
            tract: None,
            county: None,
            zip: Some(GeoId::new(GeoLevel::Zip, "00001")),
        };
        assert_eq!(
            resolve_demographic_value(&s, "MEDIAN_INCOME", &county, &zip).unwrap(),
            None
        );
        assert_eq!(match_site(&s, &county, &zip).label(), "none");
    }

    #[test]
    fn locale_band_edges_use_zip() {
        let (county, zip) = indices();
        for locale in [0, 20, -1] {
            assert_eq!(match_site(&site(locale), &county, &zip), SiteMatch::Zip(1));
        }
    }
}
