//! Source-specific loaders.
//!
//! Each loader reads one publisher's layout, checks the columns the pipeline
//! depends on, coerces them, and drops what the pipeline never reads.

use std::path::{Path, PathBuf};

use polars::prelude::*;

use libmap_common::{has_column, i64_column, i64_values, string_values};
use libmap_model::columns::{census, derived, election, library};
use libmap_normalization::parse_int;

use crate::coerce::{coerce_float_columns, coerce_int_columns, require_columns};
use crate::csv::{CsvOptions, read_csv_table, read_csv_tables};
use crate::error::{IngestError, Result};

/// Loads the library survey administrative-entity file.
///
/// Count fields use the survey's `-1` "not reported" convention on parse
/// failure; coordinates that do not parse become null.
pub fn load_library_survey(path: &Path) -> Result<DataFrame> {
    let raw = read_csv_table(path, &CsvOptions::survey())?;
    require_columns(&raw, library::REQUIRED, path)?;

    let df = coerce_int_columns(&raw, library::COUNT_FIELDS, -1)?;
    let df = coerce_float_columns(&df, library::COORDINATE_FIELDS)?;

    tracing::info!(path = %path.display(), rows = df.height(), "loaded library survey");
    Ok(df)
}

/// ACS tables the pipeline knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CensusTable {
    /// B19013 median household income.
    Income,
    /// B02001 race.
    Race,
    /// B03003 Hispanic or Latino origin.
    Ethnicity,
    /// S0101 age and sex.
    Age,
}

impl CensusTable {
    pub fn name(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Race => "race",
            Self::Ethnicity => "ethnicity",
            Self::Age => "age",
        }
    }

    /// Publisher fields the pipeline reads from this table.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Income => &[census::MEDIAN_INCOME_RAW],
            Self::Race => &census::RACE_FIELDS,
            Self::Ethnicity => &census::ETHNICITY_FIELDS,
            Self::Age => &census::AGE_FIELDS,
        }
    }

    fn coerce(self, df: &DataFrame) -> Result<DataFrame> {
        match self {
            Self::Income => {
                let income: Vec<Option<i64>> = string_values(df, census::MEDIAN_INCOME_RAW)?
                    .into_iter()
                    .map(|raw| Some(parse_int(raw.as_deref().unwrap_or(""), -1)))
                    .collect();
                let mut out = df.clone();
                out.with_column(i64_column(derived::MEDIAN_INCOME, income))?;
                Ok(out)
            }
            Self::Race | Self::Ethnicity => coerce_int_columns(df, self.fields(), 0),
            Self::Age => coerce_float_columns(df, self.fields()),
        }
    }

    fn kept_columns(self) -> Vec<&'static str> {
        let mut kept = vec![census::GEO_ID, census::NAME];
        kept.extend_from_slice(self.fields());
        if self == Self::Income {
            kept.push(derived::MEDIAN_INCOME);
        }
        kept
    }
}

/// Loads one ACS table from one or more extracts (e.g. a tract-level and a
/// ZIP-level download), keeping `GEO_ID`, `NAME` and the table's fields.
pub fn load_census_table(table: CensusTable, paths: &[PathBuf]) -> Result<DataFrame> {
    if paths.is_empty() {
        return Err(IngestError::NoInputFiles {
            source_name: table.name(),
        });
    }
    let raw = read_csv_tables(paths, &CsvOptions::census())?;

    let mut required = vec![census::GEO_ID];
    required.extend_from_slice(table.fields());
    require_columns(&raw, &required, &paths[0])?;

    let coerced = table.coerce(&raw)?;
    let kept: Vec<&str> = table
        .kept_columns()
        .into_iter()
        .filter(|name| has_column(&coerced, name))
        .collect();
    let df = coerced.select(kept)?;

    tracing::info!(
        table = table.name(),
        files = paths.len(),
        rows = df.height(),
        "loaded census table"
    );
    Ok(df)
}

/// Loads county election returns for one year.
///
/// Rows from other years, and rows whose county FIPS is missing or not
/// positive (state-wide overseas ballots, for instance), are dropped.
pub fn load_election(path: &Path, year: i64) -> Result<DataFrame> {
    let raw = read_csv_table(path, &CsvOptions::default())?;
    require_columns(&raw, election::REQUIRED, path)?;

    let df = coerce_int_columns(&raw, &[election::YEAR, election::CANDIDATE_VOTES], 0)?;

    let years = i64_values(&df, election::YEAR)?;
    let fips = string_values(&df, election::COUNTY_FIPS)?;
    let mask: Vec<bool> = years
        .iter()
        .zip(&fips)
        .map(|(row_year, raw_fips)| {
            *row_year == Some(year) && parse_int(raw_fips.as_deref().unwrap_or(""), -1) > 0
        })
        .collect();
    let dropped = mask.iter().filter(|keep| !**keep).count();
    let mask = BooleanChunked::from_slice("keep".into(), &mask);
    let filtered = df.filter(&mask)?;

    if !has_column(&filtered, election::MODE) {
        tracing::debug!(path = %path.display(), "election file has no mode column");
    }
    tracing::info!(
        path = %path.display(),
        year,
        rows = filtered.height(),
        dropped,
        "loaded election returns"
    );
    Ok(filtered)
}
