//! Column presence checks and text-to-number coercion.

use std::path::Path;

use polars::prelude::*;

use libmap_common::{f64_column, has_column, i64_column, string_values};
use libmap_normalization::{parse_float, parse_int};

use crate::error::{IngestError, Result};

/// Fails on the first required column the frame does not carry.
pub fn require_columns(df: &DataFrame, required: &[&str], path: &Path) -> Result<()> {
    for column in required {
        if !has_column(df, column) {
            return Err(IngestError::MissingColumn {
                column: (*column).to_string(),
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Replaces each listed text column with an `Int64` column parsed by
/// [`parse_int`]; unparseable and missing cells take `default`.
///
/// Listed columns the frame does not have are skipped.
pub fn coerce_int_columns(df: &DataFrame, names: &[&str], default: i64) -> Result<DataFrame> {
    let mut out = df.clone();
    for name in names.iter().filter(|name| has_column(df, name)) {
        let parsed: Vec<Option<i64>> = string_values(df, name)?
            .into_iter()
            .map(|raw| Some(parse_int(raw.as_deref().unwrap_or(""), default)))
            .collect();
        out.with_column(i64_column(name, parsed))?;
    }
    Ok(out)
}

/// Replaces each listed text column with a `Float64` column; unparseable
/// cells become null.
pub fn coerce_float_columns(df: &DataFrame, names: &[&str]) -> Result<DataFrame> {
    let mut out = df.clone();
    for name in names.iter().filter(|name| has_column(df, name)) {
        let parsed: Vec<Option<f64>> = string_values(df, name)?
            .into_iter()
            .map(|raw| raw.as_deref().and_then(parse_float))
            .collect();
        out.with_column(f64_column(name, parsed))?;
    }
    Ok(out)
}
