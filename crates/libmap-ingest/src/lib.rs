//! Source loading for libmap.
//!
//! Reads the library survey, the ACS Census extracts and the county election
//! returns into Polars DataFrames. Every column is read as text first; each
//! source loader then coerces only the fields it owns, with the default the
//! field's publisher convention calls for.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use libmap_ingest::{CensusTable, load_census_table, load_election, load_library_survey};
//!
//! let libraries = load_library_survey(&PathBuf::from("data/PLS_FY22_AE_pud22i.csv"))?;
//! let race = load_census_table(CensusTable::Race, &[PathBuf::from("data/race-tracts.csv")])?;
//! let votes = load_election(&PathBuf::from("data/countypres.csv"), 2020)?;
//! ```

mod coerce;
mod csv;
mod error;
mod sources;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{CsvOptions, SourceEncoding, read_csv_table, read_csv_tables};

// === Coercion ===
pub use coerce::{coerce_float_columns, coerce_int_columns, require_columns};

// === Source Loaders ===
pub use sources::{CensusTable, load_census_table, load_election, load_library_survey};
