//! Identifier normalization for libmap.
//!
//! Source tables spell the same place differently: `"06001"`, `"6001"`,
//! `6001.0`, ZIP+4 codes, tract numbers without leading zeros. This crate
//! turns all of them into canonical [`GeoId`](libmap_model::GeoId) keys and
//! hosts the shared lenient integer parser used for count fields.
//!
//! # Overview
//!
//! - **numeric**: [`parse_int`] with an explicit per-call-site default
//! - **geo_id**: [`normalize_county_id`], [`normalize_zip_id`], [`normalize_tract_id`]
//! - **frame**: [`attach_geo_ids`] adds the three key columns to the library table

mod frame;
mod geo_id;
mod numeric;

pub use frame::{CountySource, LibraryGeoColumns, attach_geo_ids};
pub use geo_id::{
    county_fips_from_parts, normalize_county_id, normalize_tract_id, normalize_zip_id, zero_pad,
};
pub use numeric::{parse_float, parse_int};
