//! Shared utilities for libmap crates.
//!
//! This crate provides the polars helpers every pipeline stage uses to read
//! cells out of a `DataFrame` and to build replacement columns.

pub mod polars;

pub use polars::{
    any_to_f64, any_to_i64, any_to_string, f64_column, f64_values, format_numeric, has_column,
    i64_column, i64_values, string_column, string_values,
};
