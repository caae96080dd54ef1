//! Typed column buffers for row-level gathers.
//!
//! Merges and joins pick rows out of one frame into the row order of another.
//! Columns are read once into a typed buffer, gathered with optional row
//! positions (`None` yields null), and written back with their type intact.

use polars::prelude::*;

use libmap_common::{f64_column, f64_values, i64_column, i64_values, string_column, string_values};

/// A single demographic cell.
#[derive(Debug, Clone, PartialEq)]
pub enum DemographicValue {
    Int(i64),
    Float(f64),
    Text(String),
}

/// One column's values, typed by the column's dtype.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ColumnValues {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl ColumnValues {
    pub(crate) fn read(df: &DataFrame, name: &str) -> PolarsResult<Self> {
        let dtype = df.column(name)?.dtype().clone();
        if dtype.is_integer() {
            Ok(Self::Int(i64_values(df, name)?))
        } else if dtype.is_float() {
            Ok(Self::Float(f64_values(df, name)?))
        } else {
            Ok(Self::Text(string_values(df, name)?))
        }
    }

    pub(crate) fn gather(&self, rows: &[Option<usize>]) -> Self {
        fn pick<T: Clone>(values: &[Option<T>], rows: &[Option<usize>]) -> Vec<Option<T>> {
            rows.iter()
                .map(|row| row.and_then(|row| values.get(row).cloned().flatten()))
                .collect()
        }
        match self {
            Self::Int(values) => Self::Int(pick(values, rows)),
            Self::Float(values) => Self::Float(pick(values, rows)),
            Self::Text(values) => Self::Text(pick(values, rows)),
        }
    }

    /// Fills nulls in `self` from `other`. Buffers of different types are
    /// left as they are.
    pub(crate) fn coalesce(self, other: &Self) -> Self {
        fn fill<T: Clone>(mut values: Vec<Option<T>>, other: &[Option<T>]) -> Vec<Option<T>> {
            for (value, fallback) in values.iter_mut().zip(other) {
                if value.is_none() {
                    value.clone_from(fallback);
                }
            }
            values
        }
        match (self, other) {
            (Self::Int(values), Self::Int(other)) => Self::Int(fill(values, other)),
            (Self::Float(values), Self::Float(other)) => Self::Float(fill(values, other)),
            (Self::Text(values), Self::Text(other)) => Self::Text(fill(values, other)),
            (values, _) => values,
        }
    }

    pub(crate) fn into_column(self, name: &str) -> Column {
        match self {
            Self::Int(values) => i64_column(name, values),
            Self::Float(values) => f64_column(name, values),
            Self::Text(values) => string_column(name, values),
        }
    }
}
