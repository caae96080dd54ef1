//! Geography-level lookup over the merged demographic table.

use std::collections::HashMap;

use polars::prelude::*;

use libmap_common::string_values;
use libmap_model::columns::census;
use libmap_model::{GeoId, GeoLevel};

use crate::error::{Result, TransformError, require};
use crate::values::DemographicValue;

/// Read-only map from a geographic identifier to its demographic row.
///
/// Only rows whose `GEO_ID` carries the index's level prefix are indexed, so
/// one merged table can back both the fine (county or tract) index and the
/// ZIP index.
#[derive(Debug, Clone)]
pub struct DemographicIndex {
    level: GeoLevel,
    frame: DataFrame,
    rows: HashMap<GeoId, usize>,
}

impl DemographicIndex {
    pub fn build(df: &DataFrame, level: GeoLevel) -> Result<Self> {
        require(df, "demographic index", &[census::GEO_ID])?;

        let mut rows = HashMap::new();
        for (row, raw) in string_values(df, census::GEO_ID)?.into_iter().enumerate() {
            let Some(id) = raw.and_then(|raw| GeoId::parse(&raw).ok()) else {
                continue;
            };
            if id.level() == level {
                rows.entry(id).or_insert(row);
            }
        }

        tracing::debug!(level = %level, entries = rows.len(), "built demographic index");
        Ok(Self {
            level,
            frame: df.clone(),
            rows,
        })
    }

    pub fn level(&self) -> GeoLevel {
        self.level
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row of the backing frame for `id`.
    pub fn row(&self, id: &GeoId) -> Option<usize> {
        self.rows.get(id).copied()
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Value of `field` for `id`; `Ok(None)` when the identifier is not
    /// indexed or the cell is null.
    pub fn value(&self, id: &GeoId, field: &str) -> Result<Option<DemographicValue>> {
        match self.row(id) {
            Some(row) => self.value_at(row, field),
            None => Ok(None),
        }
    }

    /// Value of `field` at a row of the backing frame.
    pub fn value_at(&self, row: usize, field: &str) -> Result<Option<DemographicValue>> {
        let column = self
            .frame
            .column(field)
            .map_err(|_| TransformError::missing("demographic lookup", field))?;
        Ok(cell_value(column.get(row)?))
    }
}

fn cell_value(value: AnyValue<'_>) -> Option<DemographicValue> {
    match value {
        AnyValue::Null => None,
        AnyValue::Float32(v) => Some(DemographicValue::Float(f64::from(v))),
        AnyValue::Float64(v) => Some(DemographicValue::Float(v)),
        AnyValue::String(s) => Some(DemographicValue::Text(s.to_string())),
        AnyValue::StringOwned(s) => Some(DemographicValue::Text(s.to_string())),
        other => match libmap_common::any_to_i64(other.clone()) {
            Some(v) => Some(DemographicValue::Int(v)),
            None => Some(DemographicValue::Text(libmap_common::any_to_string(other))),
        },
    }
}
