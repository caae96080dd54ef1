//! Projection of the final frame into the `{cols, rows}` document.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::column_map::ColumnMap;
use crate::error::{OutputError, Result};

/// Written in place of a missing value.
pub const MISSING_SENTINEL: i64 = -1;

/// Positional rows aligned to `cols`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputTable {
    pub cols: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

fn cell_to_json(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::from(MISSING_SENTINEL),
        AnyValue::Boolean(v) => Value::Bool(v),
        AnyValue::Int8(v) => Value::from(v),
        AnyValue::Int16(v) => Value::from(v),
        AnyValue::Int32(v) => Value::from(v),
        AnyValue::Int64(v) => Value::from(v),
        AnyValue::UInt8(v) => Value::from(v),
        AnyValue::UInt16(v) => Value::from(v),
        AnyValue::UInt32(v) => Value::from(v),
        AnyValue::UInt64(v) => Value::from(v),
        AnyValue::Float32(v) => float_to_json(f64::from(v)),
        AnyValue::Float64(v) => float_to_json(v),
        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        other => Value::String(other.to_string()),
    }
}

fn float_to_json(v: f64) -> Value {
    serde_json::Number::from_f64(v).map_or(Value::from(MISSING_SENTINEL), Value::Number)
}

/// Selects and renames the mapped columns, one output row per frame row.
///
/// Nulls become `-1`. A mapped column the frame does not have becomes `""`
/// in every row so rows stay as wide as `cols`.
pub fn project(df: &DataFrame, map: &ColumnMap) -> Result<OutputTable> {
    map.validate()?;

    let mut absent = Vec::new();
    let columns: Vec<Option<&Column>> = map
        .iter()
        .map(|mapping| {
            let column = df.column(&mapping.source).ok();
            if column.is_none() {
                absent.push(mapping.source.as_str());
            }
            column
        })
        .collect();
    if !absent.is_empty() {
        tracing::debug!(columns = ?absent, "mapped columns absent from frame; written as empty");
    }

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let mut row = Vec::with_capacity(columns.len());
        for column in &columns {
            let cell = match column {
                Some(column) => cell_to_json(column.get(idx)?),
                None => Value::String(String::new()),
            };
            row.push(cell);
        }
        rows.push(row);
    }

    Ok(OutputTable {
        cols: map.output_names(),
        rows,
    })
}

/// Writes the document as compact JSON, creating parent directories.
pub fn write_output_json(path: &Path, table: &OutputTable) -> Result<()> {
    let io_error = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, table)?;
    writer.flush().map_err(io_error)?;

    tracing::info!(
        path = %path.display(),
        rows = table.rows.len(),
        columns = table.cols.len(),
        "wrote output"
    );
    Ok(())
}
