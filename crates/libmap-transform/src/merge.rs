//! Outer merge of demographic tables on `GEO_ID`.

use std::collections::HashMap;

use polars::prelude::*;

use libmap_common::{string_column, string_values};
use libmap_model::columns::census;

use crate::error::{Result, require};
use crate::values::ColumnValues;

/// Merges demographic tables into one row per geographic identifier.
///
/// Identifiers appear in first-seen order across the tables. Within a table
/// the first row for an identifier wins. A column carried by several tables
/// (`NAME`, typically) keeps the earliest table's value and is filled from
/// later tables where that value is null. Rows without a `GEO_ID` are
/// dropped.
pub fn merge_on_geo_id(tables: &[DataFrame]) -> Result<DataFrame> {
    let mut ids: Vec<String> = Vec::new();
    let mut position: HashMap<String, usize> = HashMap::new();
    let mut per_table: Vec<Vec<Option<String>>> = Vec::with_capacity(tables.len());

    for table in tables {
        require(table, "demographic merge", &[census::GEO_ID])?;
        let geo_ids = string_values(table, census::GEO_ID)?;
        for id in geo_ids.iter().flatten() {
            if !position.contains_key(id) {
                position.insert(id.clone(), ids.len());
                ids.push(id.clone());
            }
        }
        per_table.push(geo_ids);
    }

    let mut merged: Vec<(String, ColumnValues)> = Vec::new();
    for (table, geo_ids) in tables.iter().zip(&per_table) {
        let mut rows: Vec<Option<usize>> = vec![None; ids.len()];
        let mut skipped = 0usize;
        for (row, id) in geo_ids.iter().enumerate() {
            let Some(id) = id else {
                skipped += 1;
                continue;
            };
            let slot = &mut rows[position[id]];
            if slot.is_none() {
                *slot = Some(row);
            }
        }
        if skipped > 0 {
            tracing::debug!(rows = skipped, "dropped demographic rows without GEO_ID");
        }

        for name in table.get_column_names_str() {
            if name == census::GEO_ID {
                continue;
            }
            let gathered = ColumnValues::read(table, name)?.gather(&rows);
            match merged.iter_mut().find(|(existing, _)| existing == name) {
                Some((_, values)) => {
                    let current = std::mem::replace(values, ColumnValues::Int(Vec::new()));
                    *values = current.coalesce(&gathered);
                }
                None => merged.push((name.to_string(), gathered)),
            }
        }
    }

    let mut columns = Vec::with_capacity(merged.len() + 1);
    let height = ids.len();
    columns.push(string_column(
        census::GEO_ID,
        ids.into_iter().map(Some).collect(),
    ));
    for (name, values) in merged {
        columns.push(values.into_column(&name));
    }
    let df = DataFrame::new(columns)?;

    tracing::debug!(
        tables = tables.len(),
        rows = height,
        columns = df.width(),
        "merged demographic tables"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use libmap_common::i64_values;

    fn table(ids: &[Option<&str>], column: &str, values: &[i64]) -> DataFrame {
        DataFrame::new(vec![
            Series::new(census::GEO_ID.into(), ids.to_vec()).into_column(),
            Series::new(column.into(), values.to_vec()).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn outer_merge_in_first_seen_order() {
        let income = table(&[Some("A"), Some("B")], "MEDIAN_INCOME", &[10, 20]);
        let race = table(&[Some("C"), Some("A")], "B02001_002E", &[3, 1]);

        let df = merge_on_geo_id(&[income, race]).unwrap();

        assert_eq!(
            string_values(&df, census::GEO_ID).unwrap(),
            vec![Some("A".into()), Some("B".into()), Some("C".into())]
        );
        assert_eq!(
            i64_values(&df, "MEDIAN_INCOME").unwrap(),
            vec![Some(10), Some(20), None]
        );
        assert_eq!(
            i64_values(&df, "B02001_002E").unwrap(),
            vec![Some(1), None, Some(3)]
        );
    }

    #[test]
    fn first_row_wins_for_duplicate_ids() {
        let income = table(&[Some("A"), None, Some("A")], "MEDIAN_INCOME", &[10, 99, 30]);
        let df = merge_on_geo_id(&[income]).unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(i64_values(&df, "MEDIAN_INCOME").unwrap(), vec![Some(10)]);
    }

    #[test]
    fn shared_columns_are_filled_from_later_tables() {
        let first = table(&[Some("A")], "NAME_CODE", &[1]);
        let second = table(&[Some("A"), Some("B")], "NAME_CODE", &[7, 2]);
        let df = merge_on_geo_id(&[first, second]).unwrap();
        assert_eq!(
            i64_values(&df, "NAME_CODE").unwrap(),
            vec![Some(1), Some(2)]
        );
    }

    #[test]
    fn table_without_geo_id_is_rejected() {
        let df = DataFrame::new(vec![
            Series::new("NAME".into(), vec!["x"]).into_column(),
        ])
        .unwrap();
        assert!(merge_on_geo_id(&[df]).is_err());
    }
}
