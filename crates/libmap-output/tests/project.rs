//! Projection and JSON writer tests.

use polars::prelude::*;
use tempfile::TempDir;

use libmap_output::{ColumnMap, OutputTable, default_column_map, project, write_output_json};

fn linked_frame() -> DataFrame {
    df!(
        "LIBID" => ["A", "B", "C"],
        "MEDIAN_INCOME" => [Some(100i64), None, Some(-1)],
        "PERC_POC" => [Some(12.5f64), None, Some(40.0)],
        "UNMAPPED" => ["x", "y", "z"],
    )
    .unwrap()
}

fn small_map() -> ColumnMap {
    ColumnMap::new()
        .with("LIBID", "id")
        .with("MEDIAN_INCOME", "income")
        .with("PERC_POC", "perc_poc")
        .with("S0101_C02_022E", "perc_under_18")
}

#[test]
fn projects_in_map_order_with_sentinels() {
    let table = project(&linked_frame(), &small_map()).unwrap();
    let json = serde_json::to_string(&table).unwrap();

    insta::assert_snapshot!(json, @r#"{"cols":["id","income","perc_poc","perc_under_18"],"rows":[["A",100,12.5,""],["B",-1,-1,""],["C",-1,40.0,""]]}"#);
}

#[test]
fn rows_are_as_wide_as_cols() {
    let table = project(&linked_frame(), &default_column_map()).unwrap();
    assert_eq!(table.rows.len(), 3);
    assert!(table.rows.iter().all(|row| row.len() == table.cols.len()));
}

#[test]
fn writes_into_missing_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("public").join("data").join("libraries.json");
    let table = project(&linked_frame(), &small_map()).unwrap();

    write_output_json(&path, &table).unwrap();

    let written: OutputTable =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written, table);
}
