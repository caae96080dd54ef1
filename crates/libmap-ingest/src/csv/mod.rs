//! CSV reading utilities.

mod reader;

pub use reader::{CsvOptions, SourceEncoding, read_csv_table, read_csv_tables};
