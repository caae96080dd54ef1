//! Output stage for libmap.
//!
//! Projects the linked frame onto an ordered column map and writes the
//! `{"cols": [...], "rows": [[...], ...]}` document consumed by the map
//! front end.

mod column_map;
mod error;
mod project;

pub use column_map::{ColumnMap, ColumnMapping, default_column_map};
pub use error::{OutputError, Result};
pub use project::{MISSING_SENTINEL, OutputTable, project, write_output_json};
