//! Data model shared by every libmap stage.
//!
//! # Module Organization
//!
//! - [`geo`]: geography levels and canonical geographic identifiers
//! - [`locale`]: survey locale codes and the city band used for fallback
//! - [`columns`]: source-publisher field codes and derived column names
//! - [`error`]: model error type

pub mod columns;
pub mod error;
pub mod geo;
pub mod locale;

pub use error::{ModelError, Result};
pub use geo::{GeoId, GeoLevel};
pub use locale::LocaleType;
