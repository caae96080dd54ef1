//! Geography levels and canonical geographic identifiers.
//!
//! Census extracts identify an area with a `GEO_ID` such as
//! `1400000US06001400100`: a summary-level prefix followed by the
//! zero-padded FIPS code of the area. The same scheme is used as the join key
//! for every table in the pipeline, so two rows refer to the same place iff
//! their [`GeoId`] strings are equal.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Granularity at which demographic data is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoLevel {
    /// Census tract (11-digit state+county+tract code).
    Tract,
    /// County (5-digit state+county FIPS).
    County,
    /// ZIP code tabulation area (5-digit ZCTA).
    Zip,
}

impl GeoLevel {
    pub const ALL: [GeoLevel; 3] = [GeoLevel::Tract, GeoLevel::County, GeoLevel::Zip];

    /// Summary-level tag that precedes the numeric code.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Tract => "1400000US",
            Self::County => "0500000US",
            Self::Zip => "860Z200US",
        }
    }

    /// Width the numeric code is zero-padded to.
    pub fn code_width(self) -> usize {
        match self {
            Self::Tract => 11,
            Self::County | Self::Zip => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tract => "tract",
            Self::County => "county",
            Self::Zip => "zip",
        }
    }

    /// Recovers the level from a canonical identifier's prefix.
    pub fn from_geo_id(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| value.starts_with(level.prefix()))
    }
}

impl fmt::Display for GeoLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical geographic identifier (`<prefix><padded code>`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GeoId {
    level: GeoLevel,
    value: String,
}

impl GeoId {
    /// Joins a level prefix and an already padded code.
    pub fn new(level: GeoLevel, padded_code: &str) -> Self {
        Self {
            level,
            value: format!("{}{}", level.prefix(), padded_code),
        }
    }

    /// Accepts a `GEO_ID` cell as published in a Census extract.
    ///
    /// # Examples
    ///
    /// ```
    /// use libmap_model::{GeoId, GeoLevel};
    ///
    /// let id = GeoId::parse("0500000US06001").unwrap();
    /// assert_eq!(id.level(), GeoLevel::County);
    /// assert_eq!(id.code(), "06001");
    /// assert!(GeoId::parse("06001").is_err());
    /// ```
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let level = GeoLevel::from_geo_id(trimmed).ok_or_else(|| ModelError::InvalidGeoId {
            value: value.to_string(),
        })?;
        if trimmed.len() == level.prefix().len() {
            return Err(ModelError::InvalidGeoId {
                value: value.to_string(),
            });
        }
        Ok(Self {
            level,
            value: trimmed.to_string(),
        })
    }

    pub fn level(&self) -> GeoLevel {
        self.level
    }

    /// The code portion after the summary-level prefix.
    pub fn code(&self) -> &str {
        &self.value[self.level.prefix().len()..]
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Display for GeoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for GeoId {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_from_prefix() {
        assert_eq!(
            GeoLevel::from_geo_id("1400000US06001400100"),
            Some(GeoLevel::Tract)
        );
        assert_eq!(GeoLevel::from_geo_id("860Z200US94501"), Some(GeoLevel::Zip));
        assert_eq!(GeoLevel::from_geo_id("0400000US06"), None);
    }

    #[test]
    fn new_and_parse_agree() {
        let built = GeoId::new(GeoLevel::Zip, "02134");
        let parsed = GeoId::parse(" 860Z200US02134 ").unwrap();
        assert_eq!(built, parsed);
        assert_eq!(parsed.to_string(), "860Z200US02134");
    }

    #[test]
    fn parse_rejects_bare_prefix() {
        assert!(GeoId::parse("0500000US").is_err());
    }

    #[test]
    fn level_serializes_lowercase() {
        let json = serde_json::to_string(&GeoLevel::County).unwrap();
        assert_eq!(json, "\"county\"");
        let level: GeoLevel = serde_json::from_str("\"tract\"").unwrap();
        assert_eq!(level, GeoLevel::Tract);
    }
}
