//! Ordered source-to-output column mapping.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use libmap_model::columns::{census, derived, library};

use crate::error::{OutputError, Result};

/// One output column and the frame column it is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub source: String,
    pub output: String,
}

/// Output columns in document order.
///
/// Deserializes from a list of `{ source, output }` tables, so a config file
/// can replace the default map.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMap {
    mappings: Vec<ColumnMapping>,
}

impl ColumnMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: &str, output: &str) -> Self {
        self.mappings.push(ColumnMapping {
            source: source.to_string(),
            output: output.to_string(),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnMapping> {
        self.mappings.iter()
    }

    pub fn output_names(&self) -> Vec<String> {
        self.mappings.iter().map(|m| m.output.clone()).collect()
    }

    /// Fails if two mappings produce the same output name.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for mapping in &self.mappings {
            if !seen.insert(mapping.output.as_str()) {
                return Err(OutputError::DuplicateOutputColumn(mapping.output.clone()));
            }
        }
        Ok(())
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for ColumnMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |map, (source, output)| map.with(source, output))
    }
}

/// Published column set: survey fields, demographics, usage metrics and
/// election lean.
pub fn default_column_map() -> ColumnMap {
    [
        (library::ID, "id"),
        (library::NAME, "name"),
        (library::ADDRESS, "address"),
        (library::CITY, "city"),
        (library::STATE, "state"),
        (library::RELATIONSHIP, "relationship"),
        (library::GEOCODE, "geographic"),
        (library::POPULATION, "pop_lsa"),
        (library::BRANCHES, "branches"),
        (library::LIBRARIANS, "librarians"),
        (library::STAFF, "staff"),
        (library::OP_REVENUE, "op_revenue"),
        (library::CAP_REVENUE, "cap_revenue"),
        (library::PHYSICAL_ITEMS, "tot_phys_items"),
        (library::E_ITEMS, "tot_e_items"),
        (library::VISITS, "visits"),
        (library::PROGRAMS, "programs"),
        (library::ONSITE_PROGRAMS, "onsite_programs"),
        (library::VIRTUAL_PROGRAMS, "virtual_programs"),
        (library::ATTENDANCE, "program_attendance"),
        (library::ONSITE_ATTENDANCE, "onsite_program_attendance"),
        (library::VIRTUAL_ATTENDANCE, "virtual_program_attendance"),
        (library::COMPUTER_SESSIONS, "computer_sessions"),
        (library::WIFI_SESSIONS, "wireless_sessions"),
        (library::REGION, "region"),
        (library::LONGITUDE, "lon"),
        (library::LATITUDE, "lat"),
        (library::LOCALE, "locale_type"),
        (library::DISTRICT, "district"),
        (derived::MEDIAN_INCOME, "income"),
        (derived::PERC_WHITE, "perc_white"),
        (derived::PERC_BLACK, "perc_black"),
        (derived::PERC_INDIGENOUS, "perc_indigenous"),
        (derived::PERC_ASIAN_PACIFIC, "perc_asian_pacific"),
        (derived::PERC_POC, "perc_poc"),
        (derived::PERC_HISPANIC, "perc_hispanic"),
        (derived::PERC_POC_OR_HISPANIC, "perc_poc_or_hispanic"),
        (census::AGE_UNDER_18, "perc_under_18"),
        (census::AGE_65_PLUS, "perc_65_and_over"),
        (census::MEDIAN_AGE, "median_age"),
        (derived::AREA_DESCRIPTION, "census_area"),
        (derived::DEMO_GEO_LEVEL, "demographic_geography"),
        (derived::GEO_URL, "geo_url"),
        (derived::VISITS_PER, "visits_per_capita"),
        (derived::PRO_PER, "programs_per_capita"),
        (derived::ATTEN_PER, "attendance_per_program"),
        (derived::COMP_PER, "computer_per_capita"),
        (derived::WIFI_PER, "wifi_per_capita"),
        (derived::INCM_PER, "op_revenue_per_capita"),
        (derived::VISITS_PER_N, "visits_per_capita_norm"),
        (derived::PRO_PER_N, "programs_per_capita_norm"),
        (derived::ATTEN_PER_N, "attendance_per_program_norm"),
        (derived::COMP_PER_N, "computer_per_capita_norm"),
        (derived::WIFI_PER_N, "wifi_per_capita_norm"),
        (derived::TOTAL_VOTES, "total_votes"),
        (derived::DEM_VOTES, "dem_votes"),
        (derived::REP_VOTES, "rep_votes"),
        (derived::VOTE_POINTS, "vote_points"),
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_map_is_valid() {
        let map = default_column_map();
        map.validate().unwrap();
        assert_eq!(map.iter().next().unwrap().output, "id");
        assert_eq!(map.output_names().last().unwrap(), "vote_points");
    }

    #[test]
    fn duplicate_outputs_are_rejected() {
        let map = ColumnMap::new().with("A", "x").with("B", "x");
        assert!(matches!(
            map.validate(),
            Err(OutputError::DuplicateOutputColumn(name)) if name == "x"
        ));
    }

    #[test]
    fn deserializes_from_list() {
        let map: ColumnMap =
            serde_json::from_str(r#"[{"source": "LIBID", "output": "id"}]"#).unwrap();
        assert_eq!(map, ColumnMap::new().with("LIBID", "id"));
    }
}
