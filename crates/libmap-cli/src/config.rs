//! Run configuration: optional TOML file plus command-line overrides.
//!
//! ```toml
//! year = 2020
//! fine_geography = "county"
//!
//! [inputs]
//! library = "data/pls_fy2022.csv"
//! income = ["data/income_county.csv", "data/income_zip.csv"]
//! race = ["data/race_county.csv", "data/race_zip.csv"]
//! ethnicity = ["data/ethnicity_county.csv", "data/ethnicity_zip.csv"]
//! election = "data/countypres_2000-2020.csv"
//!
//! [output]
//! path = "public/data/libraries.json"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use libmap_model::GeoLevel;
use libmap_output::{ColumnMap, default_column_map};

/// Contents of a config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub year: Option<i64>,
    pub fine_geography: Option<GeoLevel>,
    #[serde(default)]
    pub inputs: InputsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputsConfig {
    pub library: Option<PathBuf>,
    #[serde(default)]
    pub income: Vec<PathBuf>,
    #[serde(default)]
    pub race: Vec<PathBuf>,
    #[serde(default)]
    pub ethnicity: Vec<PathBuf>,
    #[serde(default)]
    pub age: Vec<PathBuf>,
    pub election: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub path: Option<PathBuf>,
    /// Replaces the default column map.
    pub columns: Option<ColumnMap>,
}

/// Values given on the command line. Set fields win over the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub library: Option<PathBuf>,
    pub income: Vec<PathBuf>,
    pub race: Vec<PathBuf>,
    pub ethnicity: Vec<PathBuf>,
    pub age: Vec<PathBuf>,
    pub election: Option<PathBuf>,
    pub year: Option<i64>,
    pub output: Option<PathBuf>,
    pub fine_geography: Option<GeoLevel>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub library: PathBuf,
    pub income: Vec<PathBuf>,
    pub race: Vec<PathBuf>,
    pub ethnicity: Vec<PathBuf>,
    pub age: Vec<PathBuf>,
    pub election: Option<ElectionInput>,
    pub output: PathBuf,
    pub fine_geography: GeoLevel,
    pub columns: ColumnMap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectionInput {
    pub path: PathBuf,
    pub year: i64,
}

pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parse config {}", path.display()))
}

fn pick_list(flag: Vec<PathBuf>, file: Vec<PathBuf>) -> Vec<PathBuf> {
    if flag.is_empty() { file } else { flag }
}

impl RunConfig {
    /// Merges file values and overrides and checks that the run is complete.
    pub fn resolve(file: FileConfig, overrides: ConfigOverrides) -> Result<Self> {
        let library = overrides
            .library
            .or(file.inputs.library)
            .context("no library survey file given (--library or inputs.library)")?;
        let output = overrides
            .output
            .or(file.output.path)
            .context("no output path given (--output or output.path)")?;

        let income = pick_list(overrides.income, file.inputs.income);
        let race = pick_list(overrides.race, file.inputs.race);
        let ethnicity = pick_list(overrides.ethnicity, file.inputs.ethnicity);
        let age = pick_list(overrides.age, file.inputs.age);
        for (name, paths) in [("income", &income), ("race", &race), ("ethnicity", &ethnicity)] {
            if paths.is_empty() {
                bail!("no {name} extract given (--{name} or inputs.{name})");
            }
        }

        let year = overrides.year.or(file.year);
        let election = match (overrides.election.or(file.inputs.election), year) {
            (Some(path), Some(year)) => Some(ElectionInput { path, year }),
            (Some(_), None) => bail!("an election file needs a target year (--year or year)"),
            (None, _) => None,
        };

        let fine_geography = overrides
            .fine_geography
            .or(file.fine_geography)
            .unwrap_or(GeoLevel::County);
        if fine_geography == GeoLevel::Zip {
            bail!("fine geography must be county or tract");
        }

        Ok(Self {
            library,
            income,
            race,
            ethnicity,
            age,
            election,
            output,
            fine_geography,
            columns: file.output.columns.unwrap_or_else(default_column_map),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_file() -> FileConfig {
        toml::from_str(
            r#"
            year = 2016
            fine_geography = "tract"

            [inputs]
            library = "pls.csv"
            income = ["income.csv"]
            race = ["race.csv"]
            ethnicity = ["eth.csv"]
            election = "countypres.csv"

            [output]
            path = "out.json"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn file_alone_is_enough() {
        let config = RunConfig::resolve(complete_file(), ConfigOverrides::default()).unwrap();
        assert_eq!(config.fine_geography, GeoLevel::Tract);
        assert_eq!(
            config.election,
            Some(ElectionInput {
                path: PathBuf::from("countypres.csv"),
                year: 2016
            })
        );
        assert_eq!(config.columns, default_column_map());
    }

    #[test]
    fn flags_override_file() {
        let overrides = ConfigOverrides {
            race: vec![PathBuf::from("race_a.csv"), PathBuf::from("race_b.csv")],
            year: Some(2020),
            output: Some(PathBuf::from("elsewhere.json")),
            ..ConfigOverrides::default()
        };
        let config = RunConfig::resolve(complete_file(), overrides).unwrap();
        assert_eq!(config.race.len(), 2);
        assert_eq!(config.income, vec![PathBuf::from("income.csv")]);
        assert_eq!(config.output, PathBuf::from("elsewhere.json"));
        assert_eq!(config.election.unwrap().year, 2020);
    }

    #[test]
    fn election_without_year_is_rejected() {
        let mut file = complete_file();
        file.year = None;
        let err = RunConfig::resolve(file, ConfigOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("target year"));
    }

    #[test]
    fn zip_is_not_a_fine_geography() {
        let overrides = ConfigOverrides {
            fine_geography: Some(GeoLevel::Zip),
            ..ConfigOverrides::default()
        };
        assert!(RunConfig::resolve(complete_file(), overrides).is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed: std::result::Result<FileConfig, _> = toml::from_str("yaer = 2020");
        assert!(parsed.is_err());
    }

    #[test]
    fn column_map_from_file() {
        let file: FileConfig = toml::from_str(
            r#"
            [[output.columns]]
            source = "LIBID"
            output = "id"
            "#,
        )
        .unwrap();
        assert_eq!(
            file.output.columns,
            Some(ColumnMap::new().with("LIBID", "id"))
        );
    }
}
