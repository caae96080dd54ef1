//! End-to-end run: load, normalize, join, compute, project, write.

use std::path::PathBuf;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::info_span;

use libmap_common::{has_column, i64_values, string_values};
use libmap_ingest::{CensusTable, load_census_table, load_election, load_library_survey};
use libmap_model::GeoLevel;
use libmap_model::columns::{census, derived, library};
use libmap_normalization::{LibraryGeoColumns, attach_geo_ids};
use libmap_output::{OutputTable, project, write_output_json};
use libmap_transform::{
    DemographicIndex, add_geo_url, calculate_percent_pos, describe_census_area,
    get_election_data, join_demographics, join_election, library_metrics, merge_on_geo_id,
    standard_metrics,
};

use crate::config::RunConfig;

/// Demographic columns copied onto each library row when present.
pub const DEMOGRAPHIC_FIELDS: &[&str] = &[
    derived::MEDIAN_INCOME,
    derived::RACES_TOTAL,
    derived::PERC_WHITE,
    derived::PERC_BLACK,
    derived::PERC_INDIGENOUS,
    derived::PERC_ASIAN_PACIFIC,
    derived::PERC_POC,
    derived::PERC_HISPANIC,
    derived::PERC_POC_OR_HISPANIC,
    census::AGE_UNDER_18,
    census::AGE_65_PLUS,
    census::MEDIAN_AGE,
    derived::AREA_DESCRIPTION,
];

/// Row count of one loaded source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSummary {
    pub name: &'static str,
    pub files: usize,
    pub rows: usize,
}

/// How many libraries took their demographics from each geography level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkageSummary {
    pub fine: usize,
    pub zip: usize,
    pub unmatched: usize,
}

/// What a run did, for the summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub sources: Vec<SourceSummary>,
    pub libraries: usize,
    pub fine_geography: GeoLevel,
    pub linkage: LinkageSummary,
    pub election_counties: Option<usize>,
    pub election_matched: Option<usize>,
    pub columns: usize,
    /// `None` on a dry run.
    pub output: Option<PathBuf>,
}

/// Result of [`run_pipeline`]: the projected document and its summary.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub table: OutputTable,
    pub summary: RunSummary,
}

struct LoadedSources {
    library: DataFrame,
    census: Vec<DataFrame>,
    election: Option<DataFrame>,
    summaries: Vec<SourceSummary>,
}

fn load_sources(config: &RunConfig) -> Result<LoadedSources> {
    let _guard = info_span!("load").entered();
    let mut summaries = Vec::new();

    let library = load_library_survey(&config.library)
        .with_context(|| format!("load library survey {}", config.library.display()))?;
    summaries.push(SourceSummary {
        name: "library",
        files: 1,
        rows: library.height(),
    });

    let mut tables = vec![
        (CensusTable::Income, &config.income),
        (CensusTable::Race, &config.race),
        (CensusTable::Ethnicity, &config.ethnicity),
    ];
    if !config.age.is_empty() {
        tables.push((CensusTable::Age, &config.age));
    }

    let mut census = Vec::with_capacity(tables.len());
    for (table, paths) in tables {
        let df = load_census_table(table, paths)
            .with_context(|| format!("load {} extract", table.name()))?;
        summaries.push(SourceSummary {
            name: table.name(),
            files: paths.len(),
            rows: df.height(),
        });
        census.push(df);
    }

    let election = match &config.election {
        Some(input) => {
            let df = load_election(&input.path, input.year)
                .with_context(|| format!("load election returns {}", input.path.display()))?;
            summaries.push(SourceSummary {
                name: "election",
                files: 1,
                rows: df.height(),
            });
            Some(df)
        }
        None => None,
    };

    Ok(LoadedSources {
        library,
        census,
        election,
        summaries,
    })
}

fn count_linkage(df: &DataFrame, fine: GeoLevel) -> Result<LinkageSummary> {
    let mut summary = LinkageSummary::default();
    for level in string_values(df, derived::DEMO_GEO_LEVEL)?.into_iter().flatten() {
        if level == fine.as_str() {
            summary.fine += 1;
        } else if level == GeoLevel::Zip.as_str() {
            summary.zip += 1;
        } else {
            summary.unmatched += 1;
        }
    }
    Ok(summary)
}

/// Runs every stage and writes the output unless `dry_run`.
pub fn run_pipeline(config: &RunConfig, dry_run: bool) -> Result<RunOutput> {
    let _run = info_span!("run", fine_geography = %config.fine_geography).entered();
    let sources = load_sources(config)?;

    let library_df = info_span!("normalize").in_scope(|| -> Result<DataFrame> {
        attach_geo_ids(&sources.library, &LibraryGeoColumns::default())
            .context("attach geographic identifiers")
    })?;

    let demographics = info_span!("demographics").in_scope(|| -> Result<DataFrame> {
        let merged = merge_on_geo_id(&sources.census).context("merge census tables")?;
        let merged = calculate_percent_pos(&merged).context("population shares")?;
        describe_census_area(&merged).context("area descriptions")
    })?;

    let (linked, linkage) = info_span!("join").in_scope(|| -> Result<(DataFrame, LinkageSummary)> {
        let fine = DemographicIndex::build(&demographics, config.fine_geography)?;
        let zip = DemographicIndex::build(&demographics, GeoLevel::Zip)?;
        if fine.is_empty() {
            tracing::warn!(
                level = %config.fine_geography,
                "no demographic rows at the fine geography; city libraries fall back to ZIP"
            );
        }
        let fields: Vec<&str> = DEMOGRAPHIC_FIELDS
            .iter()
            .copied()
            .filter(|field| has_column(&demographics, field))
            .collect();
        let linked = join_demographics(&library_df, &fine, &zip, &fields)
            .context("join demographics")?;
        let linkage = count_linkage(&linked, config.fine_geography)?;
        Ok((linked, linkage))
    })?;

    let linked = info_span!("metrics").in_scope(|| -> Result<DataFrame> {
        let df = library_metrics(&linked, &standard_metrics()).context("library metrics")?;
        if has_column(&df, library::LATITUDE) && has_column(&df, library::LONGITUDE) {
            Ok(add_geo_url(&df)?)
        } else {
            tracing::warn!("survey has no coordinates; map links omitted");
            Ok(df)
        }
    })?;

    let (linked, election_counties, election_matched) = match (&sources.election, &config.election) {
        (Some(returns), Some(input)) => info_span!("election", year = input.year).in_scope(
            || -> Result<(DataFrame, Option<usize>, Option<usize>)> {
                let counties = get_election_data(returns, input.year)
                    .context("aggregate election returns")?;
                let joined = join_election(&linked, &counties).context("join election")?;
                let matched = i64_values(&joined, derived::TOTAL_VOTES)?
                    .into_iter()
                    .flatten()
                    .count();
                Ok((joined, Some(counties.height()), Some(matched)))
            },
        )?,
        _ => (linked, None, None),
    };

    let table = info_span!("output").in_scope(|| -> Result<OutputTable> {
        let table = project(&linked, &config.columns).context("project output columns")?;
        if dry_run {
            tracing::info!(rows = table.rows.len(), "dry run; output not written");
        } else {
            write_output_json(&config.output, &table)
                .with_context(|| format!("write {}", config.output.display()))?;
        }
        Ok(table)
    })?;

    let summary = RunSummary {
        sources: sources.summaries,
        libraries: linked.height(),
        fine_geography: config.fine_geography,
        linkage,
        election_counties,
        election_matched,
        columns: table.cols.len(),
        output: (!dry_run).then(|| config.output.clone()),
    };
    Ok(RunOutput { table, summary })
}
