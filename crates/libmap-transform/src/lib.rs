//! Joins and derived metrics for libmap.
//!
//! Every stage takes a `&DataFrame` and returns a new frame with added
//! columns; inputs are never modified.
//!
//! # Overview
//!
//! - **merge / index**: outer-merge demographic tables on `GEO_ID`, then index
//!   them per geography level
//! - **join**: attach demographics to libraries, preferring the fine index for
//!   city locales and falling back to ZIP areas
//! - **percent**: race and ethnicity shares of population
//! - **metrics**: guarded per-capita ratios and competition ranks
//! - **election**: county vote totals and lean
//! - **enrich**: map links and readable area names
//!
//! # Missing data
//!
//! A join miss or a missing input leaves the output cell null. Ratios take
//! their zero branch instead. The projector writes null cells as `-1`.

mod election;
mod enrich;
mod error;
mod index;
mod join;
mod merge;
mod metrics;
mod percent;
mod values;

// === Errors ===
pub use error::{Result, TransformError};

// === Demographics ===
pub use index::DemographicIndex;
pub use join::{
    LibrarySite, SiteMatch, join_demographics, library_sites, match_site,
    resolve_demographic_value,
};
pub use merge::merge_on_geo_id;
pub use percent::{PopulationShares, calculate_percent_pos, max_present, percent_of};
pub use values::DemographicValue;

// === Library metrics ===
pub use metrics::{
    LibraryMetric, PerCapita, calculate_per, calculate_rank, competition_ranks, library_metrics,
    round_to, standard_metrics,
};

// === Elections ===
pub use election::{
    CountyVotes, ElectionRow, get_election_data, join_election, tally_county, vote_points,
};

// === Presentation ===
pub use enrich::{add_geo_url, area_description, describe_census_area, geo_url};
