//! County presidential returns aggregated to one lean figure per county.

use std::collections::HashMap;

use polars::prelude::*;

use libmap_common::{f64_column, has_column, i64_column, i64_values, string_column, string_values};
use libmap_model::GeoId;
use libmap_model::columns::{derived, election};
use libmap_normalization::{normalize_county_id, parse_int};

use crate::error::{Result, require};
use crate::metrics::round_to;
use crate::values::ColumnValues;

/// One candidate's votes in one reporting mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectionRow {
    pub party: String,
    pub votes: i64,
    pub mode: Option<String>,
}

impl ElectionRow {
    fn is_total(&self) -> bool {
        self.mode
            .as_deref()
            .is_some_and(|mode| mode.trim().eq_ignore_ascii_case(election::MODE_TOTAL))
    }

    fn is_party(&self, party: &str) -> bool {
        self.party.trim().eq_ignore_ascii_case(party)
    }
}

/// Aggregated votes for one county.
#[derive(Debug, Clone, PartialEq)]
pub struct CountyVotes {
    pub county: GeoId,
    pub total_votes: i64,
    pub dem_votes: i64,
    pub rep_votes: i64,
    pub vote_points: f64,
}

/// `100 * (rep - dem) / total` to two decimals; `0` unless `total > 0`.
///
/// Positive values lean Republican, negative values Democratic.
pub fn vote_points(dem_votes: i64, rep_votes: i64, total_votes: i64) -> f64 {
    if total_votes > 0 {
        round_to(
            100.0 * (rep_votes - dem_votes) as f64 / total_votes as f64,
            2,
        )
    } else {
        0.0
    }
}

/// Totals one county's rows.
///
/// When any row reports the `TOTAL` mode only those rows are counted, since
/// the other modes (early, election day, mail) break the same votes down.
/// The total is the sum of every candidate's votes in the rows counted.
pub fn tally_county(county: GeoId, rows: &[ElectionRow]) -> CountyVotes {
    let has_total = rows.iter().any(ElectionRow::is_total);
    let counted: Vec<&ElectionRow> = rows
        .iter()
        .filter(|row| !has_total || row.is_total())
        .collect();

    let party_votes = |party: &str| -> i64 {
        counted
            .iter()
            .filter(|row| row.is_party(party))
            .map(|row| row.votes)
            .sum()
    };
    let dem_votes = party_votes(election::PARTY_DEMOCRAT);
    let rep_votes = party_votes(election::PARTY_REPUBLICAN);
    let total_votes: i64 = counted.iter().map(|row| row.votes).sum();

    CountyVotes {
        county,
        total_votes,
        dem_votes,
        rep_votes,
        vote_points: vote_points(dem_votes, rep_votes, total_votes),
    }
}

/// Aggregates returns for `year` into one row per county, in first-seen
/// order, with `COUNTY_GEO_ID`, `TOTAL_VOTES`, `DEM_VOTES`, `REP_VOTES` and
/// `VOTE_POINTS` columns.
pub fn get_election_data(df: &DataFrame, year: i64) -> Result<DataFrame> {
    require(df, "election aggregation", election::REQUIRED)?;

    let years = i64_values(df, election::YEAR)?;
    let fips = string_values(df, election::COUNTY_FIPS)?;
    let parties = string_values(df, election::PARTY)?;
    let votes = i64_values(df, election::CANDIDATE_VOTES)?;
    let modes = if has_column(df, election::MODE) {
        string_values(df, election::MODE)?
    } else {
        vec![None; df.height()]
    };

    let mut order: Vec<GeoId> = Vec::new();
    let mut grouped: HashMap<GeoId, Vec<ElectionRow>> = HashMap::new();
    for row in 0..df.height() {
        if years[row] != Some(year) {
            continue;
        }
        let raw_fips = fips[row].as_deref().unwrap_or("");
        if parse_int(raw_fips, -1) <= 0 {
            continue;
        }
        let county = normalize_county_id(raw_fips);
        let entry = grouped.entry(county.clone()).or_insert_with(|| {
            order.push(county);
            Vec::new()
        });
        entry.push(ElectionRow {
            party: parties[row].clone().unwrap_or_default(),
            votes: votes[row].unwrap_or(0),
            mode: modes[row].clone(),
        });
    }

    let counties: Vec<CountyVotes> = order
        .into_iter()
        .map(|county| {
            let rows = grouped.remove(&county).unwrap_or_default();
            tally_county(county, &rows)
        })
        .collect();

    let out = DataFrame::new(vec![
        string_column(
            derived::COUNTY_GEO_ID,
            counties
                .iter()
                .map(|c| Some(c.county.as_str().to_string()))
                .collect(),
        ),
        i64_column(
            derived::TOTAL_VOTES,
            counties.iter().map(|c| Some(c.total_votes)).collect(),
        ),
        i64_column(
            derived::DEM_VOTES,
            counties.iter().map(|c| Some(c.dem_votes)).collect(),
        ),
        i64_column(
            derived::REP_VOTES,
            counties.iter().map(|c| Some(c.rep_votes)).collect(),
        ),
        f64_column(
            derived::VOTE_POINTS,
            counties.iter().map(|c| Some(c.vote_points)).collect(),
        ),
    ])?;

    tracing::info!(year, counties = out.height(), "aggregated election returns");
    Ok(out)
}

/// Left-joins county election figures onto the library table by
/// `COUNTY_GEO_ID`. Libraries in counties without returns get nulls.
pub fn join_election(library_df: &DataFrame, election_df: &DataFrame) -> Result<DataFrame> {
    require(library_df, "election join", &[derived::COUNTY_GEO_ID])?;
    require(election_df, "election join", &[derived::COUNTY_GEO_ID])?;

    let mut position: HashMap<String, usize> = HashMap::new();
    for (row, id) in string_values(election_df, derived::COUNTY_GEO_ID)?
        .into_iter()
        .enumerate()
    {
        if let Some(id) = id {
            position.entry(id).or_insert(row);
        }
    }

    let rows: Vec<Option<usize>> = string_values(library_df, derived::COUNTY_GEO_ID)?
        .into_iter()
        .map(|id| id.and_then(|id| position.get(&id).copied()))
        .collect();

    let mut out = library_df.clone();
    for name in [
        derived::TOTAL_VOTES,
        derived::DEM_VOTES,
        derived::REP_VOTES,
        derived::VOTE_POINTS,
    ] {
        if has_column(election_df, name) {
            let values = ColumnValues::read(election_df, name)?.gather(&rows);
            out.with_column(values.into_column(name))?;
        }
    }

    let matched = rows.iter().flatten().count();
    tracing::info!(
        rows = rows.len(),
        matched,
        unmatched = rows.len() - matched,
        "joined election returns"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use libmap_common::f64_values;
    use libmap_model::GeoLevel;

    fn row(party: &str, votes: i64, mode: &str) -> ElectionRow {
        ElectionRow {
            party: party.to_string(),
            votes,
            mode: Some(mode.to_string()),
        }
    }

    fn alameda() -> GeoId {
        GeoId::new(GeoLevel::County, "06001")
    }

    #[test]
    fn sums_modes_without_total() {
        let rows = vec![
            row("DEMOCRAT", 100, "ELECTION DAY"),
            row("REPUBLICAN", 50, "ELECTION DAY"),
            row("DEMOCRAT", 40, "MAIL"),
            row("REPUBLICAN", 10, "MAIL"),
        ];
        let votes = tally_county(alameda(), &rows);
        assert_eq!(votes.dem_votes, 140);
        assert_eq!(votes.rep_votes, 60);
        assert_eq!(votes.total_votes, 200);
        assert_eq!(votes.vote_points, -40.0);
    }

    #[test]
    fn other_parties_count_toward_total() {
        let rows = vec![
            row("DEMOCRAT", 45, "TOTAL"),
            row("REPUBLICAN", 45, "TOTAL"),
            row("GREEN", 10, "TOTAL"),
        ];
        let votes = tally_county(alameda(), &rows);
        assert_eq!(votes.total_votes, 100);
        assert_eq!(votes.vote_points, 0.0);
    }

    #[test]
    fn empty_county_has_zero_points() {
        assert_eq!(tally_county(alameda(), &[]).vote_points, 0.0);
        assert_eq!(vote_points(0, 0, 0), 0.0);
    }

    #[test]
    fn vote_points_rounding() {
        assert_eq!(vote_points(1, 2, 3), 33.33);
        assert_eq!(vote_points(2, 1, 3), -33.33);
    }

    #[test]
    fn join_leaves_unknown_counties_null() {
        let library = DataFrame::new(vec![
            Series::new(
                derived::COUNTY_GEO_ID.into(),
                vec![Some("0500000US06001"), Some("0500000US99999"), None],
            )
            .into_column(),
        ])
        .unwrap();
        let returns = DataFrame::new(vec![
            Series::new(derived::COUNTY_GEO_ID.into(), vec!["0500000US06001"]).into_column(),
            Series::new(derived::VOTE_POINTS.into(), vec![-60.5f64]).into_column(),
        ])
        .unwrap();

        let out = join_election(&library, &returns).unwrap();
        assert_eq!(
            f64_values(&out, derived::VOTE_POINTS).unwrap(),
            vec![Some(-60.5), None, None]
        );
    }
}
