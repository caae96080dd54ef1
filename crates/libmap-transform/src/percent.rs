//! Race and ethnicity shares of population.
//!
//! Shares are on a 0-100 scale with two decimals. A row missing any race
//! count gets no race shares; a row missing either ethnicity count gets no
//! Hispanic share.

use polars::prelude::*;

use libmap_common::{f64_column, i64_column, i64_values};
use libmap_model::columns::{census, derived};

use crate::error::{Result, require};
use crate::metrics::round_to;

const PERCENT_PRECISION: u32 = 2;

/// `100 * part / total` rounded to two decimals, `0` unless `total > 0`.
pub fn percent_of(part: i64, total: i64) -> f64 {
    if total > 0 {
        round_to(100.0 * part as f64 / total as f64, PERCENT_PRECISION)
    } else {
        0.0
    }
}

/// The larger of two shares; a missing share never wins over a present one.
///
/// Hispanic origin cuts across race categories, so adding the two shares
/// would count people twice.
pub fn max_present(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

/// Race and ethnicity shares for one demographic row.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PopulationShares {
    pub races_total: Option<i64>,
    pub white: Option<f64>,
    pub black: Option<f64>,
    pub indigenous: Option<f64>,
    pub asian_pacific: Option<f64>,
    pub poc: Option<f64>,
    pub hispanic: Option<f64>,
    pub poc_or_hispanic: Option<f64>,
}

impl PopulationShares {
    /// `races` is in the order white, black, indigenous, asian, pacific,
    /// other.
    pub fn compute(
        races: [Option<i64>; 6],
        hispanic: Option<i64>,
        not_hispanic: Option<i64>,
    ) -> Self {
        let counts: Option<Vec<i64>> = races.iter().copied().collect();
        let (races_total, white, black, indigenous, asian_pacific, poc) = match counts {
            Some(counts) => {
                let total: i64 = counts.iter().sum();
                (
                    Some(total),
                    Some(percent_of(counts[0], total)),
                    Some(percent_of(counts[1], total)),
                    Some(percent_of(counts[2], total)),
                    Some(percent_of(counts[3] + counts[4], total)),
                    Some(percent_of(total - counts[0], total)),
                )
            }
            None => (None, None, None, None, None, None),
        };

        let hispanic = match (hispanic, not_hispanic) {
            (Some(h), Some(n)) => Some(percent_of(h, h + n)),
            _ => None,
        };

        Self {
            races_total,
            white,
            black,
            indigenous,
            asian_pacific,
            poc,
            hispanic,
            poc_or_hispanic: max_present(poc, hispanic),
        }
    }
}

/// Adds `RACES_TOTAL` and the `PERC_*` share columns to a demographic table
/// carrying the race and ethnicity counts.
pub fn calculate_percent_pos(df: &DataFrame) -> Result<DataFrame> {
    require(df, "population shares", &census::RACE_FIELDS)?;
    require(df, "population shares", &census::ETHNICITY_FIELDS)?;

    let mut race_columns = Vec::with_capacity(census::RACE_FIELDS.len());
    for field in census::RACE_FIELDS {
        race_columns.push(i64_values(df, field)?);
    }
    let hispanic = i64_values(df, census::HISPANIC)?;
    let not_hispanic = i64_values(df, census::NOT_HISPANIC)?;

    let shares: Vec<PopulationShares> = (0..df.height())
        .map(|row| {
            let races = std::array::from_fn(|i| race_columns[i][row]);
            PopulationShares::compute(races, hispanic[row], not_hispanic[row])
        })
        .collect();

    let share_column = |name: &str, pick: fn(&PopulationShares) -> Option<f64>| {
        f64_column(name, shares.iter().map(pick).collect())
    };

    let mut out = df.clone();
    out.with_column(i64_column(
        derived::RACES_TOTAL,
        shares.iter().map(|s| s.races_total).collect(),
    ))?;
    out.with_column(share_column(derived::PERC_WHITE, |s| s.white))?;
    out.with_column(share_column(derived::PERC_BLACK, |s| s.black))?;
    out.with_column(share_column(derived::PERC_INDIGENOUS, |s| s.indigenous))?;
    out.with_column(share_column(derived::PERC_ASIAN_PACIFIC, |s| s.asian_pacific))?;
    out.with_column(share_column(derived::PERC_POC, |s| s.poc))?;
    out.with_column(share_column(derived::PERC_HISPANIC, |s| s.hispanic))?;
    out.with_column(share_column(derived::PERC_POC_OR_HISPANIC, |s| s.poc_or_hispanic))?;

    let without_race = shares.iter().filter(|s| s.races_total.is_none()).count();
    tracing::debug!(
        rows = shares.len(),
        without_race,
        "computed population shares"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use libmap_common::f64_values;

    #[test]
    fn shares_for_a_mixed_area() {
        let shares = PopulationShares::compute(
            [Some(60), Some(20), Some(5), Some(8), Some(2), Some(5)],
            Some(30),
            Some(70),
        );
        assert_eq!(shares.races_total, Some(100));
        assert_eq!(shares.white, Some(60.0));
        assert_eq!(shares.asian_pacific, Some(10.0));
        assert_eq!(shares.poc, Some(40.0));
        assert_eq!(shares.hispanic, Some(30.0));
        assert_eq!(shares.poc_or_hispanic, Some(40.0));
    }

    #[test]
    fn zero_population_gives_zero_shares() {
        let shares = PopulationShares::compute([Some(0); 6], Some(0), Some(0));
        assert_eq!(shares.poc, Some(0.0));
        assert_eq!(shares.hispanic, Some(0.0));
    }

    #[test]
    fn two_decimal_rounding() {
        assert_eq!(percent_of(1, 3), 33.33);
        assert_eq!(percent_of(2, 3), 66.67);
    }

    #[test]
    fn missing_counts_stay_missing() {
        let shares = PopulationShares::compute(
            [Some(1), None, Some(0), Some(0), Some(0), Some(0)],
            Some(5),
            Some(5),
        );
        assert_eq!(shares.races_total, None);
        assert_eq!(shares.poc, None);
        assert_eq!(shares.poc_or_hispanic, Some(50.0));
    }

    #[test]
    fn adds_share_columns() {
        let mut columns = vec![
            Series::new(census::GEO_ID.into(), vec!["A", "B"]).into_column(),
        ];
        for (idx, field) in census::RACE_FIELDS.iter().enumerate() {
            let first = if idx == 0 { 1i64 } else { 0 };
            columns.push(Series::new((*field).into(), vec![Some(first), None]).into_column());
        }
        columns.push(
            Series::new(census::NOT_HISPANIC.into(), vec![Some(3i64), None]).into_column(),
        );
        columns.push(Series::new(census::HISPANIC.into(), vec![Some(1i64), None]).into_column());
        let df = DataFrame::new(columns).unwrap();

        let out = calculate_percent_pos(&df).unwrap();

        assert_eq!(
            i64_values(&out, derived::RACES_TOTAL).unwrap(),
            vec![Some(1), None]
        );
        assert_eq!(
            f64_values(&out, derived::PERC_POC_OR_HISPANIC).unwrap(),
            vec![Some(25.0), None]
        );
    }
}
