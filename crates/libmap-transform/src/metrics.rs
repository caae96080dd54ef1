//! Per-capita ratios and competition ranks.

use std::collections::HashMap;

use polars::prelude::*;

use libmap_common::{f64_column, f64_values, i64_column};
use libmap_model::columns::{derived, library};

use crate::error::{Result, require};

/// Rounds half away from zero to `precision` decimal places.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// A guarded ratio of two columns written to a new column.
///
/// `round(multiplier * (numerator / denominator)^curve, precision)` when both
/// inputs are positive, otherwise `0`. A missing input counts as not
/// positive.
#[derive(Debug, Clone, PartialEq)]
pub struct PerCapita {
    pub numerator: String,
    pub denominator: String,
    pub output: String,
    pub curve: f64,
    pub multiplier: f64,
    pub precision: u32,
}

impl PerCapita {
    pub fn new(numerator: &str, denominator: &str, output: &str) -> Self {
        Self {
            numerator: numerator.to_string(),
            denominator: denominator.to_string(),
            output: output.to_string(),
            curve: 1.0,
            multiplier: 1.0,
            precision: 3,
        }
    }

    pub fn with_curve(mut self, curve: f64) -> Self {
        self.curve = curve;
        self
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn value(&self, numerator: Option<f64>, denominator: Option<f64>) -> f64 {
        match (numerator, denominator) {
            (Some(num), Some(den)) if num > 0.0 && den > 0.0 => round_to(
                self.multiplier * (num / den).powf(self.curve),
                self.precision,
            ),
            _ => 0.0,
        }
    }
}

/// Adds the ratio described by `per` as a `Float64` column.
pub fn calculate_per(df: &DataFrame, per: &PerCapita) -> Result<DataFrame> {
    let inputs = [per.numerator.as_str(), per.denominator.as_str()];
    require(df, "per capita", &inputs)?;
    let numerators = f64_values(df, &per.numerator)?;
    let denominators = f64_values(df, &per.denominator)?;

    let values: Vec<Option<f64>> = numerators
        .into_iter()
        .zip(denominators)
        .map(|(num, den)| Some(per.value(num, den)))
        .collect();

    let mut out = df.clone();
    out.with_column(f64_column(&per.output, values))?;
    Ok(out)
}

const RANK_PRECISION: f64 = 10_000.0;

/// Competition ranks (`1 + index of the first equal value in sorted order`).
///
/// Missing values rank as `-1`. Values are compared after scaling by 10000
/// and rounding, so values equal to four decimals tie.
///
/// ```
/// use libmap_transform::competition_ranks;
///
/// let values = [Some(0.5), Some(0.2), Some(0.5), None];
/// assert_eq!(competition_ranks(&values, false), vec![3, 2, 3, 1]);
/// assert_eq!(competition_ranks(&values, true), vec![1, 3, 1, 4]);
/// ```
pub fn competition_ranks(values: &[Option<f64>], descending: bool) -> Vec<i64> {
    let scaled: Vec<i64> = values
        .iter()
        .map(|value| (value.unwrap_or(-1.0) * RANK_PRECISION).round() as i64)
        .collect();

    let mut sorted = scaled.clone();
    sorted.sort_unstable();
    if descending {
        sorted.reverse();
    }

    let mut first_rank: HashMap<i64, i64> = HashMap::with_capacity(sorted.len());
    for (idx, value) in sorted.iter().enumerate() {
        first_rank.entry(*value).or_insert(idx as i64 + 1);
    }

    scaled.iter().map(|value| first_rank[value]).collect()
}

/// Adds an `Int64` rank column for `value`; ascending unless `descending`.
pub fn calculate_rank(
    df: &DataFrame,
    value: &str,
    output: &str,
    descending: bool,
) -> Result<DataFrame> {
    require(df, "rank", &[value])?;
    let ranks = competition_ranks(&f64_values(df, value)?, descending);

    let mut out = df.clone();
    out.with_column(i64_column(output, ranks.into_iter().map(Some).collect()))?;
    Ok(out)
}

/// A per-capita metric and the column its rank is written to, if ranked.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryMetric {
    pub per: PerCapita,
    pub rank: Option<&'static str>,
}

/// Usage metrics published for every library system.
pub fn standard_metrics() -> Vec<LibraryMetric> {
    let ranked = |num: &str, den: &str, out: &str, rank: &'static str| LibraryMetric {
        per: PerCapita::new(num, den, out),
        rank: Some(rank),
    };
    vec![
        ranked(
            library::VISITS,
            library::POPULATION,
            derived::VISITS_PER,
            derived::VISITS_PER_N,
        ),
        ranked(
            library::PROGRAMS,
            library::POPULATION,
            derived::PRO_PER,
            derived::PRO_PER_N,
        ),
        ranked(
            library::ATTENDANCE,
            library::PROGRAMS,
            derived::ATTEN_PER,
            derived::ATTEN_PER_N,
        ),
        ranked(
            library::COMPUTER_SESSIONS,
            library::POPULATION,
            derived::COMP_PER,
            derived::COMP_PER_N,
        ),
        ranked(
            library::WIFI_SESSIONS,
            library::POPULATION,
            derived::WIFI_PER,
            derived::WIFI_PER_N,
        ),
        LibraryMetric {
            per: PerCapita::new(library::OP_REVENUE, library::POPULATION, derived::INCM_PER),
            rank: None,
        },
    ]
}

/// Applies `metrics` in order. A metric whose inputs are absent is skipped
/// with a warning so partial survey extracts still produce output.
pub fn library_metrics(df: &DataFrame, metrics: &[LibraryMetric]) -> Result<DataFrame> {
    let mut out = df.clone();
    for metric in metrics {
        let per = &metric.per;
        let inputs = [per.numerator.as_str(), per.denominator.as_str()];
        if require(&out, "per capita", &inputs).is_err() {
            tracing::warn!(
                metric = %per.output,
                numerator = %per.numerator,
                denominator = %per.denominator,
                "metric inputs missing; skipped"
            );
            continue;
        }
        out = calculate_per(&out, per)?;
        if let Some(rank) = metric.rank {
            out = calculate_rank(&out, &per.output, rank, false)?;
        }
        tracing::debug!(metric = %per.output, "computed metric");
    }
    Ok(out)
}
