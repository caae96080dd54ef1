//! Lenient numeric parsing for publisher-formatted fields.
//!
//! Census and survey extracts decorate numbers: thousands separators
//! (`"1,234"`), top-coded values (`"250,000+"`), stray decimals on integer
//! codes (`"6001.0"`), and placeholders such as `"-"` or `"N"`.

/// Parses an integer, returning `default` for anything unparseable.
///
/// Commas are removed, trailing `+` markers are stripped, and the value is
/// truncated (not rounded) at the first decimal point. The default is
/// explicit because call sites disagree on it: counts use `0`, identifiers
/// and survey fields use `-1`.
///
/// # Examples
///
/// ```
/// use libmap_normalization::parse_int;
///
/// assert_eq!(parse_int("1,234", -1), 1234);
/// assert_eq!(parse_int("45+", -1), 45);
/// assert_eq!(parse_int("12.7", -1), 12);
/// assert_eq!(parse_int("abc", -1), -1);
/// assert_eq!(parse_int("", 0), 0);
/// ```
pub fn parse_int(value: &str, default: i64) -> i64 {
    let cleaned: String = value.trim().chars().filter(|ch| *ch != ',').collect();
    let cleaned = cleaned.trim_end_matches('+');
    let integral = match cleaned.split_once('.') {
        Some((head, _)) => head,
        None => cleaned,
    };
    if integral.is_empty() {
        return default;
    }
    integral.parse::<i64>().unwrap_or(default)
}

/// Parses a float after removing thousands separators; `None` when unparseable.
pub fn parse_float(value: &str) -> Option<f64> {
    let cleaned: String = value.trim().chars().filter(|ch| *ch != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
