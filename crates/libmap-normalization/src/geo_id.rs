//! Canonical geographic identifiers from raw location codes.

use libmap_model::{GeoId, GeoLevel};

use crate::numeric::parse_int;

/// Left-pads a code with zeros to `width`, keeping a leading sign in front.
///
/// Codes already at or beyond `width` are returned unchanged.
pub fn zero_pad(code: &str, width: usize) -> String {
    let code = code.trim();
    if code.len() >= width {
        return code.to_string();
    }
    let (sign, digits) = match code.strip_prefix(['-', '+']) {
        Some(rest) => (&code[..1], rest),
        None => ("", code),
    };
    let zeros = "0".repeat(width - code.len());
    format!("{sign}{zeros}{digits}")
}

fn normalize_numeric_code(level: GeoLevel, raw: &str) -> GeoId {
    let code = parse_int(raw, 0);
    GeoId::new(level, &format!("{code:0width$}", width = level.code_width()))
}

/// County key: integer reparse, 5-digit pad, county prefix.
///
/// ```
/// use libmap_normalization::normalize_county_id;
///
/// for raw in ["06001", "6001", "6001.0"] {
///     assert_eq!(normalize_county_id(raw).as_str(), "0500000US06001");
/// }
/// let numeric = 6001.to_string();
/// assert_eq!(normalize_county_id(&numeric).as_str(), "0500000US06001");
/// ```
pub fn normalize_county_id(raw: &str) -> GeoId {
    normalize_numeric_code(GeoLevel::County, raw)
}

/// ZIP-area key: integer reparse, 5-digit pad, ZCTA prefix.
///
/// ZIP+4 values keep only the five-digit part.
pub fn normalize_zip_id(raw: &str) -> GeoId {
    let trimmed = raw.trim();
    let zip5 = match trimmed.split_once('-') {
        Some((head, _)) if !head.is_empty() => head,
        _ => trimmed,
    };
    normalize_numeric_code(GeoLevel::Zip, zip5)
}

/// Tract key: treated as a fixed-width code, padded to 11 with no reparse.
pub fn normalize_tract_id(raw: &str) -> GeoId {
    GeoId::new(
        GeoLevel::Tract,
        &zero_pad(raw, GeoLevel::Tract.code_width()),
    )
}

/// Combines the survey's 2-digit state and 3-digit county codes into a
/// 5-digit county FIPS value. `None` if either part is unparseable.
pub fn county_fips_from_parts(state: &str, county: &str) -> Option<i64> {
    let state = parse_int(state, -1);
    let county = parse_int(county, -1);
    if state < 0 || county < 0 || county > 999 {
        return None;
    }
    Some(state * 1000 + county)
}
