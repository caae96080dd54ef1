//! Survey locale codes (`LOCALE_ADD`).
//!
//! Codes are two digits: the tens digit is the class (1 city, 2 suburb,
//! 3 town, 4 rural) and the units digit the size/remoteness.

/// Locale code of a library's address, or a negative value when unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocaleType(pub i64);

impl LocaleType {
    /// True inside the open band `(0, 20)`, i.e. the city classes.
    ///
    /// City libraries prefer the finer demographic index over ZIP-level data.
    ///
    /// ```
    /// use libmap_model::LocaleType;
    ///
    /// assert!(LocaleType(11).is_city());
    /// assert!(!LocaleType(21).is_city());
    /// assert!(!LocaleType(-1).is_city());
    /// ```
    pub fn is_city(self) -> bool {
        self.0 > 0 && self.0 < 20
    }
}
