//! Shutter-duration notation decoding.
//!
//! Camera displays write shutter durations in four ways:
//!
//! ```text
//! 2"     whole seconds        → 2   (3.2" → 3)
//! 0"3    leading-zero quote   → 1/3
//! 1/4    fraction             → 0.25
//! 3.2    plain decimal        → 3.2
//! ```
//!
//! The notation is sniffed from where the `"` and `/` marks sit.

use crate::error::ExposureError;

/// The notation a shutter-duration string is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutterNotation {
    /// `<N>"`, e.g. `15"`. A fractional part is dropped (`1.3"` reads as 1).
    Seconds,
    /// `0"<N>`, e.g. `0"3`.
    LeadingZero,
    /// `<N>/<D>`, e.g. `1/250`.
    Fraction,
    /// A bare decimal literal, e.g. `3.2`.
    Decimal,
}

impl ShutterNotation {
    /// Identify the notation of `shutter` from the position of its marks.
    ///
    /// Returns `None` when the marks are placed in a way no notation uses.
    /// The numeric parts are not validated here.
    pub fn sniff(shutter: &str) -> Option<Self> {
        let quotes = shutter.matches('"').count();
        let slashes = shutter.matches('/').count();

        match (quotes, slashes) {
            (0, 0) => Some(Self::Decimal),
            (0, 1) => Some(Self::Fraction),
            (1, 0) if shutter.ends_with('"') => Some(Self::Seconds),
            (1, 0) if shutter.starts_with("0\"") => Some(Self::LeadingZero),
            _ => None,
        }
    }
}

/// Decode a shutter-duration string into seconds.
///
/// ```
/// use exposure_core::shutter_seconds;
///
/// assert_eq!(shutter_seconds("2\"").unwrap(), 2.0);
/// assert_eq!(shutter_seconds("1/4").unwrap(), 0.25);
/// assert!(shutter_seconds("fast").is_err());
/// ```
pub fn shutter_seconds(shutter: &str) -> Result<f64, ExposureError> {
    let invalid = || ExposureError::InvalidNotation(shutter.to_string());
    let notation = ShutterNotation::sniff(shutter).ok_or_else(invalid)?;

    let seconds = match notation {
        ShutterNotation::Seconds => parse_number(&shutter[..shutter.len() - 1]).map(f64::trunc),
        ShutterNotation::LeadingZero => parse_number(&shutter[2..]).map(|n| 1.0 / n),
        ShutterNotation::Fraction => shutter.split_once('/').and_then(|(num, den)| {
            let num = parse_number(num)?;
            let den = parse_number(den)?;
            Some(num / den)
        }),
        ShutterNotation::Decimal => parse_number(shutter),
    };

    seconds.filter(|s| s.is_finite() && *s > 0.0).ok_or_else(invalid)
}

/// Parse a strictly positive, plain decimal number (digits and at most one
/// `.`; no sign, exponent, or `inf`/`NaN` spellings).
fn parse_number(s: &str) -> Option<f64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| *n > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_whole_seconds() {
        assert_eq!(shutter_seconds("30\"").unwrap(), 30.0);
        assert_eq!(shutter_seconds("2\"").unwrap(), 2.0);
    }

    #[test]
    fn test_fractional_seconds_with_trailing_quote_truncate() {
        assert_eq!(shutter_seconds("1.3\"").unwrap(), 1.0);
        assert_eq!(shutter_seconds("3.2\"").unwrap(), 3.0);
        assert_eq!(shutter_seconds("2.5\"").unwrap(), 2.0);
    }

    #[test]
    fn test_leading_zero_quote_is_reciprocal() {
        assert!((shutter_seconds("0\"3").unwrap() - 1.0 / 3.0).abs() < EPSILON);
        assert!((shutter_seconds("0\"5").unwrap() - 0.2).abs() < EPSILON);
    }

    #[test]
    fn test_fraction() {
        assert_eq!(shutter_seconds("1/4").unwrap(), 0.25);
        assert_eq!(shutter_seconds("1/8000").unwrap(), 1.0 / 8000.0);
    }

    #[test]
    fn test_plain_decimal() {
        assert!((shutter_seconds("3.2").unwrap() - 3.2).abs() < EPSILON);
        assert_eq!(shutter_seconds("120").unwrap(), 120.0);
    }

    #[test]
    fn test_sniff() {
        assert_eq!(ShutterNotation::sniff("15\""), Some(ShutterNotation::Seconds));
        assert_eq!(ShutterNotation::sniff("0\"4"), Some(ShutterNotation::LeadingZero));
        assert_eq!(ShutterNotation::sniff("1/60"), Some(ShutterNotation::Fraction));
        assert_eq!(ShutterNotation::sniff("2.5"), Some(ShutterNotation::Decimal));
        assert_eq!(ShutterNotation::sniff("1\"2\""), None);
        assert_eq!(ShutterNotation::sniff("1/2/3"), None);
        assert_eq!(ShutterNotation::sniff("2\"/3"), None);
    }

    #[test]
    fn test_rejects_malformed_input() {
        let malformed = [
            "", "\"", "0\"", "0.5\"", "/4", "1/", "1/0", "0", "abc", "-2", "1e3", "inf", "NaN",
            "3\"5", "1..2",
        ];
        for bad in malformed {
            assert!(
                matches!(shutter_seconds(bad), Err(ExposureError::InvalidNotation(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_every_table_entry_decodes() {
        use crate::granularity::Granularity;
        use crate::tables::shutter_durations;

        for &g in Granularity::all() {
            for s in shutter_durations(g).values() {
                assert!(shutter_seconds(s).is_ok(), "{s:?} at {g}");
            }
        }
    }
}
