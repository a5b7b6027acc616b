//! Numeric cleaning helpers.

use crate::error::{CommonError, CommonResult};

/// Sentinel used by verification files to mark a missing value.
pub const MISSING_VALUE: f64 = -999.0;

/// Map the missing-value sentinel to NaN, pass anything else through.
pub fn clean(value: f64, missing: f64) -> f64 {
    if value == missing {
        f64::NAN
    } else {
        value
    }
}

/// Clean every value of a slice in place.
///
/// Values equal to `fill` (a variable's `_FillValue`, when it has one) are
/// treated the same way as the missing sentinel.
pub fn clean_slice(values: &mut [f64], missing: f64, fill: Option<f64>) {
    for value in values.iter_mut() {
        let is_fill = fill.map_or(false, |f| *value == f);
        if is_fill || *value == missing {
            *value = f64::NAN;
        }
    }
}

/// Parse a token into a float and clean it.
pub fn parse_clean(token: &str, missing: f64) -> CommonResult<f64> {
    let value: f64 = token
        .trim()
        .parse()
        .map_err(|_| CommonError::InvalidNumber(token.to_string()))?;
    Ok(clean(value, missing))
}

/// The integer a float holds exactly, if it is whole and fits in `i64`.
///
/// `2^63` itself is out of range; casting it would saturate to `i64::MAX`.
pub fn as_integer(value: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let whole = value.is_finite() && value.fract() == 0.0;
    (whole && (-LIMIT..LIMIT).contains(&value)).then(|| value as i64)
}

/// Whether the string parses as a floating-point number.
pub fn is_number(s: &str) -> bool {
    !s.is_empty() && s.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_sentinel() {
        assert!(clean(-999.0, MISSING_VALUE).is_nan());
        assert_eq!(clean(-998.5, MISSING_VALUE), -998.5);
    }

    #[test]
    fn test_parse_clean_exact_values() {
        assert!(parse_clean("-999", MISSING_VALUE).unwrap().is_nan());
        assert_eq!(parse_clean("3.4", MISSING_VALUE).unwrap(), 3.4);
        assert_eq!(parse_clean("-122.1", MISSING_VALUE).unwrap(), -122.1);
        assert_eq!(parse_clean("20150101", MISSING_VALUE).unwrap(), 20150101.0);
    }

    #[test]
    fn test_parse_clean_rejects_text() {
        assert!(matches!(
            parse_clean("abc", MISSING_VALUE),
            Err(CommonError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_clean_slice_with_fill() {
        let mut values = [1.0, -999.0, 9.96921e36, 2.5];
        clean_slice(&mut values, MISSING_VALUE, Some(9.96921e36));
        assert_eq!(values[0], 1.0);
        assert!(values[1].is_nan());
        assert!(values[2].is_nan());
        assert_eq!(values[3], 2.5);
    }

    #[test]
    fn test_as_integer_range() {
        assert_eq!(as_integer(20150101.0), Some(20150101));
        assert_eq!(as_integer(-4.0), Some(-4));
        assert_eq!(as_integer(-9_223_372_036_854_775_808.0), Some(i64::MIN));
        assert_eq!(as_integer(2.5), None);
        assert_eq!(as_integer(f64::NAN), None);
        assert_eq!(as_integer(f64::INFINITY), None);
        assert_eq!(as_integer(9_223_372_036_854_775_808.0), None);
        assert_eq!(as_integer(1e19), None);
        assert_eq!(as_integer(-2e19), None);
    }

    #[test]
    fn test_is_number() {
        assert!(is_number("0.3"));
        assert!(is_number("-2"));
        assert!(is_number("1e3"));
        assert!(!is_number(""));
        assert!(!is_number("0.3.1"));
        assert!(!is_number("it"));
    }
}
