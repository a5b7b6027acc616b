//! Threshold and quantile variable names used by COMPS files.
//!
//! COMPS stores one variable per threshold or quantile and encodes the value
//! in the variable name:
//!
//! | value | threshold name | quantile name |
//! |-------|----------------|---------------|
//! | 0     | `p0`           | `q0`          |
//! | 0.3   | `p03`          | `q30`         |
//! | -0.5  | `pm05`         |               |
//! | -2    | `pm2`          |               |
//! | 1     | `p1`           | `q100`        |

/// A COMPS variable name decoded into the value it stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NamedValue {
    Threshold(f64),
    Quantile(f64),
}

/// Decode a variable name into a threshold or quantile, if it is either.
pub fn classify(name: &str) -> Option<NamedValue> {
    if let Some(threshold) = token_to_threshold(name) {
        return Some(NamedValue::Threshold(threshold));
    }
    token_to_quantile(name).map(NamedValue::Quantile)
}

/// Threshold to COMPS variable name, e.g. 0.3 -> `p03`.
///
/// Thresholds with magnitude of at least 1 are written as their integer part,
/// as the COMPS producer does. Returns `None` for non-finite values.
pub fn threshold_to_token(threshold: f64) -> Option<String> {
    if !threshold.is_finite() {
        return None;
    }
    let digits = if threshold == 0.0 {
        "0".to_string()
    } else if threshold.abs() < 1.0 {
        compact(threshold).replace('.', "")
    } else {
        format!("{}", threshold.trunc() as i64)
    };
    Some(format!("p{}", digits.replacen('-', "m", 1)))
}

/// Quantile to COMPS variable name, e.g. 0.3 -> `q30`.
///
/// Returns `None` for quantiles outside [0, 1].
pub fn quantile_to_token(quantile: f64) -> Option<String> {
    if !(0.0..=1.0).contains(&quantile) {
        return None;
    }
    let digits = if quantile == 0.0 {
        "0".to_string()
    } else {
        compact(quantile * 100.0).replace('.', "")
    };
    Some(format!("q{}", digits))
}

/// COMPS variable name to threshold, e.g. `p03` -> 0.3.
pub fn token_to_threshold(name: &str) -> Option<f64> {
    let rest = name.strip_prefix('p')?;
    let (negative, digits) = match rest.strip_prefix('m') {
        Some(digits) => (true, digits),
        None => (false, rest),
    };
    let value = parse_digits(digits)?;
    if value == 0.0 {
        Some(0.0)
    } else if negative {
        Some(-value)
    } else {
        Some(value)
    }
}

/// COMPS variable name to quantile, e.g. `q30` -> 0.3.
pub fn token_to_quantile(name: &str) -> Option<f64> {
    let digits = name.strip_prefix('q')?;
    let quantile = parse_digits(digits)? / 100.0;
    (0.0..=1.0).contains(&quantile).then_some(quantile)
}

/// Parse a run of digits whose decimal point was stripped.
///
/// A leading zero followed by more digits marks a value below one, so the
/// point goes back right after it: `03` -> 0.3, `005` -> 0.05.
fn parse_digits(digits: &str) -> Option<f64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let text = if digits.len() > 1 && digits.starts_with('0') {
        format!("0.{}", &digits[1..])
    } else {
        digits.to_string()
    };
    text.parse().ok()
}

/// Shortest decimal form after rounding to six significant digits, like
/// C's `%g` without the exponent. Keeps `0.3 * 100.0` from printing as
/// `30.000000000000004`.
fn compact(value: f64) -> String {
    let rounded: f64 = format!("{:.5e}", value).parse().unwrap_or(value);
    format!("{}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::assert_approx_eq;

    #[test]
    fn test_threshold_tokens() {
        assert_eq!(threshold_to_token(0.3).as_deref(), Some("p03"));
        assert_eq!(threshold_to_token(-2.0).as_deref(), Some("pm2"));
        assert_eq!(threshold_to_token(0.0).as_deref(), Some("p0"));
        assert_eq!(threshold_to_token(-0.5).as_deref(), Some("pm05"));
        assert_eq!(threshold_to_token(5.0).as_deref(), Some("p5"));
        assert_eq!(threshold_to_token(0.05).as_deref(), Some("p005"));
        assert_eq!(threshold_to_token(f64::NAN), None);
    }

    #[test]
    fn test_threshold_large_values_truncate() {
        assert_eq!(threshold_to_token(12.7).as_deref(), Some("p12"));
        assert_eq!(threshold_to_token(-1.5).as_deref(), Some("pm1"));
    }

    #[test]
    fn test_decode_thresholds() {
        assert_eq!(token_to_threshold("p03"), Some(0.3));
        assert_eq!(token_to_threshold("pm2"), Some(-2.0));
        assert_eq!(token_to_threshold("p0"), Some(0.0));
        assert_eq!(token_to_threshold("pm05"), Some(-0.5));
        assert_eq!(token_to_threshold("p10"), Some(10.0));
    }

    #[test]
    fn test_decode_rejects_non_thresholds() {
        for name in ["pit", "p", "pm", "obs", "fcst", "Lat", "q30", "p0.3", "pinf"] {
            assert_eq!(token_to_threshold(name), None, "{} should be rejected", name);
        }
    }

    #[test]
    fn test_threshold_roundtrip() {
        for threshold in [-2.0, -0.5, 0.0, 0.3, 5.0] {
            let token = threshold_to_token(threshold).unwrap();
            let decoded = token_to_threshold(&token).unwrap();
            assert_approx_eq!(decoded, threshold, 1e-9);
        }
    }

    #[test]
    fn test_quantile_tokens() {
        assert_eq!(quantile_to_token(0.3).as_deref(), Some("q30"));
        assert_eq!(quantile_to_token(0.0).as_deref(), Some("q0"));
        assert_eq!(quantile_to_token(0.5).as_deref(), Some("q50"));
        assert_eq!(quantile_to_token(1.0).as_deref(), Some("q100"));
        assert_eq!(quantile_to_token(1.5), None);
        assert_eq!(quantile_to_token(-0.1), None);
    }

    #[test]
    fn test_decode_quantiles() {
        assert_eq!(token_to_quantile("q30"), Some(0.3));
        assert_eq!(token_to_quantile("q0"), Some(0.0));
        assert_eq!(token_to_quantile("q100"), Some(1.0));
        assert_eq!(token_to_quantile("q150"), None);
        assert_eq!(token_to_quantile("quantiles"), None);
    }

    #[test]
    fn test_quantile_roundtrip() {
        for quantile in [0.0, 0.3, 0.5, 1.0] {
            let token = quantile_to_token(quantile).unwrap();
            let decoded = token_to_quantile(&token).unwrap();
            assert_approx_eq!(decoded, quantile, 1e-9);
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("p03"), Some(NamedValue::Threshold(0.3)));
        assert_eq!(classify("q90"), Some(NamedValue::Quantile(0.9)));
        assert_eq!(classify("obs"), None);
    }
}
