//! Integer-encoded calendar dates.
//!
//! Verification files store dates as `YYYYMMDD` integers, e.g. `20150101`.

use chrono::NaiveDate;

use crate::error::{CommonError, CommonResult};

/// Decode a `YYYYMMDD` integer into a calendar date.
pub fn date_to_naive(date: i64) -> CommonResult<NaiveDate> {
    if date < 0 {
        return Err(CommonError::InvalidDate(date));
    }
    let year = i32::try_from(date / 10000).map_err(|_| CommonError::InvalidDate(date))?;
    let month = ((date / 100) % 100) as u32;
    let day = (date % 100) as u32;
    NaiveDate::from_ymd_opt(year, month, day).ok_or(CommonError::InvalidDate(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_decoding() {
        assert_eq!(date_to_naive(20150101).unwrap(), NaiveDate::from_ymd_opt(2015, 1, 1).unwrap());
        assert_eq!(date_to_naive(20161231).unwrap(), NaiveDate::from_ymd_opt(2016, 12, 31).unwrap());
    }

    #[test]
    fn test_invalid_dates() {
        assert!(date_to_naive(20151301).is_err());
        assert!(date_to_naive(20150230).is_err());
        assert!(date_to_naive(0).is_err());
        assert!(date_to_naive(-5).is_err());
    }
}
