//! Civil date/time to Julian day and back.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use crate::error::EphemerisError;

pub const J2000: f64 = 2_451_545.0;
pub const DAYS_PER_CENTURY: f64 = 36_525.0;
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Julian day of a local civil instant, shifted to UT by `tz_hours`.
pub fn julian_day(date: NaiveDate, time: NaiveTime, tz_hours: f64) -> Result<f64, EphemerisError> {
    if !(-14.0..=14.0).contains(&tz_hours) {
        return Err(EphemerisError::InvalidTimezone { hours: tz_hours });
    }

    let (mut y, mut m) = (date.year() as f64, date.month() as f64);
    if m <= 2.0 {
        y -= 1.0;
        m += 12.0;
    }
    let a = (y / 100.0).trunc();
    let b = 2.0 - a + (a / 4.0).trunc();

    let jd0 = (365.25 * (y + 4716.0)).trunc() + (30.6001 * (m + 1.0)).trunc()
        + date.day() as f64
        + b
        - 1524.5;

    let hours = time.hour() as f64 + time.minute() as f64 / 60.0 + time.second() as f64 / 3600.0;
    Ok(jd0 + (hours - tz_hours) / 24.0)
}

/// Inverse of [`julian_day`] at UT: the civil date plus the fraction of the day elapsed.
///
/// Always takes the Gregorian branch so it mirrors the forward formula.
pub fn calendar_date(jd: f64) -> Result<(NaiveDate, f64), EphemerisError> {
    if !jd.is_finite() {
        return Err(EphemerisError::DateOutOfRange { jd });
    }
    let shifted = jd + 0.5;
    let z = shifted.trunc();
    let f = shifted - z;

    let alpha = ((z - 1_867_216.25) / 36_524.25).trunc();
    let a = z + 1.0 + alpha - (alpha / 4.0).trunc();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).trunc();
    let d = (365.25 * c).trunc();
    let e = ((b - d) / 30.6001).trunc();

    let day = b - d - (30.6001 * e).trunc();
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

    NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
        .map(|date| (date, f))
        .ok_or(EphemerisError::DateOutOfRange { jd })
}

/// Julian centuries since J2000.0.
pub fn centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000) / DAYS_PER_CENTURY
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_j2000_epoch() {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        let jd = julian_day(ymd(2000, 1, 1), noon, 0.0).unwrap();
        assert!((jd - J2000).abs() < 1e-9);
    }

    #[test]
    fn test_timezone_shift() {
        let t = NaiveTime::from_hms_opt(10, 30, 0).unwrap();
        let local = julian_day(ymd(1990, 5, 15), t, 5.5).unwrap();
        let utc = julian_day(ymd(1990, 5, 15), NaiveTime::from_hms_opt(5, 0, 0).unwrap(), 0.0).unwrap();
        assert!((local - utc).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_timezone() {
        let t = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
        assert!(matches!(
            julian_day(ymd(2000, 1, 1), t, 15.0),
            Err(EphemerisError::InvalidTimezone { .. })
        ));
    }

    #[test]
    fn test_calendar_date_inverse() {
        let t = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
        for date in [ymd(1582, 10, 15), ymd(1900, 2, 28), ymd(2000, 2, 29), ymd(2024, 12, 31)] {
            let jd = julian_day(date, t, 0.0).unwrap();
            let (back, fraction) = calendar_date(jd).unwrap();
            assert_eq!(back, date);
            assert!((fraction - 0.75).abs() < 1e-6);
        }
    }

    #[test]
    fn test_calendar_date_rejects_nan() {
        assert!(calendar_date(f64::NAN).is_err());
    }
}
