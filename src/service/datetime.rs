//! Dates and times.
//!
//! Calendar values are drawn field by field (year, month, day) so that the
//! same seed gives the same date on every platform. Days are drawn from the
//! actual length of the month, never past it.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::domain::TimestampFormat;
use crate::error::{GenResult, GenerationError};
use crate::random::RandomSource;

/// The current calendar year (UTC).
#[must_use]
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Number of days in `month` of `year`.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(28, |last| last.day())
}

/// Random year in `[minimum, maximum]`.
///
/// # Errors
///
/// Returns [`GenerationError::InvalidArgument`] if `minimum > maximum`.
pub fn year(rng: &mut RandomSource, minimum: i32, maximum: i32) -> GenResult<i32> {
    let value = rng.integer(i64::from(minimum), i64::from(maximum))?;
    i32::try_from(value).map_err(|_| GenerationError::InvalidArgument(format!("year {value}")))
}

/// Random calendar date with a year in `[start, end]`.
///
/// # Errors
///
/// Returns [`GenerationError::InvalidArgument`] for an empty or
/// unrepresentable year range.
pub fn date(rng: &mut RandomSource, start: i32, end: i32) -> GenResult<NaiveDate> {
    let year = year(rng, start, end)?;
    let month = rng.range(1..=12_u32);
    let day = rng.range(1..=days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        GenerationError::InvalidArgument(format!("date {year}-{month:02}-{day:02} out of range"))
    })
}

/// Random time of day with microsecond precision.
pub fn time(rng: &mut RandomSource) -> NaiveTime {
    let hour = rng.range(0..=23_u32);
    let minute = rng.range(0..=59_u32);
    let second = rng.range(0..=59_u32);
    let micro = rng.range(0..=999_999_u32);
    NaiveTime::from_hms_micro_opt(hour, minute, second, micro).unwrap_or(NaiveTime::MIN)
}

/// Random date and time with a year in `[start, end]`.
///
/// # Errors
///
/// See [`date`].
pub fn datetime(rng: &mut RandomSource, start: i32, end: i32) -> GenResult<NaiveDateTime> {
    let date = date(rng, start, end)?;
    Ok(date.and_time(time(rng)))
}

/// Week date such as `2019-W07`, weeks 1 to 52.
///
/// # Errors
///
/// Returns [`GenerationError::InvalidArgument`] if `start > end`.
pub fn week_date(rng: &mut RandomSource, start: i32, end: i32) -> GenResult<String> {
    let year = year(rng, start, end)?;
    let week = rng.range(1..=52_u32);
    Ok(format!("{year}-W{week:02}"))
}

/// Random day of month, 1 to 31.
pub fn day_of_month(rng: &mut RandomSource) -> u32 {
    rng.range(1..=31_u32)
}

/// Random timestamp in the requested format.
///
/// # Errors
///
/// See [`date`].
pub fn timestamp(
    rng: &mut RandomSource,
    format: TimestampFormat,
    start: i32,
    end: i32,
) -> GenResult<String> {
    let value = datetime(rng, start, end)?;
    Ok(match format {
        TimestampFormat::Posix => value.and_utc().timestamp().to_string(),
        TimestampFormat::Rfc3339 => value.format("%Y-%m-%dT%H:%M:%S").to_string(),
        TimestampFormat::Iso8601 => value.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
    })
}
