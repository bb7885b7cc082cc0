//! series::frequency — duration-string parsing and sampling-frequency policy.
//!
//! Purpose
//! -------
//! Centralize every conversion between textual time quantities and
//! `chrono::Duration` used by the declustering stack: the pandas-flavored
//! timedelta grammar for estimation windows and explicit frequencies, the
//! median-of-gaps inference used when the caller does not state a sampling
//! frequency, and the fractional-hour conversions needed for lags derived
//! from estimated parameters.
//!
//! Key behaviors
//! -------------
//! - [`parse_timedelta`] parses `"6d"`, `"1d 12h"`, `"90min"`, `"06:00:00"`
//!   and similar strings into a strictly positive [`Duration`].
//! - [`Frequency`] selects between an explicit sampling interval and
//!   inference from the index ([`Frequency::Infer`], the median of
//!   successive timestamp gaps).
//! - [`duration_from_hours`] and [`hours_between`] convert between
//!   fractional hours and `Duration` without losing sub-second precision.
//!
//! Invariants & assumptions
//! ------------------------
//! - Parsed timedeltas are strictly positive; zero or negative quantities
//!   are rejected at parse time.
//! - Frequency inference requires at least two index samples and relies on
//!   the index being strictly increasing (guaranteed by `SeriesFrame`).
//! - Hour quantities converted to durations must be finite and small enough
//!   to fit the nanosecond range of `chrono::Duration`.
//!
//! Conventions
//! -----------
//! - The token grammar accepts whitespace-separated `<number><unit>`
//!   components with units d/day(s), h/hr(s)/hour(s), m/min(s)/minute(s),
//!   s/sec(s)/second(s), w/week(s); numbers may be fractional.
//! - The clock grammar is `HH:MM:SS` with integer fields.
//! - All failures are reported via `SeriesError::TimedeltaParse` (grammar),
//!   `SeriesError::CannotInferFrequency` / `NonPositiveFrequency`
//!   (frequency), or `SeriesError::HoursOutOfRange` (conversion).
//!
//! Downstream usage
//! ----------------
//! - The declustering pipeline resolves the sampling frequency up front so
//!   that parse failures surface before any clustering work starts, and uses
//!   [`duration_from_hours`] to turn an estimated SED into the final
//!   clustering lag.
//!
//! Testing notes
//! -------------
//! - Unit tests cover both grammars, mixed-component strings, rejection of
//!   unknown units / empty strings / zero quantities, median inference on
//!   odd and even gap counts, and round-tripping of fractional hours.

use crate::series::errors::{SeriesError, SeriesResult};
use chrono::{DateTime, Duration, Utc};

const NANOS_PER_HOUR: f64 = 3_600_000_000_000.0;

/// Sampling-frequency policy for a series frame.
///
/// The frequency is interpretation metadata for the fixed sampling interval
/// of the input series. It does **not** resample or otherwise modify the
/// data.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Frequency {
    /// Infer the interval as the median of successive index gaps.
    #[default]
    Infer,
    /// Use an explicit, strictly positive interval.
    Fixed(Duration),
}

impl Frequency {
    /// Resolve the policy against a timestamp index.
    ///
    /// Parameters
    /// ----------
    /// - `index`: `&[DateTime<Utc>]`
    ///   Strictly increasing timestamps of the series the frequency belongs
    ///   to. Only consulted by [`Frequency::Infer`].
    ///
    /// Returns
    /// -------
    /// `SeriesResult<Duration>`
    ///   - `Ok(interval)` with the explicit or inferred sampling interval.
    ///   - `Err(SeriesError)` when resolution is impossible.
    ///
    /// Errors
    /// ------
    /// - `SeriesError::NonPositiveFrequency`
    ///   Returned by `Fixed` when the supplied interval is zero or negative.
    /// - `SeriesError::CannotInferFrequency`
    ///   Returned by `Infer` when the index holds fewer than two samples.
    ///
    /// Notes
    /// -----
    /// - Inference takes the median of the successive gaps; for an even gap
    ///   count the two middle gaps are averaged. With a strictly increasing
    ///   index the result is always strictly positive.
    pub fn resolve(&self, index: &[DateTime<Utc>]) -> SeriesResult<Duration> {
        match self {
            Frequency::Fixed(interval) => {
                if *interval <= Duration::zero() {
                    return Err(SeriesError::NonPositiveFrequency);
                }
                Ok(*interval)
            }
            Frequency::Infer => {
                if index.len() < 2 {
                    return Err(SeriesError::CannotInferFrequency { samples: index.len() });
                }
                let mut gaps: Vec<i64> = index
                    .windows(2)
                    .map(|pair| {
                        let gap = pair[1].signed_duration_since(pair[0]);
                        gap.num_nanoseconds().unwrap_or(i64::MAX)
                    })
                    .collect();
                gaps.sort_unstable();
                let mid = gaps.len() / 2;
                let median = if gaps.len() % 2 == 1 {
                    gaps[mid]
                } else {
                    gaps[mid - 1] / 2 + gaps[mid] / 2 + (gaps[mid - 1] % 2 + gaps[mid] % 2) / 2
                };
                Ok(Duration::nanoseconds(median))
            }
        }
    }
}

/// Parse a pandas-flavored timedelta string into a strictly positive duration.
///
/// Parameters
/// ----------
/// - `input`: `&str`
///   Either a clock string `"HH:MM:SS"` or whitespace-separated
///   `<number><unit>` components such as `"6d"`, `"1d 12h"`, `"90min"`,
///   `"1.5h"`. Units: `d`/`day`/`days`, `h`/`hr`/`hrs`/`hour`/`hours`,
///   `m`/`min`/`mins`/`minute`/`minutes`, `s`/`sec`/`secs`/`second`/
///   `seconds`, `w`/`week`/`weeks`. Matching is case-insensitive.
///
/// Returns
/// -------
/// `SeriesResult<Duration>`
///   - `Ok(duration)` for a well-formed, strictly positive quantity.
///   - `Err(SeriesError::TimedeltaParse { .. })` otherwise, with a short
///     reason describing the first offending token.
///
/// Errors
/// ------
/// - `SeriesError::TimedeltaParse`
///   Returned for empty input, malformed numbers, missing or unrecognized
///   units, malformed clock fields, and zero totals.
///
/// Panics
/// ------
/// - Never panics; all malformed inputs are reported via the error variant.
///
/// Examples
/// --------
/// ```rust
/// # use storm_decluster::series::frequency::parse_timedelta;
/// # use chrono::Duration;
/// assert_eq!(parse_timedelta("6d").unwrap(), Duration::days(6));
/// assert_eq!(parse_timedelta("06:00:00").unwrap(), Duration::hours(6));
/// assert_eq!(parse_timedelta("1d 12h").unwrap(), Duration::hours(36));
/// assert!(parse_timedelta("6 fortnights").is_err());
/// ```
pub fn parse_timedelta(input: &str) -> SeriesResult<Duration> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SeriesError::TimedeltaParse {
            input: input.to_string(),
            reason: "empty duration string",
        });
    }

    let total_nanos = if trimmed.contains(':') {
        parse_clock_nanos(input, trimmed)?
    } else {
        parse_component_nanos(input, trimmed)?
    };

    if !(total_nanos > 0.0) {
        return Err(SeriesError::TimedeltaParse {
            input: input.to_string(),
            reason: "duration must be strictly positive",
        });
    }
    if total_nanos >= i64::MAX as f64 {
        return Err(SeriesError::TimedeltaParse {
            input: input.to_string(),
            reason: "duration exceeds the representable range",
        });
    }

    Ok(Duration::nanoseconds(total_nanos as i64))
}

/// Convert a fractional hour quantity into a duration.
///
/// Returns `SeriesError::HoursOutOfRange` when `hours` is non-finite or too
/// large to represent as nanoseconds.
pub fn duration_from_hours(hours: f64) -> SeriesResult<Duration> {
    if !hours.is_finite() {
        return Err(SeriesError::HoursOutOfRange { value: hours });
    }
    let nanos = hours * NANOS_PER_HOUR;
    if nanos.abs() >= i64::MAX as f64 {
        return Err(SeriesError::HoursOutOfRange { value: hours });
    }
    Ok(Duration::nanoseconds(nanos as i64))
}

/// Signed gap between two timestamps in fractional hours.
///
/// Sub-second precision is preserved; the result is negative when `end`
/// precedes `start`.
pub fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let gap = end.signed_duration_since(start);
    gap.num_seconds() as f64 / 3600.0 + f64::from(gap.subsec_nanos()) / NANOS_PER_HOUR
}

fn parse_clock_nanos(input: &str, trimmed: &str) -> SeriesResult<f64> {
    let fields: Vec<&str> = trimmed.split(':').collect();
    if fields.len() != 3 {
        return Err(SeriesError::TimedeltaParse {
            input: input.to_string(),
            reason: "clock form must be HH:MM:SS",
        });
    }
    let mut parsed = [0u64; 3];
    for (slot, field) in parsed.iter_mut().zip(&fields) {
        *slot = field.trim().parse::<u64>().map_err(|_| SeriesError::TimedeltaParse {
            input: input.to_string(),
            reason: "clock fields must be non-negative integers",
        })?;
    }
    let seconds = parsed[0] as f64 * 3600.0 + parsed[1] as f64 * 60.0 + parsed[2] as f64;
    Ok(seconds * 1e9)
}

fn parse_component_nanos(input: &str, trimmed: &str) -> SeriesResult<f64> {
    let mut chars = trimmed.chars().peekable();
    let mut total = 0.0_f64;
    let mut components = 0usize;

    while chars.peek().is_some() {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        if chars.peek().is_none() {
            break;
        }

        let mut number = String::new();
        while chars.peek().is_some_and(|c| c.is_ascii_digit() || *c == '.') {
            number.push(chars.next().unwrap_or('0'));
        }
        let value: f64 = number.parse().map_err(|_| SeriesError::TimedeltaParse {
            input: input.to_string(),
            reason: "expected a non-negative number before the unit",
        })?;

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        let mut unit = String::new();
        while chars.peek().is_some_and(|c| c.is_alphabetic()) {
            unit.push(chars.next().unwrap_or(' '));
        }
        let nanos_per_unit = match unit.to_ascii_lowercase().as_str() {
            "d" | "day" | "days" => 24.0 * NANOS_PER_HOUR,
            "h" | "hr" | "hrs" | "hour" | "hours" => NANOS_PER_HOUR,
            "m" | "min" | "mins" | "minute" | "minutes" => NANOS_PER_HOUR / 60.0,
            "s" | "sec" | "secs" | "second" | "seconds" => 1e9,
            "w" | "week" | "weeks" => 7.0 * 24.0 * NANOS_PER_HOUR,
            "" => {
                return Err(SeriesError::TimedeltaParse {
                    input: input.to_string(),
                    reason: "missing unit after number",
                });
            }
            _ => {
                return Err(SeriesError::TimedeltaParse {
                    input: input.to_string(),
                    reason: "unrecognized unit",
                });
            }
        };

        total += value * nanos_per_unit;
        components += 1;
    }

    if components == 0 {
        return Err(SeriesError::TimedeltaParse {
            input: input.to_string(),
            reason: "no duration components found",
        });
    }
    Ok(total)
}
