//! Temporal generalisation to fixed-width time-of-day slots
//!
//! Two separately named coercion paths exist on purpose: [`format_timestamp`]
//! is lenient bulk normalisation (a malformed cell becomes missing, never an
//! error), while the coercion inside [`generalise_temporal`] is strict and
//! fails on the first unparseable token. Keeping them distinct avoids silent
//! behaviour drift between the two.
//!
//! Slotting keeps only the hour and minute of a timestamp: two timestamps on
//! different calendar days at the same time of day collapse to the same slot.
//! Discarding the date is the intended generalisation semantic.

use crate::domain::errors::AnonkitError;
use crate::domain::result::Result;
use crate::domain::{Dataset, Series, Value};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Temporal resolutions a slot may have, in minutes.
pub const ALLOWED_RESOLUTIONS: [u32; 3] = [15, 30, 60];

/// Accepted date-time layouts, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Timestamp source for [`generalise_temporal`]
///
/// An explicit tagged union instead of runtime type dispatch: the input is
/// either a flat column or a table plus the name of its timestamp-bearing
/// column, and nothing else is representable.
#[derive(Debug, Clone, Copy)]
pub enum TimestampInput<'a> {
    /// A standalone timestamp column
    FlatSeries(&'a Series),
    /// A dataset and the name of the column holding timestamps
    TableColumn {
        table: &'a Dataset,
        column: &'a str,
    },
}

/// Leniently normalise a column of mixed-format timestamp text.
///
/// Each text cell is tried against the accepted layouts (full date-times,
/// date-only, time-only); a cell that parses becomes a timestamp, anything
/// unparseable becomes missing rather than raising, so a single malformed
/// row does not abort a bulk normalisation. Cells that already hold
/// timestamps pass through.
///
/// # Examples
///
/// ```
/// use anonkit::domain::{Series, Value};
/// use anonkit::generalisation::format_timestamp;
///
/// let raw = Series::from_texts("ts", ["2024-01-01 10:30:00", "not a date"]);
/// let normalised = format_timestamp(&raw);
/// assert!(matches!(normalised.get(0), Some(Value::Timestamp(_))));
/// assert_eq!(normalised.get(1), Some(&Value::Missing));
/// ```
pub fn format_timestamp(series: &Series) -> Series {
    let values = series
        .iter()
        .map(|v| match v {
            Value::Timestamp(ts) => Value::Timestamp(*ts),
            Value::Text(token) => match parse_timestamp(token) {
                Some(ts) => Value::Timestamp(ts),
                None => Value::Missing,
            },
            _ => Value::Missing,
        })
        .collect();
    Series::new(series.name(), values)
}

/// Generalise timestamp data into fixed-width time-of-day slots.
///
/// Produces a series named `timeslot` of labels `"{hour}_{bucketStart}"`,
/// where `bucketStart = floor(minute / resolution) * resolution` (no zero
/// padding: `"23_0"`, `"9_15"`). Missing cells stay missing.
///
/// The selected column is coerced strictly: a text cell that fails every
/// accepted layout aborts the call, unlike the lenient [`format_timestamp`].
///
/// # Panics
///
/// Panics if `temporal_resolution` is not one of 15, 30 or 60 minutes. This
/// is a hard precondition on the call, not a recoverable input error.
///
/// # Errors
///
/// - [`AnonkitError::UnknownColumn`] if the table form names an absent
///   column (the message lists the available columns)
/// - [`AnonkitError::TimestampParse`] naming the first unparseable token
///
/// # Examples
///
/// ```
/// use anonkit::domain::{Series, Value};
/// use anonkit::generalisation::{generalise_temporal, TimestampInput};
///
/// # fn example() -> anonkit::domain::Result<()> {
/// let ts = Series::from_texts("ts", ["2024-01-01 10:45:00"]);
/// let slots = generalise_temporal(TimestampInput::FlatSeries(&ts), 30)?;
/// assert_eq!(slots.get(0), Some(&Value::Text("10_30".into())));
/// # Ok(())
/// # }
/// ```
pub fn generalise_temporal(data: TimestampInput<'_>, temporal_resolution: u32) -> Result<Series> {
    assert!(
        ALLOWED_RESOLUTIONS.contains(&temporal_resolution),
        "'{temporal_resolution}' is not in {ALLOWED_RESOLUTIONS:?}, please choose a valid value"
    );

    let series = match data {
        TimestampInput::FlatSeries(series) => series,
        TimestampInput::TableColumn { table, column } => table
            .column(column)
            .ok_or_else(|| AnonkitError::unknown_column(column, &table.column_names()))?,
    };

    let slots = series
        .iter()
        .map(|v| {
            let time = match v {
                Value::Timestamp(ts) => ts.time(),
                Value::Text(token) => parse_timestamp(token)
                    .ok_or_else(|| AnonkitError::TimestampParse(token.clone()))?
                    .time(),
                Value::Missing => return Ok(Value::Missing),
                other => return Err(AnonkitError::TimestampParse(other.to_string())),
            };
            Ok(Value::Text(slot_label(time, temporal_resolution)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Series::new("timeslot", slots))
}

fn slot_label(time: NaiveTime, resolution: u32) -> String {
    format!("{}_{}", time.hour(), time.minute() / resolution * resolution)
}

/// Try a token against every accepted layout.
fn parse_timestamp(token: &str) -> Option<NaiveDateTime> {
    let token = token.trim();

    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(token, format) {
            return Some(ts);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(token, format) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }
    for format in TIME_FORMATS {
        if let Ok(time) = NaiveTime::parse_from_str(token, format) {
            // Time-only tokens get a fixed anchor date; slotting discards it.
            return Some(NaiveDate::from_ymd_opt(1970, 1, 1)?.and_time(time));
        }
    }
    None
}
