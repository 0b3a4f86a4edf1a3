//! Local calendar day bucketing
//!
//! Day keys come from the zone's own wall-clock rendering of an instant via
//! the IANA database in `chrono-tz`; no fixed offsets are assumed anywhere.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::{PowderdayError, Result};

/// Resolve an IANA zone name such as `America/Denver`
pub fn parse_time_zone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| PowderdayError::validation(format!("Unknown time zone '{name}'")))
}

/// Wall-clock calendar date of `instant` in `tz`
#[must_use]
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// `YYYY-MM-DD` key of the local calendar day containing `instant`
#[must_use]
pub fn local_day_key(instant: DateTime<Utc>, tz: Tz) -> String {
    local_date(instant, tz).format("%Y-%m-%d").to_string()
}
