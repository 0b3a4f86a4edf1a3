//! Per-local-day forecast summary

use serde::{Deserialize, Serialize};

/// One row per local calendar day
///
/// Every measured field is optional: a day that only received, say, a sky
/// cover value carries nothing else. Units are canonical (see [`crate::units`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Local calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Accumulated snow depth in inches
    pub accumulation_in: Option<f64>,
    /// Name of the accumulation source that produced `accumulation_in`
    pub accumulation_source: Option<String>,
    /// `accumulation_in` was derived from a fallback source
    pub accumulation_from_fallback: bool,
    /// Maximum probability of precipitation over the day, percent
    pub probability_pct: Option<f64>,
    /// Daily high in degrees Fahrenheit
    pub temperature_max_f: Option<f64>,
    /// Daily low in degrees Fahrenheit
    pub temperature_min_f: Option<f64>,
    /// Mean wind speed in mph
    pub wind_speed_mph: Option<f64>,
    /// Vector-mean wind direction in degrees, meteorological "from" bearing
    pub wind_direction_deg: Option<f64>,
    /// Mean sky cover, percent
    pub sky_cover_pct: Option<f64>,
}

impl DailyRecord {
    #[must_use]
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Self::default()
        }
    }

    /// 16-point compass label for the mean wind direction
    #[must_use]
    pub fn wind_direction_cardinal(&self) -> Option<&'static str> {
        self.wind_direction_deg
            .map(crate::forecast::wind::cardinal_direction)
    }

    /// Format accumulation with unit
    #[must_use]
    pub fn format_accumulation(&self) -> String {
        match self.accumulation_in {
            Some(inches) => format!("{inches:.1}\""),
            None => "-".to_string(),
        }
    }
}
