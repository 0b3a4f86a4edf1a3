//! Generic time series shapes shared by every provider quantity

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::units::Unit;

/// One observation valid over `[start, start + duration_hours)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub start: DateTime<Utc>,
    /// May be fractional; zero means "one hour"
    pub duration_hours: f64,
    pub value: f64,
}

impl SeriesPoint {
    #[must_use]
    pub fn new(start: DateTime<Utc>, duration_hours: f64, value: f64) -> Self {
        Self {
            start,
            duration_hours,
            value,
        }
    }

    /// Duration in hours with zero, negative and non-finite values treated as one hour
    #[must_use]
    pub fn effective_hours(&self) -> f64 {
        if self.duration_hours.is_finite() && self.duration_hours > 0.0 {
            self.duration_hours
        } else {
            1.0
        }
    }

    /// End of the validity interval, `None` past the representable range
    #[must_use]
    pub fn end(&self) -> Option<DateTime<Utc>> {
        let seconds = (self.effective_hours() * 3600.0).round() as i64;
        self.start.checked_add_signed(TimeDelta::try_seconds(seconds)?)
    }
}

/// A series of points sharing one unit
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Series {
    pub unit: Unit,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    #[must_use]
    pub fn new(unit: Unit, points: Vec<SeriesPoint>) -> Self {
        Self { unit, points }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Physical quantity a series describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    /// Snowfall depth
    AccumulationPrimary,
    /// Liquid-equivalent precipitation
    AccumulationSecondary,
    Probability,
    TemperatureHourly,
    TemperatureMax,
    TemperatureMin,
    WindSpeed,
    WindDirection,
    SkyCover,
}

impl Quantity {
    pub const ALL: [Quantity; 9] = [
        Quantity::AccumulationPrimary,
        Quantity::AccumulationSecondary,
        Quantity::Probability,
        Quantity::TemperatureHourly,
        Quantity::TemperatureMax,
        Quantity::TemperatureMin,
        Quantity::WindSpeed,
        Quantity::WindDirection,
        Quantity::SkyCover,
    ];
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quantity::AccumulationPrimary => "accumulation_primary",
            Quantity::AccumulationSecondary => "accumulation_secondary",
            Quantity::Probability => "probability",
            Quantity::TemperatureHourly => "temperature_hourly",
            Quantity::TemperatureMax => "temperature_max",
            Quantity::TemperatureMin => "temperature_min",
            Quantity::WindSpeed => "wind_speed",
            Quantity::WindDirection => "wind_direction",
            Quantity::SkyCover => "sky_cover",
        };
        write!(f, "{name}")
    }
}

/// Named set of series keyed by quantity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesBundle {
    series: BTreeMap<Quantity, Series>,
}

impl SeriesBundle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, replacing any existing series for `quantity`
    #[must_use]
    pub fn with(mut self, quantity: Quantity, series: Series) -> Self {
        self.insert(quantity, series);
        self
    }

    pub fn insert(&mut self, quantity: Quantity, series: Series) {
        self.series.insert(quantity, series);
    }

    #[must_use]
    pub fn get(&self, quantity: Quantity) -> Option<&Series> {
        self.series.get(&quantity)
    }

    /// Series for `quantity` if present and holding at least one point
    #[must_use]
    pub fn non_empty(&self, quantity: Quantity) -> Option<&Series> {
        self.get(quantity).filter(|series| !series.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Quantity, &Series)> {
        self.series.iter().map(|(quantity, series)| (*quantity, series))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.values().all(Series::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_effective_hours_floors_to_one() {
        assert_eq!(SeriesPoint::new(start(), 0.0, 1.0).effective_hours(), 1.0);
        assert_eq!(SeriesPoint::new(start(), -2.0, 1.0).effective_hours(), 1.0);
        assert_eq!(SeriesPoint::new(start(), f64::NAN, 1.0).effective_hours(), 1.0);
        assert_eq!(SeriesPoint::new(start(), 6.0, 1.0).effective_hours(), 6.0);
    }

    #[test]
    fn test_point_end() {
        let point = SeriesPoint::new(start(), 6.0, 1.0);
        assert_eq!(point.end(), Some(Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_point_end_out_of_range() {
        assert!(SeriesPoint::new(start(), 1e12, 1.0).end().is_none());
        assert!(SeriesPoint::new(start(), f64::MAX, 1.0).end().is_none());
    }

    #[test]
    fn test_bundle_non_empty() {
        let bundle = SeriesBundle::new()
            .with(Quantity::AccumulationPrimary, Series::default())
            .with(
                Quantity::AccumulationSecondary,
                Series::new(Unit::Millimeters, vec![SeriesPoint::new(start(), 1.0, 2.0)]),
            );

        assert!(bundle.get(Quantity::AccumulationPrimary).is_some());
        assert!(bundle.non_empty(Quantity::AccumulationPrimary).is_none());
        assert!(bundle.non_empty(Quantity::AccumulationSecondary).is_some());
        assert!(bundle.get(Quantity::SkyCover).is_none());
        assert!(!bundle.is_empty());
        assert!(SeriesBundle::new().is_empty());
    }

    #[test]
    fn test_quantity_display() {
        assert_eq!(Quantity::WindDirection.to_string(), "wind_direction");
        assert_eq!(Quantity::ALL.len(), 9);
    }
}
