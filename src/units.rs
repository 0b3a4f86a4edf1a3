//! Unit handling for provider series
//!
//! Providers report values in whatever unit they like. Every series carries
//! its [`Unit`], and the aggregator converts to the canonical units of
//! [`crate::models::DailyRecord`]: inches, degrees Fahrenheit, miles per hour,
//! percent and compass degrees.

use serde::{Deserialize, Serialize};

const MM_PER_INCH: f64 = 25.4;
const KMH_PER_MPH: f64 = 1.609_344;
const MS_PER_MPH: f64 = 0.447_04;
const KNOTS_PER_MPH: f64 = 0.868_976;

/// Unit attached to a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Millimeters,
    Centimeters,
    Meters,
    Inches,
    Celsius,
    Fahrenheit,
    KilometersPerHour,
    MetersPerSecond,
    MilesPerHour,
    Knots,
    Percent,
    Degrees,
    /// Unrecognized or dimensionless; values pass through untouched
    #[default]
    Unknown,
}

impl Unit {
    /// Parse a WMO unit code such as `wmoUnit:mm` or `wmoUnit:km_h-1`
    #[must_use]
    pub fn from_wmo_code(code: &str) -> Self {
        let code = code.trim();
        let code = code.strip_prefix("wmoUnit:").unwrap_or(code);
        match code {
            "mm" => Unit::Millimeters,
            "cm" => Unit::Centimeters,
            "m" => Unit::Meters,
            "in" => Unit::Inches,
            "degC" => Unit::Celsius,
            "degF" => Unit::Fahrenheit,
            "km_h-1" => Unit::KilometersPerHour,
            "m_s-1" => Unit::MetersPerSecond,
            "mi_h-1" => Unit::MilesPerHour,
            "kt" => Unit::Knots,
            "percent" => Unit::Percent,
            "degree_(angle)" => Unit::Degrees,
            other => {
                tracing::debug!("Unrecognized unit code '{}', passing values through", other);
                Unit::Unknown
            }
        }
    }

    /// Convert a value in this unit to the canonical unit of its dimension
    #[must_use]
    pub fn to_canonical(self, value: f64) -> f64 {
        match self {
            Unit::Millimeters => value / MM_PER_INCH,
            Unit::Centimeters => value * 10.0 / MM_PER_INCH,
            Unit::Meters => value * 1000.0 / MM_PER_INCH,
            Unit::Celsius => value * 9.0 / 5.0 + 32.0,
            Unit::KilometersPerHour => value / KMH_PER_MPH,
            Unit::MetersPerSecond => value / MS_PER_MPH,
            Unit::Knots => value / KNOTS_PER_MPH,
            Unit::Inches
            | Unit::Fahrenheit
            | Unit::MilesPerHour
            | Unit::Percent
            | Unit::Degrees
            | Unit::Unknown => value,
        }
    }
}
