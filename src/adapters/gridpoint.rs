//! Gridded forecast documents
//!
//! Reads the layered gridpoint format where every quantity is an object
//! `{ "uom": "wmoUnit:…", "values": [{ "validTime": "<instant>/<duration>", "value": n }] }`
//! under `properties`, and maps the layers onto a [`SeriesBundle`].

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use crate::models::{Quantity, Series, SeriesBundle, SeriesPoint};
use crate::units::Unit;
use crate::{PowderdayError, Result};

const LAYERS: [(&str, Quantity); 9] = [
    ("snowfallAmount", Quantity::AccumulationPrimary),
    ("quantitativePrecipitation", Quantity::AccumulationSecondary),
    ("probabilityOfPrecipitation", Quantity::Probability),
    ("temperature", Quantity::TemperatureHourly),
    ("maxTemperature", Quantity::TemperatureMax),
    ("minTemperature", Quantity::TemperatureMin),
    ("windSpeed", Quantity::WindSpeed),
    ("windDirection", Quantity::WindDirection),
    ("skyCover", Quantity::SkyCover),
];

/// Bundle every known layer of a gridpoint document
pub fn bundle_from_gridpoint(document: &Value) -> Result<SeriesBundle> {
    let properties = document
        .get("properties")
        .filter(|properties| properties.is_object())
        .ok_or_else(|| PowderdayError::payload("gridpoint document has no 'properties' object"))?;

    let mut bundle = SeriesBundle::new();
    for (field, quantity) in LAYERS {
        if let Some(layer) = properties.get(field) {
            let series = series_from_layer(layer);
            debug!("Layer {} -> {}: {} points", field, quantity, series.points.len());
            bundle.insert(quantity, series);
        }
    }
    Ok(bundle)
}

/// One layer as a series; entries without a usable time or a numeric value are skipped
#[must_use]
pub fn series_from_layer(layer: &Value) -> Series {
    let unit = layer
        .get("uom")
        .and_then(Value::as_str)
        .map(Unit::from_wmo_code)
        .unwrap_or_default();
    let points = layer
        .get("values")
        .and_then(Value::as_array)
        .map(|values| values.iter().filter_map(point_from_value).collect())
        .unwrap_or_default();
    Series::new(unit, points)
}

fn point_from_value(entry: &Value) -> Option<SeriesPoint> {
    let (start, hours) = parse_valid_time(entry.get("validTime")?.as_str()?)?;
    let value = entry.get("value")?.as_f64()?;
    Some(SeriesPoint::new(start, hours, value))
}

/// Split `"2024-01-10T18:00:00+00:00/PT6H"` into start instant and hours
///
/// A missing or unsupported duration yields zero hours.
#[must_use]
pub fn parse_valid_time(valid_time: &str) -> Option<(DateTime<Utc>, f64)> {
    let (instant, duration) = match valid_time.split_once('/') {
        Some((instant, duration)) => (instant, Some(duration)),
        None => (valid_time, None),
    };
    let start = DateTime::parse_from_rfc3339(instant.trim())
        .ok()?
        .with_timezone(&Utc);
    Some((start, duration.map_or(0.0, parse_duration_hours)))
}

/// Hours in an ISO 8601 duration such as `PT6H`, `P1DT12H` or `PT0.5S`
///
/// Years and months have no fixed length, so they and any other unsupported
/// or malformed input return `0.0`.
#[must_use]
pub fn parse_duration_hours(duration: &str) -> f64 {
    iso_duration_hours(duration.trim())
        .filter(|hours| hours.is_finite() && *hours >= 0.0)
        .unwrap_or(0.0)
}

fn iso_duration_hours(duration: &str) -> Option<f64> {
    let rest = duration.strip_prefix('P')?;
    let (date_part, time_part) = match rest.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (rest, None),
    };

    let mut hours = 0.0;
    let mut components = 0;
    for (number, designator) in components_of(date_part)? {
        hours += match designator {
            'W' => number * 168.0,
            'D' => number * 24.0,
            _ => return None,
        };
        components += 1;
    }
    if let Some(time) = time_part {
        if time.is_empty() {
            return None;
        }
        for (number, designator) in components_of(time)? {
            hours += match designator {
                'H' => number,
                'M' => number / 60.0,
                'S' => number / 3600.0,
                _ => return None,
            };
            components += 1;
        }
    }
    (components > 0).then_some(hours)
}

fn components_of(part: &str) -> Option<Vec<(f64, char)>> {
    let mut components = Vec::new();
    let mut number = String::new();
    for c in part.chars() {
        match c {
            '0'..='9' | '.' => number.push(c),
            ',' => number.push('.'),
            designator => {
                components.push((number.parse::<f64>().ok()?, designator));
                number.clear();
            }
        }
    }
    number.is_empty().then_some(components)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("PT1H", 1.0)]
    #[case("PT6H", 6.0)]
    #[case("P1D", 24.0)]
    #[case("P1DT6H", 30.0)]
    #[case("P1W", 168.0)]
    #[case("PT30M", 0.5)]
    #[case("PT3S", 1.0 / 1200.0)]
    #[case("PT1,5H", 1.5)]
    #[case("P1M", 0.0)]
    #[case("P1Y", 0.0)]
    #[case("PT", 0.0)]
    #[case("P", 0.0)]
    #[case("6 hours", 0.0)]
    #[case("PTH", 0.0)]
    #[case("PT6", 0.0)]
    #[case("", 0.0)]
    fn test_parse_duration_hours(#[case] input: &str, #[case] expected: f64) {
        assert!((parse_duration_hours(input) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_parse_valid_time() {
        let (start, hours) = parse_valid_time("2024-01-10T18:00:00+00:00/PT6H").unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 1, 10, 18, 0, 0).unwrap());
        assert_eq!(hours, 6.0);

        let (start, hours) = parse_valid_time("2024-01-10T11:00:00-07:00/P2DT1H").unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 1, 10, 18, 0, 0).unwrap());
        assert_eq!(hours, 49.0);

        let (_, hours) = parse_valid_time("2024-01-10T18:00:00+00:00/P1M").unwrap();
        assert_eq!(hours, 0.0);

        assert!(parse_valid_time("yesterday/PT1H").is_none());
    }

    #[test]
    fn test_bundle_from_gridpoint() {
        let document = json!({
            "properties": {
                "updateTime": "2024-01-10T12:00:00+00:00",
                "snowfallAmount": {
                    "uom": "wmoUnit:mm",
                    "values": [
                        { "validTime": "2024-01-10T18:00:00+00:00/PT6H", "value": 25.4 },
                        { "validTime": "2024-01-11T00:00:00+00:00/PT6H", "value": null }
                    ]
                },
                "windSpeed": {
                    "uom": "wmoUnit:km_h-1",
                    "values": [{ "validTime": "2024-01-10T18:00:00+00:00/PT1H", "value": 16.0 }]
                },
                "weather": { "values": [] }
            }
        });

        let bundle = bundle_from_gridpoint(&document).unwrap();
        let snow = bundle.get(Quantity::AccumulationPrimary).unwrap();
        assert_eq!(snow.unit, Unit::Millimeters);
        assert_eq!(snow.points.len(), 1);
        assert_eq!(snow.points[0].duration_hours, 6.0);

        let wind = bundle.get(Quantity::WindSpeed).unwrap();
        assert_eq!(wind.unit, Unit::KilometersPerHour);
        assert!(bundle.get(Quantity::SkyCover).is_none());
    }

    #[test]
    fn test_document_without_properties() {
        let err = bundle_from_gridpoint(&json!({ "type": "Feature" })).unwrap_err();
        assert!(matches!(err, PowderdayError::Payload { .. }));
    }
}
