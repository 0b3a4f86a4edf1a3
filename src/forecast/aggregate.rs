//! Daily aggregation of sub-daily forecast series
//!
//! Every series in a [`SeriesBundle`] is expanded into hourly slots, each slot
//! is assigned to a local calendar day, and the per-field rules below fold
//! the slots into one [`DailyRecord`] per day:
//!
//! | Field | Rule |
//! |---|---|
//! | accumulation | sum of evenly split slot shares from the selected source |
//! | probability | maximum |
//! | temperature max/min | daily extremum series, else extremum of hourly temperature |
//! | wind speed | arithmetic mean |
//! | wind direction | vector mean weighted by the wind speed of the same slot |
//! | sky cover | arithmetic mean |

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, instrument};

use super::bucket::local_day_key;
use super::expand::{HourlySlot, split_evenly, spread};
use super::fallback::AccumulationChain;
use super::wind::VectorMean;
use crate::models::{DailyRecord, Quantity, Series, SeriesBundle, SeriesPoint};

/// Running totals for one local day
#[derive(Debug, Default)]
struct DayBucket {
    accumulation: Option<f64>,
    probability: Option<f64>,
    direct_max: Option<f64>,
    direct_min: Option<f64>,
    hourly_max: Option<f64>,
    hourly_min: Option<f64>,
    wind_speed: Mean,
    wind_direction: VectorMean,
    sky_cover: Mean,
}

#[derive(Debug, Default, Clone, Copy)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn value(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

fn fold_max(current: Option<f64>, value: f64) -> Option<f64> {
    Some(current.map_or(value, |c| c.max(value)))
}

fn fold_min(current: Option<f64>, value: f64) -> Option<f64> {
    Some(current.map_or(value, |c| c.min(value)))
}

/// Folds forecast series into local-day records
#[derive(Debug, Clone, Default)]
pub struct DailyAggregator {
    chain: AccumulationChain,
}

impl DailyAggregator {
    #[must_use]
    pub fn new(chain: AccumulationChain) -> Self {
        Self { chain }
    }

    #[must_use]
    pub fn chain(&self) -> &AccumulationChain {
        &self.chain
    }

    /// One record per local day that any consumed series reaches, ascending by date
    #[instrument(name = "aggregate_daily", level = "debug", skip(self, bundle))]
    pub fn aggregate(&self, bundle: &SeriesBundle, tz: Tz) -> Vec<DailyRecord> {
        let mut days: BTreeMap<String, DayBucket> = BTreeMap::new();

        let accumulation = self.chain.select(bundle);
        if let Some(selected) = &accumulation {
            let scale = selected.source.scale;
            for slot in canonical_slots(selected.series, split_evenly) {
                let bucket = day(&mut days, slot.instant, tz);
                bucket.accumulation = Some(bucket.accumulation.unwrap_or(0.0) + slot.value * scale);
            }
        }

        if let Some(series) = bundle.non_empty(Quantity::Probability) {
            for slot in canonical_slots(series, spread) {
                let bucket = day(&mut days, slot.instant, tz);
                bucket.probability = fold_max(bucket.probability, slot.value);
            }
        }

        // daily extremes are keyed by the start of their validity interval
        if let Some(series) = bundle.non_empty(Quantity::TemperatureMax) {
            for point in canonical_points(series) {
                let bucket = day(&mut days, point.start, tz);
                bucket.direct_max = fold_max(bucket.direct_max, point.value);
            }
        }
        if let Some(series) = bundle.non_empty(Quantity::TemperatureMin) {
            for point in canonical_points(series) {
                let bucket = day(&mut days, point.start, tz);
                bucket.direct_min = fold_min(bucket.direct_min, point.value);
            }
        }
        if let Some(series) = bundle.non_empty(Quantity::TemperatureHourly) {
            for slot in canonical_slots(series, spread) {
                let bucket = day(&mut days, slot.instant, tz);
                bucket.hourly_max = fold_max(bucket.hourly_max, slot.value);
                bucket.hourly_min = fold_min(bucket.hourly_min, slot.value);
            }
        }

        let mut speed_by_slot: HashMap<DateTime<Utc>, f64> = HashMap::new();
        if let Some(series) = bundle.non_empty(Quantity::WindSpeed) {
            for slot in canonical_slots(series, spread) {
                day(&mut days, slot.instant, tz).wind_speed.push(slot.value);
                speed_by_slot.insert(slot.instant, slot.value);
            }
        }
        if let Some(series) = bundle.non_empty(Quantity::WindDirection) {
            for slot in canonical_slots(series, spread) {
                let weight = speed_by_slot.get(&slot.instant).copied().unwrap_or(1.0);
                day(&mut days, slot.instant, tz)
                    .wind_direction
                    .push(slot.value, weight);
            }
        }

        if let Some(series) = bundle.non_empty(Quantity::SkyCover) {
            for slot in canonical_slots(series, spread) {
                day(&mut days, slot.instant, tz).sky_cover.push(slot.value);
            }
        }

        let (source_name, from_fallback) = accumulation
            .map(|selected| (Some(selected.source.name.clone()), selected.is_fallback))
            .unwrap_or((None, false));

        let records: Vec<DailyRecord> = days
            .into_iter()
            .map(|(date, bucket)| {
                let has_accumulation = bucket.accumulation.is_some();
                DailyRecord {
                    date,
                    accumulation_in: bucket.accumulation,
                    accumulation_source: source_name.clone().filter(|_| has_accumulation),
                    accumulation_from_fallback: from_fallback && has_accumulation,
                    probability_pct: bucket.probability,
                    temperature_max_f: bucket.direct_max.or(bucket.hourly_max),
                    temperature_min_f: bucket.direct_min.or(bucket.hourly_min),
                    wind_speed_mph: bucket.wind_speed.value(),
                    wind_direction_deg: bucket.wind_direction.mean(),
                    sky_cover_pct: bucket.sky_cover.value(),
                }
            })
            .collect();

        debug!(
            "Aggregated {} series into {} local days",
            bundle.iter().filter(|(_, series)| !series.is_empty()).count(),
            records.len()
        );
        records
    }
}

/// Aggregate with the standard accumulation chain
#[must_use]
pub fn aggregate_daily(bundle: &SeriesBundle, tz: Tz) -> Vec<DailyRecord> {
    DailyAggregator::default().aggregate(bundle, tz)
}

fn day(days: &mut BTreeMap<String, DayBucket>, instant: DateTime<Utc>, tz: Tz) -> &mut DayBucket {
    days.entry(local_day_key(instant, tz)).or_default()
}

/// Points with finite values, converted to canonical units
fn canonical_points(series: &Series) -> impl Iterator<Item = SeriesPoint> + '_ {
    series
        .points
        .iter()
        .filter(|point| point.value.is_finite())
        .map(|point| SeriesPoint {
            value: series.unit.to_canonical(point.value),
            ..*point
        })
}

fn canonical_slots<'a>(
    series: &'a Series,
    expand: fn(&SeriesPoint) -> Vec<HourlySlot>,
) -> impl Iterator<Item = HourlySlot> + 'a {
    canonical_points(series).flat_map(move |point| expand(&point))
}
