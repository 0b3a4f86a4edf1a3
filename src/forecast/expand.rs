//! Expansion of interval readings into hourly slots
//!
//! A reading valid for several hours is represented as one slot per whole
//! hour from its start, so each slot can land in its own local day.
//! Accumulated quantities are split evenly across slots; this ignores how
//! much of a fractional final hour the interval actually covers.

use chrono::{DateTime, Duration, Utc};

use crate::models::SeriesPoint;

/// Upper bound on slots per reading (one leap year of hours)
pub const MAX_SLOTS: usize = 24 * 366;

/// One hourly share of a reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlySlot {
    pub instant: DateTime<Utc>,
    pub value: f64,
}

/// Number of hourly slots a reading spans, at least one
#[must_use]
pub fn slot_count(point: &SeriesPoint) -> usize {
    (point.effective_hours().round() as usize).clamp(1, MAX_SLOTS)
}

/// Slot start instants in `[start, start + round(duration_hours))`
#[must_use]
pub fn expand_to_hourly_slots(point: &SeriesPoint) -> Vec<DateTime<Utc>> {
    (0..slot_count(point))
        .map(|hour| point.start + Duration::hours(hour as i64))
        .collect()
}

/// Each slot receives `value / slots`, for accumulated quantities
#[must_use]
pub fn split_evenly(point: &SeriesPoint) -> Vec<HourlySlot> {
    let slots = expand_to_hourly_slots(point);
    let share = point.value / slots.len() as f64;
    slots
        .into_iter()
        .map(|instant| HourlySlot {
            instant,
            value: share,
        })
        .collect()
}

/// Each slot repeats the full value, for rates, percentages and angles
#[must_use]
pub fn spread(point: &SeriesPoint) -> Vec<HourlySlot> {
    expand_to_hourly_slots(point)
        .into_iter()
        .map(|instant| HourlySlot {
            instant,
            value: point.value,
        })
        .collect()
}
