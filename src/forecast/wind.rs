//! Circular statistics for wind direction
//!
//! Directions are meteorological "from" bearings in degrees (0 = wind from
//! the north). Averages are taken over the resultant vector, never over the
//! raw numbers, so 350° and 10° average to 0° rather than 180°.

/// Resultant magnitude below which the mean direction is undefined
const ZERO_RESULTANT: f64 = 1e-9;

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Weighted vector-mean accumulator
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VectorMean {
    sum_sin: f64,
    sum_cos: f64,
    samples: usize,
}

impl VectorMean {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one bearing with the given weight (typically the wind speed)
    pub fn push(&mut self, direction_deg: f64, weight: f64) {
        if !direction_deg.is_finite() || !weight.is_finite() {
            return;
        }
        let radians = direction_deg.to_radians();
        self.sum_sin += radians.sin() * weight;
        self.sum_cos += radians.cos() * weight;
        self.samples += 1;
    }

    #[must_use]
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Mean bearing in `[0, 360)`, `None` when the resultant vanishes
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        if self.sum_sin.hypot(self.sum_cos) < ZERO_RESULTANT {
            return None;
        }
        let degrees = self.sum_sin.atan2(self.sum_cos).to_degrees().rem_euclid(360.0);
        // rem_euclid can round up to exactly 360.0 for tiny negative angles
        Some(if degrees >= 360.0 { 0.0 } else { degrees })
    }
}

/// 16-point compass label for a bearing
#[must_use]
pub fn cardinal_direction(degrees: f64) -> &'static str {
    let index = (degrees.rem_euclid(360.0) / 22.5).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}
