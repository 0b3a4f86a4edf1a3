//! Ordered accumulation sources
//!
//! Snowfall comes from the first source in the chain that has data. Each
//! source declares the scale applied after its values are converted to
//! inches, so a liquid-equivalent series can stand in for snow depth.

use serde::{Deserialize, Serialize};

use crate::models::{Quantity, Series, SeriesBundle};

/// Typical snow-to-liquid ratio for fresh snow
pub const DEFAULT_SNOW_TO_LIQUID_RATIO: f64 = 10.0;

/// A named accumulation source and its scale factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccumulationSource {
    pub name: String,
    pub quantity: Quantity,
    pub scale: f64,
}

impl AccumulationSource {
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: Quantity, scale: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            scale,
        }
    }
}

/// The source picked for one bundle
#[derive(Debug, Clone, Copy)]
pub struct SelectedSource<'a> {
    pub source: &'a AccumulationSource,
    pub series: &'a Series,
    /// Not the first source in the chain
    pub is_fallback: bool,
}

/// Sources evaluated in order, first non-empty series wins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccumulationChain {
    sources: Vec<AccumulationSource>,
}

impl AccumulationChain {
    #[must_use]
    pub fn new(sources: Vec<AccumulationSource>) -> Self {
        Self { sources }
    }

    /// Snowfall first, then liquid-equivalent precipitation times `snow_to_liquid_ratio`
    #[must_use]
    pub fn standard(snow_to_liquid_ratio: f64) -> Self {
        Self::new(vec![
            AccumulationSource::new("snowfall", Quantity::AccumulationPrimary, 1.0),
            AccumulationSource::new(
                "liquid_equivalent",
                Quantity::AccumulationSecondary,
                snow_to_liquid_ratio,
            ),
        ])
    }

    #[must_use]
    pub fn sources(&self) -> &[AccumulationSource] {
        &self.sources
    }

    /// First source whose series is present and non-empty
    #[must_use]
    pub fn select<'a>(&'a self, bundle: &'a SeriesBundle) -> Option<SelectedSource<'a>> {
        self.sources
            .iter()
            .enumerate()
            .find_map(|(index, source)| {
                bundle
                    .non_empty(source.quantity)
                    .map(|series| SelectedSource {
                        source,
                        series,
                        is_fallback: index > 0,
                    })
            })
    }
}

impl Default for AccumulationChain {
    fn default() -> Self {
        Self::standard(DEFAULT_SNOW_TO_LIQUID_RATIO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeriesPoint;
    use crate::units::Unit;
    use chrono::{TimeZone, Utc};

    fn series(value: f64) -> Series {
        let start = Utc.with_ymd_and_hms(2024, 1, 10, 18, 0, 0).unwrap();
        Series::new(Unit::Millimeters, vec![SeriesPoint::new(start, 1.0, value)])
    }

    #[test]
    fn test_primary_wins_when_present() {
        let chain = AccumulationChain::default();
        let bundle = SeriesBundle::new()
            .with(Quantity::AccumulationPrimary, series(10.0))
            .with(Quantity::AccumulationSecondary, series(2.0));

        let selected = chain.select(&bundle).unwrap();
        assert_eq!(selected.source.name, "snowfall");
        assert!(!selected.is_fallback);
    }

    #[test]
    fn test_empty_primary_falls_back() {
        let chain = AccumulationChain::standard(12.0);
        let bundle = SeriesBundle::new()
            .with(Quantity::AccumulationPrimary, Series::default())
            .with(Quantity::AccumulationSecondary, series(2.0));

        let selected = chain.select(&bundle).unwrap();
        assert_eq!(selected.source.name, "liquid_equivalent");
        assert_eq!(selected.source.scale, 12.0);
        assert!(selected.is_fallback);
    }

    #[test]
    fn test_nothing_to_select() {
        let chain = AccumulationChain::default();
        assert!(chain.select(&SeriesBundle::new()).is_none());
    }

    #[test]
    fn test_custom_chain_order() {
        let chain = AccumulationChain::new(vec![AccumulationSource::new(
            "liquid_only",
            Quantity::AccumulationSecondary,
            1.0,
        )]);
        let bundle = SeriesBundle::new()
            .with(Quantity::AccumulationPrimary, series(10.0))
            .with(Quantity::AccumulationSecondary, series(2.0));

        let selected = chain.select(&bundle).unwrap();
        assert_eq!(selected.source.name, "liquid_only");
        assert!(!selected.is_fallback);
        assert_eq!(chain.sources().len(), 1);
    }
}
