//! Forecast aggregation module
//!
//! Turns irregular, variable-duration provider series into one summary row
//! per local calendar day:
//! - Time zone aware day bucketing
//! - Expansion of multi-hour readings into hourly slots
//! - Ordered accumulation fallback sources
//! - Circular statistics for wind direction
//! - The daily fold itself

pub mod aggregate;
pub mod bucket;
pub mod expand;
pub mod fallback;
pub mod wind;

// Re-export commonly used types from submodules
pub use aggregate::{DailyAggregator, aggregate_daily};
pub use bucket::{local_date, local_day_key, parse_time_zone};
pub use expand::{HourlySlot, expand_to_hourly_slots, slot_count, split_evenly, spread};
pub use fallback::{AccumulationChain, AccumulationSource, SelectedSource};
pub use wind::{VectorMean, cardinal_direction};
