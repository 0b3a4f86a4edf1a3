//! Avalanche zone resolution
//!
//! [`resolver`] holds the stateless queries over a slice of regions;
//! [`index`] wraps an owned zone set behind the same queries.

pub mod index;
pub mod resolver;

pub use index::RegionIndex;
pub use resolver::{nearby_regions, region_contains, resolve_region};
