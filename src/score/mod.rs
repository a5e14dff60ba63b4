//! The scoring engine: pure transformations from raw series to scored
//! indicators, the weighted composite, and its classification.
//!
//! Nothing in here performs I/O or keeps state between cycles.

pub mod composite;
pub mod normalize;
pub mod status;

pub use composite::composite_index;
pub use normalize::{normalize_historical, normalize_observation, normalize_series};
pub use status::{classify_status, classify_trend_agreement};
