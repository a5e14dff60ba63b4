//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the five indicator roles and their fixed metadata (`SeriesRole`)
//! - raw wire shapes as received from the providers (`RawSeries` and friends)
//! - normalized scoring outputs (`IndicatorResult`, `IndicatorSet`)
//! - composite classification (`StatusBand`, `TrendAgreement`)

pub mod types;

pub use types::*;
