//! storm_decluster — correlation-based declustering of storm-surge peaks
//! over threshold.
//!
//! Purpose
//! -------
//! Separate the threshold exceedances of a geophysical time series (e.g., a
//! storm-surge height record) into independent storm peaks and dependent
//! same-storm values, estimating the two characteristic time parameters —
//! the standard event duration (SED) and the separation margin (SM) —
//! directly from the data when they are not supplied. The retained peaks
//! are the input one would hand to a downstream extreme-value analysis;
//! this crate deliberately stops short of any distributional fitting.
//!
//! Key behaviors
//! -------------
//! - Re-export the two core subtrees as the public crate surface:
//!   [`series`] (validated datetime-indexed input containers and
//!   time-quantity parsing) and [`declustering`] (the extraction /
//!   clustering / estimation / merging pipeline).
//! - Keep the whole computation synchronous, deterministic, and free of
//!   I/O; the one tie-sensitive step is pinned to an earliest-timestamp
//!   rule.
//!
//! Conventions
//! -----------
//! - Timestamps are `chrono::DateTime<Utc>`; durations are
//!   `chrono::Duration`; SED and SM are fractional hours.
//! - Errors are typed per subtree (`SeriesError`, `DeclusterError`) and
//!   propagate with `?`; panics indicate programming errors only.
//!
//! Downstream usage
//! ----------------
//! - ```rust,ignore
//!   use storm_decluster::declustering::{decluster, DeclusterOptions, ThresholdSpec};
//!   use storm_decluster::series::SeriesFrame;
//!
//!   let frame = SeriesFrame::from_column("surge", index, heights)?;
//!   let options = DeclusterOptions::new().with_threshold(ThresholdSpec::Value(0.6));
//!   let outcome = decluster(&frame, &options)?;
//!   ```
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each module; the end-to-end scenarios are in
//!   `tests/integration_decluster_pipeline.rs`.

pub mod declustering;
pub mod series;
