//! declustering — correlation-based POT declustering of storm-surge series.
//!
//! Purpose
//! -------
//! Provide the declustering core of the crate: exceedance extraction, the
//! iterative max-pick-and-flag window clusterer (run twice per invocation),
//! correlation-based estimation of the standard event duration (SED) and
//! separation margin (SM), the soft-margin merge filter over near-duplicate
//! peaks, and the outcome assembly with its enumerated artifact selector.
//!
//! Key behaviors
//! -------------
//! - Expose the whole procedure through one entry point, [`decluster`],
//!   configured by [`DeclusterOptions`] and returning a
//!   [`DeclusterOutcome`].
//! - Keep each stage independently usable: extraction
//!   ([`ExceedanceTable`]), clustering
//!   ([`cluster_exceedances`](clustering::cluster_exceedances)), estimation
//!   ([`estimate_parameters`](estimator::estimate_parameters)), and the
//!   merge filter ([`apply_soft_margin`](merge::apply_soft_margin)).
//! - Centralize error handling in [`DeclusterError`] / [`DeclusterResult`]
//!   and option guards in [`validate_options`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Every exceedance ends a clustering pass resolved, covered by exactly
//!   one independent event's symmetric window (itself, if independent).
//! - The computation is deterministic: the single tie-sensitive step
//!   (maximum selection) uses the documented earliest-timestamp rule.
//! - Each invocation works on its own copies: fresh per-event record maps
//!   per pass, and an outcome that never aliases the caller's frame.
//! - This subtree performs no I/O and no logging; callers orchestrate data
//!   loading and reporting. Failures are surfaced as [`DeclusterResult`];
//!   panics indicate programming errors such as arena indexing with an id
//!   the clusterer never issued.
//!
//! Conventions
//! -----------
//! - SED and SM are expressed in hours; clustering lags are half-windows
//!   (`SED / 2`, or half the estimation window on the first pass).
//! - Event ids are dense positions in the chronological exceedance table.
//! - Non-goals: no distributional fitting (e.g., GPD), no change-point
//!   detection, no multivariate modeling — this subtree only isolates
//!   independent peaks for such downstream analyses.
//!
//! Downstream usage
//! ----------------
//! - Typical end-to-end flow:
//!   1. Build a [`SeriesFrame`](crate::series::SeriesFrame) from timestamps
//!      and surge heights.
//!   2. Configure [`DeclusterOptions`] (threshold policy, estimation
//!      window, optional SED/SM).
//!   3. Call [`decluster`] and read `maxima`, `parameters`, and the
//!      per-event diagnostic map off the [`DeclusterOutcome`], or select a
//!      single artifact via [`Artifact`] / `named_artifact`.
//!
//! Testing notes
//! -------------
//! - Each module carries unit tests for its own stage; the scenario-level
//!   cases (pulse trains, estimation, merging, empty series) live in
//!   `tests/integration_decluster_pipeline.rs`.

pub mod clustering;
pub mod errors;
pub mod estimator;
pub mod exceedance;
pub mod merge;
pub mod options;
pub mod outcome;
pub mod pipeline;
pub mod records;
pub mod threshold;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::clustering::ClusterPass;
pub use self::errors::{DeclusterError, DeclusterResult};
pub use self::estimator::DeclusterParameters;
pub use self::exceedance::ExceedanceTable;
pub use self::merge::PeakRecord;
pub use self::options::DeclusterOptions;
pub use self::outcome::{Artifact, ArtifactView, DeclusterOutcome, Maxima};
pub use self::pipeline::decluster;
pub use self::records::{EventMap, EventRecord, Independence};
pub use self::threshold::ThresholdSpec;
pub use self::validation::validate_options;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use storm_decluster::declustering::prelude::*;
//
// to import the main declustering surface in a single line.

pub mod prelude {
    pub use super::{
        decluster, Artifact, DeclusterError, DeclusterOptions, DeclusterOutcome,
        DeclusterParameters, DeclusterResult, PeakRecord, ThresholdSpec,
    };
}
