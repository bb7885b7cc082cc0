//! declustering::threshold — explicit vs. quantile-derived height thresholds.
//!
//! Purpose
//! -------
//! Make the threshold-defaulting path an explicit, separately testable mode:
//! either the caller states a literal height, or the threshold is derived as
//! a quantile of the non-negative samples of the selected column. Degenerate
//! derivations (no non-negative sample) yield NaN, which the extractor then
//! turns into an empty exceedance set; they are propagated, never raised.
//!
//! Conventions
//! -----------
//! - The quantile is taken over samples `>= 0`; NaN samples never qualify,
//!   +∞ does and propagates through the estimate.
//! - Quantile levels are validated by `validation::validate_options` before
//!   resolution; [`ThresholdSpec::resolve`] itself never fails.
//!
//! Testing notes
//! -------------
//! - Unit tests cover pass-through of explicit values, quantile endpoints,
//!   exclusion of negative and NaN samples, and the NaN result for an empty
//!   selection.

use statrs::statistics::{Data, OrderStatistics};

/// Threshold selection policy for exceedance extraction.
///
/// `Value` applies a literal height; `Quantile` derives the height from the
/// data as the given quantile of the column's non-negative samples. The
/// default derives the 99th-percentile surge height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdSpec {
    /// Literal threshold height.
    Value(f64),
    /// Quantile level in `[0, 1]` over the non-negative samples.
    Quantile(f64),
}

impl Default for ThresholdSpec {
    fn default() -> Self {
        ThresholdSpec::Quantile(0.99)
    }
}

impl ThresholdSpec {
    /// Resolve the policy against the selected column's values.
    ///
    /// Parameters
    /// ----------
    /// - `values`: `&[f64]`
    ///   The column to derive from; only consulted by `Quantile`.
    ///
    /// Returns
    /// -------
    /// `f64`
    ///   The threshold to apply. A `Quantile` over an empty non-negative
    ///   selection yields NaN; callers observe an empty exceedance set
    ///   rather than an error.
    ///
    /// Notes
    /// -----
    /// - Assumes option validation already accepted this policy (finite
    ///   explicit value, quantile level in `[0, 1]`).
    pub fn resolve(&self, values: &[f64]) -> f64 {
        match self {
            ThresholdSpec::Value(value) => *value,
            ThresholdSpec::Quantile(level) => {
                let non_negative: Vec<f64> =
                    values.iter().copied().filter(|value| *value >= 0.0).collect();
                if non_negative.is_empty() {
                    return f64::NAN;
                }
                let mut data = Data::new(non_negative);
                data.quantile(*level)
            }
        }
    }
}
