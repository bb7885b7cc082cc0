//! declustering::validation — input guards for the pipeline entry point.
//!
//! Purpose
//! -------
//! Centralize the user-facing precondition checks of a declustering run so
//! the pipeline can assume clean options after a single call. This mirrors
//! the crate-wide convention of validating once at the boundary and
//! propagating typed errors instead of panicking.
//!
//! Invariants & assumptions
//! ------------------------
//! - The estimation window must be strictly positive.
//! - An explicit threshold value must be finite; a quantile level must be
//!   finite and lie in `[0, 1]`.
//! - Supplied SED/SM values must be finite and non-negative (zero is legal:
//!   a zero SED makes every exceedance its own peak, a zero SM disables the
//!   merge filter).
//!
//! Conventions
//! -----------
//! - This module is purely about *validation*; it performs no I/O and does
//!   not allocate beyond error construction.
//! - Column existence is not checked here: the frame reports
//!   `UnknownColumn` at lookup time, and the default column never fails.
//!
//! Testing notes
//! -------------
//! - Unit tests cover a success path and every error branch of
//!   [`validate_options`].

use crate::declustering::errors::{DeclusterError, DeclusterResult};
use crate::declustering::options::DeclusterOptions;
use crate::declustering::threshold::ThresholdSpec;
use chrono::Duration;

/// Validate basic constraints on the pipeline options.
///
/// Parameters
/// ----------
/// - `options`: the full options bundle to check.
///
/// Returns
/// -------
/// `DeclusterResult<()>`
///   - `Ok(())` if all constraints are satisfied.
///   - `Err(DeclusterError)` identifying the first violated constraint.
///
/// Errors
/// ------
/// - `DeclusterError::InvalidEstimationWindow` for a zero or negative
///   window.
/// - `DeclusterError::InvalidThresholdValue` for a non-finite explicit
///   threshold.
/// - `DeclusterError::InvalidQuantile` for a quantile level that is
///   non-finite or outside `[0, 1]`.
/// - `DeclusterError::InvalidParameter` for a supplied SED or SM that is
///   non-finite or negative; the payload names which parameter failed.
///
/// Panics
/// ------
/// - Never panics. All failures are reported via `DeclusterError`.
pub fn validate_options(options: &DeclusterOptions) -> DeclusterResult<()> {
    if options.estimation_window <= Duration::zero() {
        return Err(DeclusterError::InvalidEstimationWindow {
            seconds: options.estimation_window.num_seconds(),
        });
    }

    match options.threshold {
        ThresholdSpec::Value(value) if !value.is_finite() => {
            return Err(DeclusterError::InvalidThresholdValue { value });
        }
        ThresholdSpec::Quantile(level) if !level.is_finite() || !(0.0..=1.0).contains(&level) => {
            return Err(DeclusterError::InvalidQuantile { q: level });
        }
        _ => {}
    }

    for (name, supplied) in [("sed", options.sed), ("sm", options.sm)] {
        if let Some(value) = supplied {
            if !value.is_finite() || value < 0.0 {
                return Err(DeclusterError::InvalidParameter { name, value });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declustering::threshold::ThresholdSpec;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Successful validation of the default options and a fully specified
    //   configuration.
    // - Each error branch: non-positive window, non-finite threshold value,
    //   out-of-range quantile, and invalid SED/SM.
    //
    // They intentionally DO NOT cover:
    // - Behavior of the validated values inside the pipeline.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that the default options and a fully specified, well-formed
    // configuration both validate.
    //
    // Given
    // -----
    // - `DeclusterOptions::new()` and a configuration with explicit
    //   threshold and parameters (including legal zeros).
    //
    // Expect
    // ------
    // - Both return `Ok(())`.
    fn validate_options_accepts_default_and_explicit_configurations() {
        // Arrange
        let default = DeclusterOptions::new();
        let explicit = DeclusterOptions::new()
            .with_threshold(ThresholdSpec::Value(1.5))
            .with_parameters(0.0, 0.0);

        // Act / Assert
        assert!(validate_options(&default).is_ok());
        assert!(validate_options(&explicit).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Ensure a non-positive estimation window is rejected.
    //
    // Given
    // -----
    // - A zero-width estimation window.
    //
    // Expect
    // ------
    // - `Err(DeclusterError::InvalidEstimationWindow { seconds: 0 })`.
    fn validate_options_rejects_non_positive_window() {
        // Arrange
        let options = DeclusterOptions::new().with_estimation_window(Duration::zero());

        // Act
        let result = validate_options(&options);

        // Assert
        match result {
            Err(DeclusterError::InvalidEstimationWindow { seconds: 0 }) => (),
            other => panic!("expected InvalidEstimationWindow, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure threshold policies are validated: non-finite explicit values
    // and out-of-range quantile levels are rejected.
    //
    // Given
    // -----
    // - `Value(NaN)` and `Quantile(1.2)`.
    //
    // Expect
    // ------
    // - `InvalidThresholdValue` and `InvalidQuantile` respectively.
    fn validate_options_rejects_bad_threshold_policies() {
        // Arrange
        let nan_value = DeclusterOptions::new().with_threshold(ThresholdSpec::Value(f64::NAN));
        let bad_level = DeclusterOptions::new().with_threshold(ThresholdSpec::Quantile(1.2));

        // Act / Assert
        match validate_options(&nan_value) {
            Err(DeclusterError::InvalidThresholdValue { .. }) => (),
            other => panic!("expected InvalidThresholdValue, got {other:?}"),
        }
        match validate_options(&bad_level) {
            Err(DeclusterError::InvalidQuantile { q }) => assert_eq!(q, 1.2),
            other => panic!("expected InvalidQuantile, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure supplied parameters are validated and the error names the
    // offending one.
    //
    // Given
    // -----
    // - A negative SED, and separately an infinite SM.
    //
    // Expect
    // ------
    // - `InvalidParameter` naming "sed" and "sm" respectively.
    fn validate_options_rejects_invalid_supplied_parameters() {
        // Arrange
        let negative_sed = DeclusterOptions::new().with_sed(-4.0);
        let infinite_sm = DeclusterOptions::new().with_sm(f64::INFINITY);

        // Act / Assert
        match validate_options(&negative_sed) {
            Err(DeclusterError::InvalidParameter { name: "sed", value }) => {
                assert_eq!(value, -4.0);
            }
            other => panic!("expected InvalidParameter for sed, got {other:?}"),
        }
        match validate_options(&infinite_sm) {
            Err(DeclusterError::InvalidParameter { name: "sm", .. }) => (),
            other => panic!("expected InvalidParameter for sm, got {other:?}"),
        }
    }
}
