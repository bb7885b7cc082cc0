//! declustering::options — user-facing configuration of a declustering run.
//!
//! Purpose
//! -------
//! Bundle everything a caller may tune about the pipeline — column
//! selection, sampling-frequency policy, threshold policy, the estimation
//! window, and pre-known SED/SM — into one plain options struct with a
//! sensible [`Default`] and chainable setters.
//!
//! Conventions
//! -----------
//! - `None` fields mean "use the default path": the first column, and
//!   data-driven SED/SM estimation.
//! - Supplying only one of SED/SM still triggers estimation of both; the
//!   supplied value is superseded by the estimate (reference behavior).
//! - Options are validated once by `validation::validate_options` at the
//!   pipeline entry, not field-by-field in the setters.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the default configuration and the string-window
//!   setter's parse propagation.

use crate::declustering::threshold::ThresholdSpec;
use crate::series::frequency::{parse_timedelta, Frequency};
use crate::series::errors::SeriesResult;
use chrono::Duration;

/// `DeclusterOptions` — tunable inputs of the declustering pipeline.
///
/// Fields
/// ------
/// - `column`: value column to decluster; `None` selects the frame's first
///   column.
/// - `frequency`: sampling-interval policy (explicit or median-inferred).
/// - `threshold`: threshold policy; defaults to the 0.99 quantile of the
///   non-negative samples.
/// - `estimation_window`: full width of the sampling window used by the
///   estimation clustering pass; the pass runs with half this value as its
///   lag. Defaults to 6 days.
/// - `sed` / `sm`: pre-known standard event duration and separation margin
///   in hours. Estimation runs unless both are supplied.
///
/// Invariants
/// ----------
/// - Validated as a whole by `validate_options`: positive estimation
///   window, finite threshold value or in-range quantile level, and
///   finite non-negative SED/SM when supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclusterOptions {
    pub column: Option<String>,
    pub frequency: Frequency,
    pub threshold: ThresholdSpec,
    pub estimation_window: Duration,
    pub sed: Option<f64>,
    pub sm: Option<f64>,
}

impl Default for DeclusterOptions {
    fn default() -> Self {
        DeclusterOptions {
            column: None,
            frequency: Frequency::Infer,
            threshold: ThresholdSpec::default(),
            estimation_window: Duration::days(6),
            sed: None,
            sm: None,
        }
    }
}

impl DeclusterOptions {
    /// The default configuration (see the field docs).
    pub fn new() -> Self {
        DeclusterOptions::default()
    }

    /// Select the value column by name.
    pub fn with_column(mut self, name: impl Into<String>) -> Self {
        self.column = Some(name.into());
        self
    }

    /// Set the sampling-frequency policy.
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Set the threshold policy.
    pub fn with_threshold(mut self, threshold: ThresholdSpec) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the estimation window directly.
    pub fn with_estimation_window(mut self, window: Duration) -> Self {
        self.estimation_window = window;
        self
    }

    /// Set the estimation window from a timedelta string such as `"6d"`.
    ///
    /// Errors
    /// ------
    /// - Propagates `SeriesError::TimedeltaParse` for malformed strings.
    pub fn with_estimation_window_str(mut self, window: &str) -> SeriesResult<Self> {
        self.estimation_window = parse_timedelta(window)?;
        Ok(self)
    }

    /// Supply both parameters (hours), skipping estimation entirely.
    pub fn with_parameters(mut self, sed: f64, sm: f64) -> Self {
        self.sed = Some(sed);
        self.sm = Some(sm);
        self
    }

    /// Supply only the standard event duration (hours).
    pub fn with_sed(mut self, sed: f64) -> Self {
        self.sed = Some(sed);
        self
    }

    /// Supply only the separation margin (hours).
    pub fn with_sm(mut self, sm: f64) -> Self {
        self.sm = Some(sm);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::errors::SeriesError;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The default configuration values.
    // - Parse propagation through `with_estimation_window_str`.
    //
    // They intentionally DO NOT cover:
    // - Option validation rules (covered in `validation`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the documented defaults: first column, inferred frequency,
    // 0.99-quantile threshold, 6-day estimation window, no parameters.
    //
    // Given
    // -----
    // - `DeclusterOptions::new()`.
    //
    // Expect
    // ------
    // - Every field carries its default.
    fn options_default_matches_documented_configuration() {
        // Arrange / Act
        let options = DeclusterOptions::new();

        // Assert
        assert_eq!(options.column, None);
        assert_eq!(options.frequency, Frequency::Infer);
        assert_eq!(options.threshold, ThresholdSpec::Quantile(0.99));
        assert_eq!(options.estimation_window, Duration::days(6));
        assert_eq!(options.sed, None);
        assert_eq!(options.sm, None);
    }

    #[test]
    // Purpose
    // -------
    // Verify that the string setter parses well-formed windows and
    // propagates parse failures.
    //
    // Given
    // -----
    // - The strings "3d" and "3 fortnights".
    //
    // Expect
    // ------
    // - "3d" sets a 3-day window; "3 fortnights" yields `TimedeltaParse`.
    fn options_window_string_setter_parses_and_propagates_errors() {
        // Arrange / Act
        let parsed = DeclusterOptions::new().with_estimation_window_str("3d");
        let failed = DeclusterOptions::new().with_estimation_window_str("3 fortnights");

        // Assert
        assert_eq!(parsed.unwrap().estimation_window, Duration::days(3));
        match failed {
            Err(SeriesError::TimedeltaParse { .. }) => (),
            other => panic!("expected TimedeltaParse, got {other:?}"),
        }
    }
}
