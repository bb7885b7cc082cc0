//! declustering::errors — error types for the declustering core.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by the declustering
//! pipeline: option validation, threshold resolution, parameter estimation,
//! and artifact lookup. Series-layer failures are wrapped so the whole
//! pipeline propagates through a single error type.
//!
//! Key behaviors
//! -------------
//! - Define [`DeclusterResult`] and [`DeclusterError`] as the canonical
//!   result and error types for everything under `declustering`.
//! - Wrap [`SeriesError`] via a `From` implementation so `?` works across
//!   the subtree boundary.
//! - Attach human-readable `Display` messages to each variant.
//!
//! Invariants & assumptions
//! ------------------------
//! - Pipeline entry points validate user-facing inputs and return
//!   [`DeclusterResult<T>`] instead of panicking; panics indicate
//!   programming errors (e.g., arena indexing with an id the clusterer never
//!   issued).
//! - Error values are small and cloneable.
//!
//! Conventions
//! -----------
//! - Error messages are phrased in terms of domain constraints ("quantile
//!   level must lie in [0, 1]") rather than implementation details.
//! - There are no retries anywhere: every failure is terminal and
//!   caller-visible, and no partial results are returned on failure.
//!
//! Testing notes
//! -------------
//! - Unit tests verify `Display` payload embedding and the `From<SeriesError>`
//!   wrapping.

use crate::series::errors::SeriesError;

pub type DeclusterResult<T> = Result<T, DeclusterError>;

/// DeclusterError — error conditions for the declustering pipeline.
///
/// Variants
/// --------
/// - `Series(inner)`
///   A series-layer failure (frame structure, column lookup, timedelta
///   parsing, frequency resolution) surfaced through the pipeline.
/// - `InvalidQuantile { q }`
///   The auto-threshold quantile level is non-finite or outside `[0, 1]`.
/// - `InvalidThresholdValue { value }`
///   An explicit threshold value is non-finite.
/// - `InvalidParameter { name, value }`
///   A supplied SED or SM is non-finite or negative; `name` identifies
///   which.
/// - `InvalidEstimationWindow { seconds }`
///   The estimation window is zero or negative.
/// - `DegenerateCorrelation { events }`
///   The correlation statistics of the estimation pass contain no finite
///   entry, so no SED/SM can be derived (e.g., all event windows constant
///   or all-NaN).
/// - `UnknownArtifact { name }`
///   A named-artifact lookup used a name outside the fixed artifact set.
///
/// Notes
/// -----
/// - This enum implements [`std::error::Error`] and [`std::fmt::Display`]
///   for idiomatic `?`-based propagation.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclusterError {
    //------ Wrapped series-layer errors ------
    Series(SeriesError),
    //------ Option validation ------
    InvalidQuantile { q: f64 },
    InvalidThresholdValue { value: f64 },
    InvalidParameter { name: &'static str, value: f64 },
    InvalidEstimationWindow { seconds: i64 },
    //------ Estimation ------
    DegenerateCorrelation { events: usize },
    //------ Artifact lookup ------
    UnknownArtifact { name: String },
}

impl std::error::Error for DeclusterError {}

impl std::fmt::Display for DeclusterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclusterError::Series(inner) => write!(f, "{inner}"),
            DeclusterError::InvalidQuantile { q } => {
                write!(f, "Quantile level must be finite and lie in [0, 1]; got: {q}")
            }
            DeclusterError::InvalidThresholdValue { value } => {
                write!(f, "Explicit threshold must be finite; got: {value}")
            }
            DeclusterError::InvalidParameter { name, value } => {
                write!(f, "Parameter '{name}' must be finite and non-negative; got: {value}")
            }
            DeclusterError::InvalidEstimationWindow { seconds } => {
                write!(
                    f,
                    "Estimation window must be strictly positive; got {seconds} seconds."
                )
            }
            DeclusterError::DegenerateCorrelation { events } => {
                write!(
                    f,
                    "Correlation statistics over {events} independent events have no finite \
                     entry; SED/SM cannot be derived."
                )
            }
            DeclusterError::UnknownArtifact { name } => {
                write!(
                    f,
                    "Unknown artifact '{name}'; expected one of: series, maxima, threshold, \
                     parameters, records."
                )
            }
        }
    }
}

impl From<SeriesError> for DeclusterError {
    fn from(inner: SeriesError) -> DeclusterError {
        DeclusterError::Series(inner)
    }
}
