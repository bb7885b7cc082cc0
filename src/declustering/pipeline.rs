//! declustering::pipeline — the run-to-completion declustering driver.
//!
//! Purpose
//! -------
//! Wire the declustering components into the single entry point of the
//! crate: validate options, resolve the sampling frequency and the
//! threshold, extract exceedances, estimate SED/SM when they are not
//! supplied, run the final clustering pass, apply the soft-margin merge
//! filter, and assemble the outcome.
//!
//! Key behaviors
//! -------------
//! - Control flow: extract → (if SED or SM missing) estimation clustering +
//!   correlation estimation → final clustering with `lag = SED / 2` → merge
//!   filter → outcome assembly.
//! - The estimation pass runs with half the estimation window as its lag
//!   and is never memoized with the final pass: even caller-supplied
//!   parameters get a fresh final pass, since the lags differ.
//! - Supplying only one of SED/SM triggers estimation of both; the
//!   supplied value is superseded (reference behavior).
//! - An empty exceedance table short-circuits: zero clustering iterations,
//!   `None` maxima, an empty diagnostic map, and parameters equal to the
//!   supplied values or NaN.
//!
//! Invariants & assumptions
//! ------------------------
//! - The computation is synchronous, single-threaded, and free of I/O; the
//!   caller's frame is never mutated (the outcome carries a fresh copy).
//! - Determinism: with identical inputs the partition is identical; the
//!   only tie-sensitive step (maximum selection) uses the documented
//!   earliest-wins rule.
//! - The loop count of each clustering pass is bounded by the exceedance
//!   count; there are no retries and no partial results on failure.
//!
//! Downstream usage
//! ----------------
//! - ```rust,ignore
//!   use storm_decluster::declustering::{decluster, DeclusterOptions};
//!
//!   let outcome = decluster(&frame, &DeclusterOptions::new())?;
//!   ```
//!
//! Testing notes
//! -------------
//! - Unit tests cover the supplied-parameter path, default column
//!   selection, the empty-exceedance short-circuit, and final-pass
//!   idempotence. Scenario-level behavior (pulse trains, estimation,
//!   merging) lives in the integration tests.

use crate::declustering::clustering::cluster_exceedances;
use crate::declustering::errors::DeclusterResult;
use crate::declustering::estimator::{estimate_parameters, DeclusterParameters};
use crate::declustering::exceedance::ExceedanceTable;
use crate::declustering::merge::{apply_soft_margin, build_peaks};
use crate::declustering::options::DeclusterOptions;
use crate::declustering::outcome::DeclusterOutcome;
use crate::declustering::records::EventMap;
use crate::declustering::validation::validate_options;
use crate::series::frame::SeriesFrame;
use crate::series::frequency::duration_from_hours;
use std::collections::BTreeMap;

/// Decluster a storm-surge series into independent peaks over threshold.
///
/// Parameters
/// ----------
/// - `frame`: validated input table; the selected column may contain NaN
///   and ±∞ values.
/// - `options`: column, frequency, threshold, estimation window, and
///   optional pre-known SED/SM (hours).
///
/// Returns
/// -------
/// `DeclusterResult<DeclusterOutcome>`
///   - `Ok(outcome)` carrying the five artifacts plus the peak table and
///     resolved frequency.
///   - `Err(DeclusterError)` on invalid options, unknown columns,
///     unresolvable frequencies, or degenerate correlation statistics.
///
/// Errors
/// ------
/// - Everything produced by `validate_options`, frequency resolution,
///   column lookup, and `estimate_parameters`; see
///   [`DeclusterError`](crate::declustering::errors::DeclusterError).
///
/// Notes
/// -----
/// - A NaN threshold (degenerate quantile derivation) is not an error: it
///   selects no exceedances and the outcome reports `None` maxima with the
///   NaN threshold, for the caller to inspect.
pub fn decluster(
    frame: &SeriesFrame,
    options: &DeclusterOptions,
) -> DeclusterResult<DeclusterOutcome> {
    validate_options(options)?;

    let frequency = options.frequency.resolve(frame.index())?;
    let column = match &options.column {
        Some(name) => name.clone(),
        None => frame.first_column().to_string(),
    };
    let values = frame.column(&column)?;
    let threshold = options.threshold.resolve(values);

    let table = ExceedanceTable::extract(frame, &column, threshold)?;
    if table.is_empty() {
        return Ok(DeclusterOutcome {
            series: frame.clone(),
            maxima: None,
            threshold,
            parameters: DeclusterParameters::new(
                options.sed.unwrap_or(f64::NAN),
                options.sm.unwrap_or(f64::NAN),
            ),
            records: EventMap::empty(),
            peaks: Vec::new(),
            frequency,
        });
    }

    let parameters = match (options.sed, options.sm) {
        (Some(sed), Some(sm)) => DeclusterParameters::new(sed, sm),
        _ => {
            let estimation_lag = options.estimation_window / 2;
            let estimation_pass = cluster_exceedances(&table, frame, &column, estimation_lag)?;
            estimate_parameters(&estimation_pass)?
        }
    };

    let lag = duration_from_hours(parameters.sed)? / 2;
    let final_pass = cluster_exceedances(&table, frame, &column, lag)?;

    let mut peaks = build_peaks(&table, &final_pass.selection, lag);
    apply_soft_margin(&mut peaks, parameters.sm);

    let surviving: BTreeMap<_, _> = peaks
        .iter()
        .filter(|peak| peak.flag.is_none())
        .map(|peak| (peak.datetime, peak.maxima))
        .collect();
    let maxima = if surviving.is_empty() { None } else { Some(surviving) };

    Ok(DeclusterOutcome {
        series: frame.clone(),
        maxima,
        threshold,
        parameters,
        records: final_pass.records,
        peaks,
        frequency,
    })
}
