//! declustering::clustering — the iterative max-pick-and-flag window loop.
//!
//! Purpose
//! -------
//! Partition a set of threshold exceedances into independent storm peaks and
//! their dependents for a given half-window lag. This single routine is the
//! heart of the declustering procedure and runs twice per pipeline
//! invocation: once with the estimation half-window to feed the correlation
//! estimator, and once with `lag = SED / 2` to produce the definitive
//! partition.
//!
//! Key behaviors
//! -------------
//! - Repeatedly select the unresolved exceedance with the largest magnitude,
//!   mark it independent, build the symmetric window
//!   `[datetime − lag, datetime + lag]`, and mark every *unresolved*
//!   exceedance inside that window as dependent on it.
//! - Record, per independent peak, the original-series values inside its
//!   window together with NaN/Inf presence flags.
//! - Return the full per-event record map plus the ordered list of
//!   independent ids in selection order (descending magnitude, not
//!   chronological).
//!
//! Invariants & assumptions
//! ------------------------
//! - Ties in the maximum selection are broken by first occurrence in the
//!   chronological exceedance table, i.e. the earliest timestamp wins. This
//!   is the documented reproducibility rule; there is no other source of
//!   nondeterminism in the pipeline.
//! - Each iteration resolves at least the chosen maximum itself, so the
//!   unresolved set strictly shrinks and the loop terminates within
//!   `table.len()` iterations.
//! - Only unresolved events are marked dependent, so every exceedance is
//!   covered by exactly one independent event's window (itself, if
//!   independent): the union of all `events` sets plus the selection equals
//!   the full id range with no overlaps.
//!
//! Conventions
//! -----------
//! - Window bounds are inclusive on both sides; the chosen event itself is
//!   excluded from its own `events` set.
//! - Exceedance magnitudes contain no NaN (extraction guarantees it), so
//!   the maximum scan needs no NaN handling.
//!
//! Downstream usage
//! ----------------
//! - The estimation pass feeds [`ClusterPass`] into
//!   [`estimate_parameters`](crate::declustering::estimator::estimate_parameters);
//!   the final pass feeds it into the merge filter and the outcome assembly.
//!
//! Testing notes
//! -------------
//! - Unit tests cover selection order, window coverage, the exact-partition
//!   property, the earliest-wins tie-break, NaN/Inf window flags, and the
//!   zero-iteration behavior on an empty table.

use crate::declustering::errors::DeclusterResult;
use crate::declustering::exceedance::ExceedanceTable;
use crate::declustering::records::{EventMap, Independence};
use crate::series::frame::SeriesFrame;
use chrono::Duration;

/// `ClusterPass` — the outcome of one window-clustering pass.
///
/// Fields
/// ------
/// - `records`: per-event diagnostic map; every record resolved.
/// - `selection`: ids of the independent peaks in selection order
///   (descending magnitude; earliest timestamp first among ties).
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterPass {
    pub records: EventMap,
    pub selection: Vec<usize>,
}

/// Run one clustering pass over the exceedance table.
///
/// Parameters
/// ----------
/// - `table`: chronological exceedance events (dense ids).
/// - `frame`: the original series, consulted for window contents.
/// - `column`: the value column windows are extracted from.
/// - `lag`: half-width of the symmetric window around each chosen peak.
///
/// Returns
/// -------
/// `DeclusterResult<ClusterPass>`
///   - `Ok(pass)` with every event resolved and the selection in
///     descending-magnitude order.
///   - `Err` only when the column does not exist (propagated from the
///     frame).
///
/// Panics
/// ------
/// - Never panics for ids issued by this routine; arena indexing is bounded
///   by construction.
pub fn cluster_exceedances(
    table: &ExceedanceTable,
    frame: &SeriesFrame,
    column: &str,
    lag: Duration,
) -> DeclusterResult<ClusterPass> {
    let series_values = frame.column(column)?;
    let magnitudes = table.values();

    let mut records = EventMap::for_table(table);
    let mut unresolved = vec![true; table.len()];
    let mut remaining = table.len();
    let mut selection = Vec::new();

    while remaining > 0 {
        // Largest unresolved magnitude; strict `>` keeps the first
        // occurrence, i.e. the earliest timestamp.
        let mut chosen = usize::MAX;
        for id in 0..table.len() {
            if unresolved[id] && (chosen == usize::MAX || magnitudes[id] > magnitudes[chosen]) {
                chosen = id;
            }
        }
        if chosen == usize::MAX {
            break;
        }

        let datetime = table.datetimes()[chosen];
        let start = datetime - lag;
        let end = datetime + lag;

        let (window_lo, window_hi) = frame.range_positions(start, end);
        let window = &series_values[window_lo..window_hi];

        let (id_lo, id_hi) = table.range_ids(start, end);
        let mut covered = Vec::new();
        for id in id_lo..id_hi {
            if id != chosen && unresolved[id] {
                covered.push(id);
            }
        }

        for &id in &covered {
            let record = &mut records[id];
            record.independence = Independence::Dependent;
            record.parent = Some(chosen);
            unresolved[id] = false;
        }
        remaining -= covered.len();

        let record = &mut records[chosen];
        record.independence = Independence::Independent;
        record.start = Some(start);
        record.end = Some(end);
        record.data = window.to_vec();
        record.has_nan = window.iter().any(|value| value.is_nan());
        record.has_inf = window.iter().any(|value| value.is_infinite());
        record.events = covered;
        unresolved[chosen] = false;
        remaining -= 1;

        selection.push(chosen);
    }

    Ok(ClusterPass { records, selection })
}
