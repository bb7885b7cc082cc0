//! declustering::exceedance — extraction of threshold-exceedance events.
//!
//! Purpose
//! -------
//! Scan the selected column of a series frame and collect every sample at or
//! above the threshold into an ordered, densely keyed table. The table is
//! the working set for both clustering passes: event ids are positions in
//! this table, not positions in the original frame.
//!
//! Key behaviors
//! -------------
//! - `value >= threshold` selection; NaN values never qualify, +∞ does.
//! - Chronological ordering inherited from the frame index; dense 0-based
//!   ids after the index reset.
//! - Binary-search range queries over the exceedance timestamps for window
//!   coverage during clustering.
//!
//! Conventions
//! -----------
//! - A NaN threshold (a propagated degenerate auto-threshold) selects
//!   nothing; the caller observes an empty table rather than an error.
//!
//! Testing notes
//! -------------
//! - Unit tests cover inclusive selection at the threshold, NaN exclusion,
//!   position bookkeeping, and the empty table for an all-below series.

use crate::declustering::errors::DeclusterResult;
use crate::series::frame::SeriesFrame;
use chrono::{DateTime, Utc};

/// `ExceedanceTable` — ordered events at or above the threshold.
///
/// Purpose
/// -------
/// Hold the peaks-over-threshold working set: for each qualifying sample,
/// its position in the original frame, its timestamp, and its magnitude.
/// Event ids used throughout clustering are positions in this table.
///
/// Invariants
/// ----------
/// - `positions`, `datetimes`, and `values` have equal lengths.
/// - `datetimes` is strictly increasing (inherited from the frame index).
/// - `values` contains no NaN (NaN never satisfies `>= threshold`).
#[derive(Debug, Clone, PartialEq)]
pub struct ExceedanceTable {
    positions: Vec<usize>,
    datetimes: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

impl ExceedanceTable {
    /// Extract all samples of `column` with value at or above `threshold`.
    ///
    /// Parameters
    /// ----------
    /// - `frame`: the validated input table.
    /// - `column`: name of the value column to scan.
    /// - `threshold`: inclusive lower bound; may be NaN, in which case the
    ///   table is empty.
    ///
    /// Returns
    /// -------
    /// `DeclusterResult<ExceedanceTable>`
    ///   - `Ok(table)` with the qualifying events in chronological order.
    ///   - `Err` only when the column does not exist (propagated from the
    ///     frame).
    pub fn extract(
        frame: &SeriesFrame,
        column: &str,
        threshold: f64,
    ) -> DeclusterResult<Self> {
        let values = frame.column(column)?;
        let index = frame.index();

        let mut table = ExceedanceTable {
            positions: Vec::new(),
            datetimes: Vec::new(),
            values: Vec::new(),
        };
        for (position, &value) in values.iter().enumerate() {
            if value >= threshold {
                table.positions.push(position);
                table.datetimes.push(index[position]);
                table.values.push(value);
            }
        }
        Ok(table)
    }

    /// Number of exceedance events.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no sample reached the threshold.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Frame positions of the events, by event id.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Event timestamps, by event id.
    pub fn datetimes(&self) -> &[DateTime<Utc>] {
        &self.datetimes
    }

    /// Event magnitudes, by event id.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Half-open id range `(lo, hi)` of events with timestamps inside the
    /// inclusive window `[start, end]`.
    pub(crate) fn range_ids(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> (usize, usize) {
        let lo = self.datetimes.partition_point(|t| *t < start);
        let hi = self.datetimes.partition_point(|t| *t <= end);
        (lo, hi.max(lo))
    }
}
