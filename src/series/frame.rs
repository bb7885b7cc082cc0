//! series::frame — validated datetime-indexed value table.
//!
//! Purpose
//! -------
//! Provide the input container for the declustering stack: a table with a
//! strictly increasing datetime index and one or more named `f64` columns.
//! This type centralizes structural validation so downstream code can rely
//! on a sorted index and shape-consistent columns, and offers binary-search
//! range queries over the index instead of implicit label slicing.
//!
//! Key behaviors
//! -------------
//! - [`SeriesFrame::new`] validates the index/column structure once at
//!   construction time; [`SeriesFrame::from_column`] promotes a single
//!   series to a one-column frame.
//! - Column lookup by name with a typed error for unknown names; the first
//!   column acts as the default selection.
//! - [`SeriesFrame::range_positions`] resolves an inclusive timestamp window
//!   `[start, end]` to half-open positions via binary search.
//!
//! Invariants & assumptions
//! ------------------------
//! - Timestamps are strictly increasing (hence unique); the sampling grid is
//!   expected to be regular but gaps are tolerated.
//! - Every column has exactly as many values as the index has timestamps.
//! - Column names are unique and the column set is non-empty.
//! - Values may be NaN or ±∞; the frame performs no numeric filtering.
//!
//! Conventions
//! -----------
//! - Positions are 0-based; range queries return `(lo, hi)` with the match
//!   occupying `lo..hi`.
//! - The frame is immutable after construction; the declustering pipeline
//!   clones it into its outcome rather than mutating the caller's copy.
//!
//! Downstream usage
//! ----------------
//! - Construct a frame at the boundary where raw observations enter the
//!   crate, then pass it (by reference) to
//!   [`decluster`](crate::declustering::decluster).
//! - Window-content extraction in the clusterer resolves
//!   [`SeriesFrame::range_positions`] once per chosen peak and slices the
//!   selected column directly.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the construction error branches (no columns, length
//!   mismatch, duplicate names, non-monotonic index), column lookup, and
//!   range queries at and between grid points.

use crate::series::errors::{SeriesError, SeriesResult};
use chrono::{DateTime, Utc};

/// `SeriesFrame` — strictly increasing datetime index plus named columns.
///
/// Purpose
/// -------
/// Represent a single, validated observation table for declustering:
/// timestamps paired with one or more named value columns. The type
/// guarantees structural sanity (sorted unique index, shape-consistent
/// columns) but deliberately allows non-finite values, which the
/// declustering core tracks per event window.
///
/// Fields
/// ------
/// - `index`: strictly increasing timestamps.
/// - `columns`: `(name, values)` pairs, each value vector aligned with the
///   index.
///
/// Invariants
/// ----------
/// - `index[i] < index[i + 1]` for all consecutive positions.
/// - `columns` is non-empty, names are unique, and every value vector has
///   `index.len()` entries.
///
/// Performance
/// -----------
/// - Construction is O(n·k) for n timestamps and k columns (one scan each);
///   range queries are O(log n).
///
/// Notes
/// -----
/// - An empty frame (zero rows) is permitted as long as the column set is
///   well-formed; declustering then short-circuits to an empty outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesFrame {
    index: Vec<DateTime<Utc>>,
    columns: Vec<(String, Vec<f64>)>,
}

impl SeriesFrame {
    /// Construct a validated frame from an index and named columns.
    ///
    /// Parameters
    /// ----------
    /// - `index`: `Vec<DateTime<Utc>>`
    ///   Timestamps; must be strictly increasing.
    /// - `columns`: `Vec<(String, Vec<f64>)>`
    ///   Named value columns; non-empty, unique names, each aligned with the
    ///   index length.
    ///
    /// Returns
    /// -------
    /// `SeriesResult<SeriesFrame>`
    ///   - `Ok(frame)` when all structural invariants hold.
    ///   - `Err(SeriesError)` describing the first violated constraint.
    ///
    /// Errors
    /// ------
    /// - `SeriesError::NoColumns` when `columns` is empty.
    /// - `SeriesError::DuplicateColumn` when a name repeats.
    /// - `SeriesError::ColumnLengthMismatch` when a column's length differs
    ///   from the index length.
    /// - `SeriesError::NonMonotonicIndex` when a timestamp fails to exceed
    ///   its predecessor; the payload is the offending position.
    ///
    /// Panics
    /// ------
    /// - Never panics; all invalid inputs are reported via `SeriesError`.
    pub fn new(
        index: Vec<DateTime<Utc>>,
        columns: Vec<(String, Vec<f64>)>,
    ) -> SeriesResult<Self> {
        if columns.is_empty() {
            return Err(SeriesError::NoColumns);
        }
        for (position, pair) in columns.iter().enumerate() {
            if columns[..position].iter().any(|(name, _)| name == &pair.0) {
                return Err(SeriesError::DuplicateColumn { name: pair.0.clone() });
            }
            if pair.1.len() != index.len() {
                return Err(SeriesError::ColumnLengthMismatch {
                    name: pair.0.clone(),
                    expected: index.len(),
                    actual: pair.1.len(),
                });
            }
        }
        for (position, pair) in index.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(SeriesError::NonMonotonicIndex { position: position + 1 });
            }
        }
        Ok(SeriesFrame { index, columns })
    }

    /// Promote a single named series to a one-column frame.
    ///
    /// Mirrors the usual series-to-table promotion at the crate boundary;
    /// validation is identical to [`SeriesFrame::new`].
    pub fn from_column(
        name: impl Into<String>,
        index: Vec<DateTime<Utc>>,
        values: Vec<f64>,
    ) -> SeriesResult<Self> {
        SeriesFrame::new(index, vec![(name.into(), values)])
    }

    /// Number of rows (timestamps).
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the frame holds zero rows.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The timestamp index.
    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Name of the first (default) column.
    pub fn first_column(&self) -> &str {
        // Invariant: the column set is non-empty after construction.
        &self.columns[0].0
    }

    /// Values of the named column.
    ///
    /// Errors
    /// ------
    /// - `SeriesError::UnknownColumn` when no column carries `name`.
    pub fn column(&self, name: &str) -> SeriesResult<&[f64]> {
        self.columns
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, values)| values.as_slice())
            .ok_or_else(|| SeriesError::UnknownColumn { name: name.to_string() })
    }

    /// Half-open positions `(lo, hi)` covering the inclusive timestamp
    /// window `[start, end]`.
    ///
    /// Both bounds are resolved by binary search over the sorted index, so
    /// window edges that fall between grid points behave like label slicing
    /// on a sorted index: `lo..hi` is exactly the set of positions whose
    /// timestamp satisfies `start <= t <= end`.
    pub fn range_positions(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> (usize, usize) {
        let lo = self.index.partition_point(|t| *t < start);
        let hi = self.index.partition_point(|t| *t <= end);
        (lo, hi.max(lo))
    }
}
