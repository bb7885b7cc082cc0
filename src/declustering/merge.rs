//! declustering::merge — the soft-margin filter over independent peaks.
//!
//! Purpose
//! -------
//! Remove near-duplicate storms that the final clustering pass left as
//! separate peaks: peaks whose windows end up closer than the separation
//! margin are compared and all but the largest in each close sub-range are
//! flagged for discard. This is the last transformation before the outcome
//! is assembled.
//!
//! Key behaviors
//! -------------
//! - [`build_peaks`] turns the final pass's selection into a chronological
//!   [`PeakRecord`] table and computes the inter-window gap to each next
//!   peak in hours (`None` sentinel on the last peak).
//! - [`apply_soft_margin`] marks peaks "close" when their gap is at most
//!   `SM − 1` hours, then, for every chronologically adjacent pair of close
//!   peaks, flags every peak in the inclusive sub-range except the one with
//!   the maximum magnitude (first occurrence wins on ties).
//!
//! Invariants & assumptions
//! ------------------------
//! - Within any maximal run of consecutive close peaks, exactly one peak
//!   survives (the maximum); isolated peaks always survive.
//! - The gap is measured between window edges, `(t_next − lag) − (t + lag)`,
//!   so it can be negative when adjacent windows overlap.
//! - The `− 1` hour slack on the margin boundary is part of the procedure's
//!   definition, not an implementation detail.
//!
//! Conventions
//! -----------
//! - `flag == None` means retained; `flag == Some(false)` means discarded.
//!   Flags are only ever set by this module and only to `Some(false)`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover chronological ordering and gap bookkeeping, the
//!   isolated-peak guarantee, max-retention within a close pair and a close
//!   run, and the inactive filter for sub-two close sets.

use crate::declustering::exceedance::ExceedanceTable;
use crate::series::frequency::hours_between;
use chrono::{DateTime, Duration, Utc};

/// `PeakRecord` — one independent peak of the final declustered table.
///
/// Fields
/// ------
/// - `datetime` / `maxima`: the peak's timestamp and magnitude.
/// - `gap_hours`: hours between this peak's window end and the next peak's
///   window start; `None` on the chronologically last peak.
/// - `flag`: `None` while retained, `Some(false)` once discarded by the
///   soft-margin filter.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakRecord {
    pub datetime: DateTime<Utc>,
    pub maxima: f64,
    pub gap_hours: Option<f64>,
    pub flag: Option<bool>,
}

/// Build the chronological peak table from a final-pass selection.
///
/// Parameters
/// ----------
/// - `table`: the exceedance table the selection indexes into.
/// - `selection`: independent event ids in selection order.
/// - `lag`: the final clustering half-window, used for the window-edge gap.
///
/// Returns
/// -------
/// Chronologically sorted peaks with `gap_hours` filled in and all flags
/// unset.
pub fn build_peaks(
    table: &ExceedanceTable,
    selection: &[usize],
    lag: Duration,
) -> Vec<PeakRecord> {
    let mut peaks: Vec<PeakRecord> = selection
        .iter()
        .map(|&id| PeakRecord {
            datetime: table.datetimes()[id],
            maxima: table.values()[id],
            gap_hours: None,
            flag: None,
        })
        .collect();
    peaks.sort_by_key(|peak| peak.datetime);

    for position in 0..peaks.len().saturating_sub(1) {
        let window_end = peaks[position].datetime + lag;
        let next_window_start = peaks[position + 1].datetime - lag;
        peaks[position].gap_hours = Some(hours_between(window_end, next_window_start));
    }
    peaks
}

/// Apply the soft-margin filter in place.
///
/// Peaks whose `gap_hours` is at most `sm − 1` form the close set; for each
/// chronologically adjacent pair of close peaks, every peak in the inclusive
/// sub-range except the maximum-magnitude one is flagged `Some(false)`.
/// Ties keep the earliest peak, matching the clusterer's selection order.
pub fn apply_soft_margin(peaks: &mut [PeakRecord], sm: f64) {
    let margin = sm - 1.0;
    let close: Vec<usize> = peaks
        .iter()
        .enumerate()
        .filter(|(_, peak)| peak.gap_hours.is_some_and(|gap| gap <= margin))
        .map(|(position, _)| position)
        .collect();

    for pair in close.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        let mut keep = lo;
        for position in lo..=hi {
            if peaks[position].maxima > peaks[keep].maxima {
                keep = position;
            }
        }
        for position in lo..=hi {
            if position != keep {
                peaks[position].flag = Some(false);
            }
        }
    }
}
