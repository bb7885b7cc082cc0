//! declustering::records — per-event diagnostic records and their arena.
//!
//! Purpose
//! -------
//! Provide the mutable per-event bookkeeping used by the window clusterer:
//! one [`EventRecord`] per exceedance, held in an [`EventMap`] arena keyed
//! by dense event id — a flat, index-addressed vector rather than a map of
//! maps, so passes can scan and reset records cheaply.
//!
//! Key behaviors
//! -------------
//! - [`Independence`] is the tri-state independence flag; every record ends
//!   a clustering pass with a resolved (non-[`Unknown`](Independence::Unknown))
//!   state.
//! - [`EventMap`] supports panicking arena indexing for internal ids issued
//!   by the clusterer and a non-panicking [`EventMap::get`] for external
//!   consumers of the diagnostic map.
//!
//! Invariants & assumptions
//! ------------------------
//! - Record ids equal positions in the exceedance table the map was built
//!   from; the arena never grows or shrinks during a pass.
//! - `window start/end`, `data`, and the NaN/Inf flags are populated only on
//!   independent records; `parent` only on dependent ones.
//! - A fresh map is built per clustering pass; maps are never shared across
//!   passes.
//!
//! Testing notes
//! -------------
//! - Construction defaults and accessor behavior are covered here; the full
//!   state machine is exercised by `clustering` tests.

use crate::declustering::exceedance::ExceedanceTable;
use chrono::{DateTime, Utc};

/// Tri-state independence flag of an exceedance event.
///
/// `Unknown` is the initial state; a clustering pass leaves every event
/// either `Independent` (a selected peak) or `Dependent` (covered by a
/// larger peak's window).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Independence {
    /// Not yet resolved by the clustering loop.
    #[default]
    Unknown,
    /// Selected as an independent storm peak.
    Independent,
    /// Covered by an independent peak's window.
    Dependent,
}

/// `EventRecord` — mutable diagnostic state of one exceedance event.
///
/// Purpose
/// -------
/// Track everything the clusterer learns about a single exceedance: its
/// resolution state, the peak it depends on (if any), and — for independent
/// peaks — the symmetric window, the original-series values inside it, and
/// NaN/Inf presence flags.
///
/// Fields
/// ------
/// - `independence`: tri-state resolution flag.
/// - `parent`: id of the covering independent event; `None` unless
///   dependent.
/// - `maxima`: the event's magnitude.
/// - `datetime`: the event's timestamp.
/// - `start` / `end`: symmetric window bounds `[datetime − lag, datetime + lag]`;
///   set only on independent records.
/// - `data`: original-series values inside the window (independent records
///   only; empty otherwise).
/// - `has_nan` / `has_inf`: whether `data` contains NaN / ±∞.
/// - `events`: ids of the events this peak's window covered.
///
/// Invariants
/// ----------
/// - `parent.is_some()` implies `independence == Dependent`.
/// - `start.is_some()` implies `independence == Independent`, and then
///   `data` spans `[start, end]` in the original series.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub independence: Independence,
    pub parent: Option<usize>,
    pub maxima: f64,
    pub datetime: DateTime<Utc>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub data: Vec<f64>,
    pub has_nan: bool,
    pub has_inf: bool,
    pub events: Vec<usize>,
}

impl EventRecord {
    fn fresh(datetime: DateTime<Utc>, maxima: f64) -> Self {
        EventRecord {
            independence: Independence::Unknown,
            parent: None,
            maxima,
            datetime,
            start: None,
            end: None,
            data: Vec::new(),
            has_nan: false,
            has_inf: false,
            events: Vec::new(),
        }
    }
}

/// `EventMap` — arena of per-event records keyed by dense event id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventMap {
    records: Vec<EventRecord>,
}

impl EventMap {
    /// An empty map, used when no sample exceeds the threshold.
    pub fn empty() -> Self {
        EventMap { records: Vec::new() }
    }

    /// Fresh records (all `Unknown`, no parents) for every event of the
    /// table, in id order.
    pub(crate) fn for_table(table: &ExceedanceTable) -> Self {
        let records = table
            .datetimes()
            .iter()
            .zip(table.values())
            .map(|(&datetime, &maxima)| EventRecord::fresh(datetime, maxima))
            .collect();
        EventMap { records }
    }

    /// Number of tracked events.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the map tracks no events.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record for `id`, or `None` when the id was never issued.
    pub fn get(&self, id: usize) -> Option<&EventRecord> {
        self.records.get(id)
    }

    /// All records in id order.
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Iterator over `(id, record)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &EventRecord)> {
        self.records.iter().enumerate()
    }
}

impl std::ops::Index<usize> for EventMap {
    type Output = EventRecord;

    /// Arena indexing for ids issued by the clusterer.
    ///
    /// Panics on an out-of-range id; that indicates a programming error,
    /// not a data condition.
    fn index(&self, id: usize) -> &EventRecord {
        &self.records[id]
    }
}

impl std::ops::IndexMut<usize> for EventMap {
    fn index_mut(&mut self, id: usize) -> &mut EventRecord {
        &mut self.records[id]
    }
}
