//! series — validated input containers and time-quantity parsing.
//!
//! Purpose
//! -------
//! Provide the input-side surface of the crate: a validated datetime-indexed
//! value table ([`SeriesFrame`]), the sampling-frequency policy
//! ([`Frequency`]), the pandas-flavored timedelta grammar
//! ([`parse_timedelta`]), and the fractional-hour conversions the
//! declustering core needs for lag arithmetic.
//!
//! Key behaviors
//! -------------
//! - Centralize structural validation (sorted unique index, shape-consistent
//!   named columns) in [`SeriesFrame::new`], so the declustering core can
//!   assume a well-formed table.
//! - Resolve sampling frequencies either explicitly or by median-of-gaps
//!   inference via [`Frequency::resolve`].
//! - Surface every parse or structural failure as a typed [`SeriesError`]
//!   through the [`SeriesResult`] alias.
//!
//! Invariants & assumptions
//! ------------------------
//! - Timestamps are strictly increasing and unique; values may be NaN or
//!   ±∞ (the declustering core records their presence per event window).
//! - Parsed timedeltas and resolved frequencies are strictly positive.
//! - This subtree performs no I/O and no logging; it is a pure container
//!   and parsing layer.
//!
//! Downstream usage
//! ----------------
//! - Typical callers construct a frame and hand it to the declustering
//!   pipeline:
//!
//!   ```rust,ignore
//!   use storm_decluster::series::SeriesFrame;
//!
//!   let frame = SeriesFrame::from_column("surge", index, values)?;
//!   ```
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each module: construction and range queries in
//!   [`frame`], grammars and frequency inference in [`frequency`], `Display`
//!   formatting in [`errors`].

pub mod errors;
pub mod frame;
pub mod frequency;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{SeriesError, SeriesResult};
pub use self::frame::SeriesFrame;
pub use self::frequency::{duration_from_hours, hours_between, parse_timedelta, Frequency};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::errors::{SeriesError, SeriesResult};
    pub use super::frame::SeriesFrame;
    pub use super::frequency::{parse_timedelta, Frequency};
}
