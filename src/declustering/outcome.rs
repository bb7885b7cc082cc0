//! declustering::outcome — result assembly and artifact selection.
//!
//! Purpose
//! -------
//! Package the five artifacts of a declustering run — the processed series
//! copy, the surviving maxima, the applied threshold, the (SED, SM) pair,
//! and the final pass's per-event diagnostic map — plus two extra
//! diagnostics (the chronological peak table and the resolved sampling
//! frequency). Artifact selection goes through an explicit [`Artifact`]
//! enum with a `FromStr` implementation rather than a string-keyed lookup,
//! so unknown names fail with a typed lookup error while in-code selection
//! is a plain `match`.
//!
//! Key behaviors
//! -------------
//! - [`DeclusterOutcome::into_parts`] is the fixed-order tuple shape.
//! - [`DeclusterOutcome::artifact`] borrows a single artifact by enum.
//! - [`DeclusterOutcome::named_artifact`] resolves a textual name first and
//!   fails with `UnknownArtifact` outside the fixed set.
//!
//! Conventions
//! -----------
//! - `maxima` maps timestamp → magnitude for the retained peaks and is
//!   `None` when no peak survives (including the no-exceedance case).
//! - Valid artifact names: `series`, `maxima`, `threshold`, `parameters`,
//!   `records` (case-insensitive).
//!
//! Testing notes
//! -------------
//! - Unit tests cover name parsing (all valid names plus the lookup error)
//!   and artifact borrowing.

use crate::declustering::errors::{DeclusterError, DeclusterResult};
use crate::declustering::estimator::DeclusterParameters;
use crate::declustering::merge::PeakRecord;
use crate::declustering::records::EventMap;
use crate::series::frame::SeriesFrame;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Surviving maxima: timestamp → magnitude, `None` when nothing survives.
pub type Maxima = Option<BTreeMap<DateTime<Utc>, f64>>;

/// `DeclusterOutcome` — everything a declustering run produces.
///
/// Fields
/// ------
/// - `series`: the processed copy of the input frame.
/// - `maxima`: retained independent peaks, or `None` when no peak survives.
/// - `threshold`: the threshold actually applied (possibly NaN after a
///   degenerate quantile derivation).
/// - `parameters`: the (SED, SM) pair in hours, supplied or estimated.
/// - `records`: per-event diagnostic map from the final clustering pass.
/// - `peaks`: chronological peak table with gaps and merge flags.
/// - `frequency`: the resolved sampling interval of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclusterOutcome {
    pub series: SeriesFrame,
    pub maxima: Maxima,
    pub threshold: f64,
    pub parameters: DeclusterParameters,
    pub records: EventMap,
    pub peaks: Vec<PeakRecord>,
    pub frequency: Duration,
}

/// The fixed set of selectable artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Series,
    Maxima,
    Threshold,
    Parameters,
    Records,
}

impl FromStr for Artifact {
    type Err = DeclusterError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "series" => Ok(Artifact::Series),
            "maxima" => Ok(Artifact::Maxima),
            "threshold" => Ok(Artifact::Threshold),
            "parameters" => Ok(Artifact::Parameters),
            "records" => Ok(Artifact::Records),
            _ => Err(DeclusterError::UnknownArtifact { name: name.to_string() }),
        }
    }
}

/// A borrowed view of one selected artifact.
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactView<'a> {
    Series(&'a SeriesFrame),
    Maxima(Option<&'a BTreeMap<DateTime<Utc>, f64>>),
    Threshold(f64),
    Parameters(DeclusterParameters),
    Records(&'a EventMap),
}

impl DeclusterOutcome {
    /// Borrow a single artifact.
    pub fn artifact(&self, which: Artifact) -> ArtifactView<'_> {
        match which {
            Artifact::Series => ArtifactView::Series(&self.series),
            Artifact::Maxima => ArtifactView::Maxima(self.maxima.as_ref()),
            Artifact::Threshold => ArtifactView::Threshold(self.threshold),
            Artifact::Parameters => ArtifactView::Parameters(self.parameters),
            Artifact::Records => ArtifactView::Records(&self.records),
        }
    }

    /// Borrow a single artifact by textual name.
    ///
    /// Errors
    /// ------
    /// - `DeclusterError::UnknownArtifact` for names outside the fixed set.
    pub fn named_artifact(&self, name: &str) -> DeclusterResult<ArtifactView<'_>> {
        Ok(self.artifact(name.parse::<Artifact>()?))
    }

    /// Consume the outcome into the fixed-order artifact tuple.
    pub fn into_parts(
        self,
    ) -> (SeriesFrame, Maxima, f64, DeclusterParameters, EventMap) {
        (self.series, self.maxima, self.threshold, self.parameters, self.records)
    }
}
