//! Integration tests for the end-to-end declustering pipeline.
//!
//! Purpose
//! -------
//! - Validate the full pipeline on synthetic storm-surge series: from frame
//!   construction through exceedance extraction, clustering, parameter
//!   estimation, soft-margin merging, and outcome assembly.
//! - Exercise realistic scenario shapes (isolated pulse trains, overlapping
//!   storms, quiet series) rather than toy edge cases only.
//!
//! Coverage
//! --------
//! - `declustering::pipeline::decluster`:
//!   - supplied-parameter runs with exact peak assertions,
//!   - data-driven SED/SM estimation with structural assertions,
//!   - the no-exceedance short-circuit.
//! - `declustering::records` / `clustering`:
//!   - the exact-partition property over the final diagnostic map.
//! - `declustering::outcome`:
//!   - named-artifact selection against a real outcome.
//!
//! Exclusions
//! ----------
//! - Fine-grained validation of low-level building blocks (grammar parsing,
//!   correlation formulas, merge boundaries) — these are covered by unit
//!   tests in their modules.
//! - Exhaustive stress testing over long series and parameter grids — those
//!   belong in targeted performance tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use storm_decluster::declustering::{
    decluster, Artifact, ArtifactView, DeclusterOptions, Independence, ThresholdSpec,
};
use storm_decluster::series::{Frequency, SeriesFrame};

/// Purpose
/// -------
/// Build an hourly storm-surge frame as a sum of Gaussian-shaped pulses on
/// a flat background.
///
/// Parameters
/// ----------
/// - `hours`: Total series length in hours; one sample per hour.
/// - `pulses`: `(center_hour, height, sigma_hours)` triples; each
///   contributes `height · exp(−((t − center) / sigma)² / 2)`.
///
/// Returns
/// -------
/// - A one-column frame named "surge" starting 2019-01-01 00:00 UTC.
///
/// Invariants
/// ----------
/// - The index is hourly and strictly increasing, so frequency inference
///   always resolves to one hour.
fn pulse_frame(hours: u32, pulses: &[(f64, f64, f64)]) -> SeriesFrame {
    let origin = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
    let index: Vec<DateTime<Utc>> =
        (0..hours).map(|hour| origin + Duration::hours(i64::from(hour))).collect();
    let values: Vec<f64> = (0..hours)
        .map(|hour| {
            pulses
                .iter()
                .map(|&(center, height, sigma)| {
                    let offset = (f64::from(hour) - center) / sigma;
                    height * (-0.5 * offset * offset).exp()
                })
                .sum()
        })
        .collect();
    SeriesFrame::from_column("surge", index, values)
        .expect("pulse frame should satisfy all structural invariants")
}

/// Purpose
/// -------
/// Timestamp helper: `hour` hours after the common series origin.
fn at_hour(hour: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hour)
}

#[test]
// Purpose
// -------
// Verify the canonical scenario: three isolated Gaussian pulses of heights
// 5, 8, 6 spaced 30 days apart, threshold 3, yield exactly three retained
// peaks at the pulse timestamps with nothing merged.
//
// Given
// -----
// - A 70-day hourly series with pulses at days 5, 35, and 65 (σ = 6h).
// - Threshold 3.0, SED = 48h (±24h windows), SM = 12h.
//
// Expect
// ------
// - Maxima are exactly {day 5 → 5.0, day 35 → 8.0, day 65 → 6.0}; every
//   peak record keeps its flag unset.
fn three_isolated_pulses_survive_unmerged() {
    // Arrange
    let frame = pulse_frame(
        70 * 24,
        &[(120.0, 5.0, 6.0), (840.0, 8.0, 6.0), (1560.0, 6.0, 6.0)],
    );
    let options = DeclusterOptions::new()
        .with_threshold(ThresholdSpec::Value(3.0))
        .with_parameters(48.0, 12.0);

    // Act
    let outcome = decluster(&frame, &options).expect("pipeline should succeed");

    // Assert
    let maxima = outcome.maxima.expect("three peaks should survive");
    assert_eq!(maxima.len(), 3, "expected exactly three retained peaks");
    assert!((maxima[&at_hour(120)] - 5.0).abs() < 1e-9);
    assert!((maxima[&at_hour(840)] - 8.0).abs() < 1e-9);
    assert!((maxima[&at_hour(1560)] - 6.0).abs() < 1e-9);
    assert!(outcome.peaks.iter().all(|peak| peak.flag.is_none()));
}

#[test]
// Purpose
// -------
// Verify that two storms 2 hours apart, with an event duration covering
// more than that separation, collapse to the larger-magnitude pulse.
//
// Given
// -----
// - Hourly values with peaks 6.0 at hour 10 and 4.5 at hour 12, shoulders
//   below the threshold.
// - Threshold 3.0, SED = 6h (±3h windows), SM = 2h.
//
// Expect
// ------
// - A single retained maximum of 6.0 at hour 10; the 4.5 event is a
//   dependent of the 6.0 event in the diagnostic map.
fn close_storms_retain_only_the_larger_pulse() {
    // Arrange
    let origin = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
    let mut values = vec![0.5; 24];
    values[9] = 2.0;
    values[10] = 6.0;
    values[11] = 2.0;
    values[12] = 4.5;
    values[13] = 2.0;
    let index: Vec<DateTime<Utc>> =
        (0..24).map(|hour| origin + Duration::hours(hour)).collect();
    let frame = SeriesFrame::from_column("surge", index, values).expect("frame constructs");
    let options = DeclusterOptions::new()
        .with_threshold(ThresholdSpec::Value(3.0))
        .with_parameters(6.0, 2.0);

    // Act
    let outcome = decluster(&frame, &options).expect("pipeline should succeed");

    // Assert
    let maxima = outcome.maxima.expect("the larger pulse should survive");
    assert_eq!(maxima.len(), 1);
    assert_eq!(maxima[&at_hour(10)], 6.0);
    // Exceedance ids are chronological: 0 → 6.0@10, 1 → 4.5@12.
    assert_eq!(outcome.records[1].independence, Independence::Dependent);
    assert_eq!(outcome.records[1].parent, Some(0));
}

#[test]
// Purpose
// -------
// Verify the quiet-series scenario: when no sample reaches the threshold,
// the pipeline short-circuits to an empty outcome.
//
// Given
// -----
// - A two-pulse series with an unreachable threshold of 50.0.
//
// Expect
// ------
// - `None` maxima, an empty diagnostic map, an empty peak table, and the
//   threshold echoed back.
fn quiet_series_yields_empty_outcome() {
    // Arrange
    let frame = pulse_frame(10 * 24, &[(60.0, 5.0, 4.0), (180.0, 7.0, 4.0)]);
    let options = DeclusterOptions::new().with_threshold(ThresholdSpec::Value(50.0));

    // Act
    let outcome = decluster(&frame, &options).expect("pipeline should succeed");

    // Assert
    assert!(outcome.maxima.is_none());
    assert!(outcome.records.is_empty());
    assert!(outcome.peaks.is_empty());
    assert_eq!(outcome.threshold, 50.0);
}

#[test]
// Purpose
// -------
// Exercise the data-driven estimation path and check the structural
// guarantees that must hold regardless of the estimated values: finite
// non-negative parameters, a fully resolved diagnostic map, exact single
// coverage of every exceedance, and determinism across runs.
//
// Given
// -----
// - A 40-day hourly series with four storms of differing heights and
//   widths, threshold 3.0, default 6-day estimation window, no supplied
//   parameters.
//
// Expect
// ------
// - Finite SED/SM ≥ 0; no `Unknown` record; selection plus covered sets
//   partition the exceedances exactly; some maxima survive; a second run
//   reproduces the first.
fn estimation_path_preserves_partition_and_determinism() {
    // Arrange
    let frame = pulse_frame(
        40 * 24,
        &[
            (72.0, 4.2, 3.0),
            (288.0, 6.1, 5.0),
            (528.0, 5.0, 4.0),
            (792.0, 4.8, 6.0),
        ],
    );
    let options = DeclusterOptions::new()
        .with_frequency(Frequency::Fixed(Duration::hours(1)))
        .with_threshold(ThresholdSpec::Value(3.0));

    // Act
    let outcome = decluster(&frame, &options).expect("estimation path should succeed");
    let repeat = decluster(&frame, &options).expect("second run should succeed");

    // Assert: parameters are usable clustering inputs.
    assert!(outcome.parameters.sed.is_finite() && outcome.parameters.sed >= 0.0);
    assert!(outcome.parameters.sm.is_finite() && outcome.parameters.sm >= 0.0);

    // Assert: every exceedance resolved and covered exactly once.
    let mut coverage = vec![0usize; outcome.records.len()];
    for (id, record) in outcome.records.iter() {
        assert_ne!(record.independence, Independence::Unknown, "record {id} unresolved");
        if record.independence == Independence::Independent {
            coverage[id] += 1;
            for &dependent in &record.events {
                coverage[dependent] += 1;
            }
        }
    }
    assert!(coverage.iter().all(|&count| count == 1), "coverage: {coverage:?}");

    // Assert: something survives the merge filter, and runs are identical.
    assert!(outcome.maxima.as_ref().is_some_and(|maxima| !maxima.is_empty()));
    assert_eq!(outcome.records, repeat.records);
    assert_eq!(outcome.parameters, repeat.parameters);
    assert_eq!(outcome.maxima, repeat.maxima);
}

#[test]
// Purpose
// -------
// Verify artifact selection against a real outcome: the named view matches
// the owned field and unknown names fail with the lookup error.
//
// Given
// -----
// - The two-storm close-pulse outcome.
//
// Expect
// ------
// - `named_artifact("maxima")` views the same mapping as `outcome.maxima`;
//   `named_artifact("plot")` is an `UnknownArtifact` error; the enum path
//   views the threshold.
fn outcome_artifacts_are_selectable_by_name_and_enum() {
    // Arrange
    let frame = pulse_frame(10 * 24, &[(120.0, 5.5, 4.0)]);
    let options = DeclusterOptions::new()
        .with_threshold(ThresholdSpec::Value(3.0))
        .with_parameters(24.0, 6.0);
    let outcome = decluster(&frame, &options).expect("pipeline should succeed");

    // Act / Assert
    match outcome.named_artifact("maxima").expect("maxima is a valid artifact") {
        ArtifactView::Maxima(view) => assert_eq!(view, outcome.maxima.as_ref()),
        other => panic!("expected a maxima view, got {other:?}"),
    }
    assert!(outcome.named_artifact("plot").is_err());
    match outcome.artifact(Artifact::Threshold) {
        ArtifactView::Threshold(value) => assert_eq!(value, 3.0),
        other => panic!("expected a threshold view, got {other:?}"),
    }
}
