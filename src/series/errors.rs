//! series::errors — shared error types for series containers and time parsing.
//!
//! Purpose
//! -------
//! Provide error enums and result aliases for the series layer: frame
//! construction, column lookup, duration-string parsing, and sampling
//! frequency resolution. This keeps structural and parse failures localized
//! while exposing a uniform error surface to the declustering core.
//!
//! Key behaviors
//! -------------
//! - Define [`SeriesResult`] and [`SeriesError`] as the canonical result and
//!   error types for everything under `series`.
//! - Attach human-readable `Display` messages to each variant so diagnostics
//!   are meaningful without additional context.
//!
//! Invariants & assumptions
//! ------------------------
//! - Modules which use this error type are expected to validate their inputs
//!   (index monotonicity, column shapes, duration grammars) and return
//!   [`SeriesResult<T>`] instead of panicking.
//! - `SeriesError` values are small, cheap to clone, and suitable for use in
//!   both unit tests and higher-level orchestration code.
//!
//! Conventions
//! -----------
//! - This module is focused on series-layer errors; declustering-specific
//!   error types live in `declustering::errors`, which wraps [`SeriesError`]
//!   for `?`-propagation across the subtree boundary.
//! - Error messages are phrased in terms of domain constraints (e.g.,
//!   "timestamps must be strictly increasing") rather than low-level details.
//!
//! Downstream usage
//! ----------------
//! - Frame constructors, duration parsers, and frequency resolution return
//!   [`SeriesResult<T>`] to propagate failures cleanly to callers.
//! - The declustering pipeline converts these into `DeclusterError::Series`
//!   via a `From` implementation.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that each variant's `Display` message embeds its
//!   payload (offending column name, position, or input string).

pub type SeriesResult<T> = Result<T, SeriesError>;

/// SeriesError — error conditions for series containers and time parsing.
///
/// Purpose
/// -------
/// Represent all validation and parse failures that can occur when building
/// a [`SeriesFrame`](crate::series::SeriesFrame), looking up a column, or
/// resolving duration strings and sampling frequencies.
///
/// Variants
/// --------
/// - `NoColumns`
///   A frame was constructed without any value column.
/// - `ColumnLengthMismatch { name, expected, actual }`
///   A value column's length differs from the index length.
/// - `DuplicateColumn { name }`
///   Two value columns share the same name.
/// - `NonMonotonicIndex { position }`
///   The timestamp at `position` is not strictly greater than its
///   predecessor.
/// - `UnknownColumn { name }`
///   A column lookup failed; no column with that name exists.
/// - `TimedeltaParse { input, reason }`
///   A duration string could not be parsed, with a short reason.
/// - `CannotInferFrequency { samples }`
///   Frequency inference needs at least two samples; the index has fewer.
/// - `NonPositiveFrequency`
///   An explicit sampling frequency is zero or negative.
/// - `HoursOutOfRange { value }`
///   A fractional-hour quantity is non-finite or does not fit a
///   `chrono::Duration`.
///
/// Invariants
/// ----------
/// - Each variant carries just enough information (offending name, position,
///   or input) to allow downstream logging and debugging without leaking
///   large data structures.
///
/// Notes
/// -----
/// - This enum implements [`std::error::Error`] and [`std::fmt::Display`] so
///   it can be used with idiomatic `?`-based error propagation.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesError {
    //------ Frame construction ------
    NoColumns,
    ColumnLengthMismatch { name: String, expected: usize, actual: usize },
    DuplicateColumn { name: String },
    NonMonotonicIndex { position: usize },
    //------ Lookup ------
    UnknownColumn { name: String },
    //------ Time parsing / frequency ------
    TimedeltaParse { input: String, reason: &'static str },
    CannotInferFrequency { samples: usize },
    NonPositiveFrequency,
    HoursOutOfRange { value: f64 },
}

impl std::error::Error for SeriesError {}

impl std::fmt::Display for SeriesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesError::NoColumns => {
                write!(f, "A series frame must carry at least one value column.")
            }
            SeriesError::ColumnLengthMismatch { name, expected, actual } => {
                write!(
                    f,
                    "Column '{name}' has {actual} values but the index has {expected} timestamps."
                )
            }
            SeriesError::DuplicateColumn { name } => {
                write!(f, "Column name '{name}' appears more than once.")
            }
            SeriesError::NonMonotonicIndex { position } => {
                write!(
                    f,
                    "Timestamps must be strictly increasing; violated at position {position}."
                )
            }
            SeriesError::UnknownColumn { name } => {
                write!(f, "No column named '{name}' in the series frame.")
            }
            SeriesError::TimedeltaParse { input, reason } => {
                write!(f, "Cannot parse '{input}' as a timedelta: {reason}")
            }
            SeriesError::CannotInferFrequency { samples } => {
                write!(
                    f,
                    "Frequency inference needs at least 2 samples; the index has {samples}."
                )
            }
            SeriesError::NonPositiveFrequency => {
                write!(f, "The sampling frequency must be strictly positive.")
            }
            SeriesError::HoursOutOfRange { value } => {
                write!(f, "Hour quantity {value} is non-finite or too large for a duration.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Basic `Display` formatting for SeriesError variants.
    // - Embedding of payload values (names, positions, inputs) into messages.
    //
    // They intentionally DO NOT cover:
    // - The `From<SeriesError>` conversion into `DeclusterError`, which is
    //   exercised by tests in `declustering::errors`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `SeriesError::UnknownColumn` includes the offending column
    // name in its `Display` representation.
    //
    // Given
    // -----
    // - An `UnknownColumn` error with name "surge".
    //
    // Expect
    // ------
    // - `format!("{err}")` contains "surge".
    fn series_error_unknown_column_includes_name_in_display() {
        // Arrange
        let err = SeriesError::UnknownColumn { name: "surge".to_string() };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("surge"), "Display should include the column name.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `SeriesError::NonMonotonicIndex` reports the offending
    // position.
    //
    // Given
    // -----
    // - A `NonMonotonicIndex` error at position 7.
    //
    // Expect
    // ------
    // - `format!("{err}")` contains "7".
    fn series_error_non_monotonic_index_includes_position_in_display() {
        // Arrange
        let err = SeriesError::NonMonotonicIndex { position: 7 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('7'), "Display should include the position.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `SeriesError::TimedeltaParse` embeds both the raw input
    // and the parse reason.
    //
    // Given
    // -----
    // - A `TimedeltaParse` error for input "6q" with a unit reason.
    //
    // Expect
    // ------
    // - `format!("{err}")` contains "6q" and the reason text.
    fn series_error_timedelta_parse_includes_input_and_reason() {
        // Arrange
        let err = SeriesError::TimedeltaParse {
            input: "6q".to_string(),
            reason: "unrecognized unit",
        };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("6q"), "Display should include the raw input.\nGot: {msg}");
        assert!(
            msg.contains("unrecognized unit"),
            "Display should include the parse reason.\nGot: {msg}"
        );
    }
}
