//! # Error Types
//!
//! This module defines all error types for the chartrom compiler.
//!
//! All errors include location information (a 1-based source line, or the
//! offending tick for capacity failures) so chart authors can find and fix
//! the problem.
//!
//! ## Error Types
//! - `Format` - Malformed header or event line, reported by the parser
//! - `Validation` - A temporal/structural invariant violation, tagged with a
//!   [`Violation`] kind, reported by the validator
//! - `CapacityExceeded` - The chart does not fit the fixed ROM address space
//! - `InvalidTempo` - Tempo of zero reaching the encoder (re-asserted there
//!   even though the parser already rejects it)
//!
//! ## Usage
//! ```rust
//! use chartrom::{compile, ChartError};
//!
//! let source = "tempo=200\n(10,tap,0)\n";
//! match compile(source) {
//!     Ok(verilog) => assert!(verilog.starts_with("module ROM")),
//!     Err(ChartError::Format { line, message }) => {
//!         eprintln!("format error at line {}: {}", line, message);
//!     }
//!     Err(ChartError::Validation { line, message, .. }) => {
//!         eprintln!("invalid chart at line {}: {}", line, message);
//!     }
//!     Err(e) => eprintln!("error: {}", e),
//! }
//! ```

use thiserror::Error;

/// The invariant a chart broke, as detected by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// An event tick was strictly smaller than the previous event's tick.
    NonMonotonicTime,
    /// An event tick was not strictly greater than the lane's previous tick.
    LaneTimeNotStrictlyIncreasing,
    /// A `hold_mid` with no open hold on its lane.
    DanglingHoldMid,
    /// A `hold_mid` that does not land exactly one tick after the lane's
    /// previous hold event.
    NonContiguousHold,
    /// A `tap` or `hold_start` on a lane whose `hold_start` has not yet been
    /// continued by a `hold_mid`.
    UnclosedHoldFollowedByNewNote,
    /// A lane whose last event is a `hold_start` at end of stream.
    UnclosedHold,
}

#[derive(Error, Debug)]
pub enum ChartError {
    /// Malformed chart text.
    ///
    /// Reported by the parser for a bad header or event line; `line` is the
    /// 1-based source line.
    ///
    /// # Example
    /// ```
    /// # use chartrom::ChartError;
    /// let err = ChartError::Format {
    ///     line: 3,
    ///     message: "expected (time,type,trace)".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Format error at line 3: expected (time,type,trace)");
    /// ```
    #[error("Format error at line {line}: {message}")]
    Format { line: usize, message: String },

    /// A temporal or structural invariant violation.
    ///
    /// `kind` tags which invariant broke; `line` is the 1-based source line of
    /// the event at which the violation was detected (for an unclosed hold,
    /// the line of the `hold_start` that was never continued).
    #[error("Validation error at line {line}: {message}")]
    Validation {
        kind: Violation,
        line: usize,
        message: String,
    },

    /// The chart's maximum tick does not fit the fixed ROM address space.
    ///
    /// The capacity is a hard ceiling; charts are rejected, never truncated.
    ///
    /// # Example
    /// ```
    /// # use chartrom::ChartError;
    /// let err = ChartError::CapacityExceeded { tick: 5000, capacity: 4096 };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Chart exceeds ROM capacity: tick 5000 does not fit 4096 addresses"
    /// );
    /// ```
    #[error("Chart exceeds ROM capacity: tick {tick} does not fit {capacity} addresses")]
    CapacityExceeded { tick: u32, capacity: usize },

    /// A non-positive tempo reaching the encoder.
    #[error("Invalid tempo: {tempo}")]
    InvalidTempo { tempo: u32 },
}

impl ChartError {
    /// The violation kind, if this is a validation error.
    pub fn violation(&self) -> Option<Violation> {
        match self {
            ChartError::Validation { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
