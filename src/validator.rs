//! # Chart Validation Module
//!
//! This module validates the temporal and structural correctness of a parsed
//! chart.
//!
//! ## Purpose
//! After parsing, a chart may be syntactically valid but still unplayable.
//! This module checks the invariants the hardware encoder depends on:
//! - Event ticks never decrease across the whole stream
//! - On each lane, ticks strictly increase
//! - Hold notes follow the two-state lifecycle: a `hold_start` must be
//!   continued by `hold_mid` events on consecutive ticks, and every hold must
//!   carry at least one `hold_mid`
//!
//! ## Validation Rules
//!
//! ### Global ordering
//! - Ticks across the whole stream are non-decreasing; simultaneous events on
//!   different lanes are fine
//!
//! ### Per-lane ordering
//! - Within one lane, each tick is strictly greater than the previous one
//! - Global and per-lane ordering are independent guards, checked separately
//!
//! ### Hold lifecycle (per-lane state machine)
//! - `hold_mid` with no open hold on its lane is dangling
//! - After `hold_start`, only a `hold_mid` on the very next tick is legal
//! - After a `hold_mid`, the hold may continue on the next tick or end; a
//!   `tap` or new `hold_start` then starts fresh
//! - A `hold_start` still waiting for its first `hold_mid` at end of stream
//!   is unclosed
//!
//! There is no repair path: the first violation rejects the whole chart.
//!
//! ## Entry Point
//! `validate(chart: &ChartDocument) -> Result<(), ChartError>`
//!
//! ## Related Modules
//! - `chart` - Defines ChartDocument and Event types
//! - `error` - Returns ChartError::Validation tagged with a Violation kind

use crate::chart::{ChartDocument, Event, EventKind};
use crate::error::{ChartError, Violation};

/// Hold lifecycle state of one lane.
///
/// Every legal transition is enumerated in [`next_hold_state`]; anything else
/// is a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HoldState {
    /// No open hold: the lane is untouched, or its last note was a `tap`, or
    /// its last hold ended on a terminal `hold_mid`.
    Idle,
    /// A `hold_start` not yet continued by any `hold_mid`. Remembers the
    /// opening line for the end-of-stream diagnostic.
    Opened { line: usize },
    /// A hold with at least one `hold_mid`; may continue or end here.
    Sustained,
}

/// Per-lane bookkeeping for the single validation pass.
#[derive(Debug, Clone, Copy)]
struct LaneState {
    last_tick: Option<u32>,
    hold: HoldState,
}

impl LaneState {
    fn new() -> Self {
        Self {
            last_tick: None,
            hold: HoldState::Idle,
        }
    }
}

/// Validate a chart for temporal and structural correctness.
///
/// Processes events once, left to right. On success the document is accepted
/// unchanged; on failure the error carries the [`Violation`] kind and the
/// 1-based source line at which it was detected.
pub fn validate(chart: &ChartDocument) -> Result<(), ChartError> {
    let mut last_tick: Option<u32> = None;
    let mut lanes = [LaneState::new(), LaneState::new()];

    for event in &chart.events {
        // Global ordering: non-decreasing across the whole stream.
        if let Some(prev) = last_tick {
            if event.tick < prev {
                return Err(violation(
                    Violation::NonMonotonicTime,
                    event,
                    format!("tick {} is earlier than previous event tick {}", event.tick, prev),
                ));
            }
        }
        last_tick = Some(event.tick);

        let lane = &mut lanes[event.lane.index()];

        // Per-lane ordering: strictly increasing.
        if let Some(prev) = lane.last_tick {
            if event.tick <= prev {
                return Err(violation(
                    Violation::LaneTimeNotStrictlyIncreasing,
                    event,
                    format!(
                        "tick {} is not after the lane's previous event at tick {}",
                        event.tick, prev
                    ),
                ));
            }
        }

        lane.hold = next_hold_state(lane, event)?;
        lane.last_tick = Some(event.tick);
    }

    for (index, lane) in lanes.iter().enumerate() {
        if let HoldState::Opened { line } = lane.hold {
            return Err(ChartError::Validation {
                kind: Violation::UnclosedHold,
                line,
                message: format!("hold on lane {} is opened but never continued", index),
            });
        }
    }

    Ok(())
}

/// Apply one event to a lane's hold state machine.
fn next_hold_state(lane: &LaneState, event: &Event) -> Result<HoldState, ChartError> {
    match (lane.hold, event.kind) {
        (HoldState::Idle, EventKind::Tap) => Ok(HoldState::Idle),
        (HoldState::Idle, EventKind::HoldStart) => Ok(HoldState::Opened { line: event.line }),
        (HoldState::Idle, EventKind::HoldMid) => Err(violation(
            Violation::DanglingHoldMid,
            event,
            "hold_mid with no hold_start on this lane".to_string(),
        )),
        (HoldState::Opened { .. } | HoldState::Sustained, EventKind::HoldMid) => {
            // A hold continues on the very next tick, one tick per subdivision.
            if lane.last_tick.map(|t| t + 1) != Some(event.tick) {
                return Err(violation(
                    Violation::NonContiguousHold,
                    event,
                    format!("hold_mid at tick {} does not continue the previous beat", event.tick),
                ));
            }
            Ok(HoldState::Sustained)
        }
        (HoldState::Opened { .. }, EventKind::Tap | EventKind::HoldStart) => Err(violation(
            Violation::UnclosedHoldFollowedByNewNote,
            event,
            "hold_start must be followed by contiguous hold_mid events".to_string(),
        )),
        (HoldState::Sustained, EventKind::Tap) => Ok(HoldState::Idle),
        (HoldState::Sustained, EventKind::HoldStart) => Ok(HoldState::Opened { line: event.line }),
    }
}

fn violation(kind: Violation, event: &Event, message: String) -> ChartError {
    ChartError::Validation {
        kind,
        line: event.line,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn check(source: &str) -> Result<(), ChartError> {
        let chart = parse(source).unwrap();
        validate(&chart)
    }

    fn violation_kind(source: &str) -> Violation {
        check(source).unwrap_err().violation().unwrap()
    }

    #[test]
    fn test_valid_taps() {
        assert!(check("tempo=120\n(0,tap,0)\n(1,tap,1)\n(2,tap,0)\n").is_ok());
    }

    #[test]
    fn test_empty_chart_is_valid() {
        assert!(check("tempo=120\n").is_ok());
    }

    #[test]
    fn test_valid_hold() {
        assert!(check("tempo=120\n(4,hold_start,0)\n(5,hold_mid,0)\n(6,hold_mid,0)\n").is_ok());
    }

    #[test]
    fn test_minimum_hold_is_one_mid() {
        assert!(check("tempo=120\n(4,hold_start,0)\n(5,hold_mid,0)\n").is_ok());
    }

    #[test]
    fn test_simultaneous_events_on_both_lanes() {
        assert!(check("tempo=120\n(3,tap,0)\n(3,tap,1)\n").is_ok());
    }

    #[test]
    fn test_non_monotonic_time() {
        assert_eq!(
            violation_kind("tempo=120\n(5,tap,0)\n(4,tap,1)\n"),
            Violation::NonMonotonicTime
        );
    }

    #[test]
    fn test_lane_time_must_strictly_increase() {
        assert_eq!(
            violation_kind("tempo=120\n(5,tap,0)\n(5,tap,0)\n"),
            Violation::LaneTimeNotStrictlyIncreasing
        );
    }

    #[test]
    fn test_dangling_hold_mid_on_fresh_lane() {
        assert_eq!(
            violation_kind("tempo=120\n(5,hold_mid,1)\n"),
            Violation::DanglingHoldMid
        );
    }

    #[test]
    fn test_dangling_hold_mid_after_tap() {
        assert_eq!(
            violation_kind("tempo=120\n(4,tap,0)\n(5,hold_mid,0)\n"),
            Violation::DanglingHoldMid
        );
    }

    #[test]
    fn test_hold_mid_must_be_contiguous() {
        assert_eq!(
            violation_kind("tempo=120\n(4,hold_start,0)\n(6,hold_mid,0)\n"),
            Violation::NonContiguousHold
        );
    }

    #[test]
    fn test_gap_inside_sustained_hold() {
        assert_eq!(
            violation_kind("tempo=120\n(4,hold_start,0)\n(5,hold_mid,0)\n(7,hold_mid,0)\n"),
            Violation::NonContiguousHold
        );
    }

    #[test]
    fn test_tap_interrupting_open_hold() {
        assert_eq!(
            violation_kind("tempo=120\n(4,hold_start,0)\n(5,tap,0)\n"),
            Violation::UnclosedHoldFollowedByNewNote
        );
    }

    #[test]
    fn test_hold_start_interrupting_open_hold() {
        assert_eq!(
            violation_kind("tempo=120\n(4,hold_start,0)\n(5,hold_start,0)\n"),
            Violation::UnclosedHoldFollowedByNewNote
        );
    }

    #[test]
    fn test_unclosed_hold_at_end_of_stream() {
        assert_eq!(
            violation_kind("tempo=120\n(4,hold_start,0)\n"),
            Violation::UnclosedHold
        );
    }

    #[test]
    fn test_trailing_hold_mid_closes_hold() {
        assert!(check("tempo=120\n(4,hold_start,0)\n(5,hold_mid,0)\n").is_ok());
    }

    #[test]
    fn test_tap_after_finished_hold() {
        assert!(check("tempo=120\n(4,hold_start,0)\n(5,hold_mid,0)\n(8,tap,0)\n").is_ok());
    }

    #[test]
    fn test_new_hold_after_finished_hold() {
        assert!(
            check("tempo=120\n(4,hold_start,0)\n(5,hold_mid,0)\n(8,hold_start,0)\n(9,hold_mid,0)\n")
                .is_ok()
        );
    }

    #[test]
    fn test_hold_on_one_lane_taps_on_other() {
        assert!(
            check("tempo=120\n(4,hold_start,0)\n(5,hold_mid,0)\n(5,tap,1)\n(6,hold_mid,0)\n")
                .is_ok()
        );
    }

    #[test]
    fn test_unclosed_hold_reports_opening_line() {
        let err = check("tempo=120\n(0,tap,1)\n(4,hold_start,0)\n").unwrap_err();
        match err {
            ChartError::Validation { kind, line, .. } => {
                assert_eq!(kind, Violation::UnclosedHold);
                assert_eq!(line, 3);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_sorted_values_in_wrong_line_order_rejected() {
        // The values admit a valid ordering, but validation follows file
        // order: no implicit sort.
        assert_eq!(
            violation_kind("tempo=120\n(8,tap,0)\n(2,tap,1)\n(9,tap,1)\n"),
            Violation::NonMonotonicTime
        );
    }
}
