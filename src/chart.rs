//! # Chart Data Model
//!
//! This module defines the typed representation of a parsed chart.
//!
//! ## Type Hierarchy
//! ```text
//! ChartDocument
//!   ├── ChartHeader (tempo in beats per minute, always > 0)
//!   └── Vec<Event> (file order, never reordered)
//!         ├── tick: u32 (absolute time, 4 ticks per beat)
//!         ├── kind: EventKind (Tap | HoldStart | HoldMid)
//!         ├── lane: Lane (Down = trace 0 | Up = trace 1)
//!         └── line: usize (1-based source line, for diagnostics)
//! ```
//!
//! ## Key Concepts
//!
//! ### Event
//! One note-on at an absolute tick on one of the two lanes. Events are
//! immutable once parsed and owned by the document that holds them.
//!
//! ### Hold notes
//! A sustained note is spelled as a `HoldStart` followed by one or more
//! `HoldMid` events on consecutive ticks of the same lane. The parser does not
//! enforce this; the validator does.
//!
//! ### Hardware codes
//! Each event kind maps to a fixed 2-bit code consumed by the playback
//! hardware: Tap = `01`, HoldStart = `10`, HoldMid = `11`, empty = `00`.
//! The encoder packs one code per lane into each 4-bit memory cell.
//!
//! ## Related Modules
//! - `parser` - Creates these types from chart source text
//! - `validator` - Enforces ordering and hold-lifecycle invariants
//! - `rom` - Packs events into the hardware memory image

use serde::Serialize;
use std::fmt;

/// Ticks per beat in the chart time grid.
pub const TICKS_PER_BEAT: u32 = 4;

/// One of the two independent timing traces.
///
/// Lane token `"0"` is the lower trace (the hardware `notedown` nibble half),
/// `"1"` the upper trace (`noteup`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    Down,
    Up,
}

impl Lane {
    /// Parse a lane token as it appears in chart text.
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "0" => Some(Lane::Down),
            "1" => Some(Lane::Up),
            _ => None,
        }
    }

    /// Index used for per-lane bookkeeping (0 for Down, 1 for Up).
    pub fn index(self) -> usize {
        match self {
            Lane::Down => 0,
            Lane::Up => 1,
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Lane::Down => "0",
            Lane::Up => "1",
        })
    }
}

/// Kind of a chart event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Tap,
    HoldStart,
    HoldMid,
}

impl EventKind {
    /// Parse a kind token as it appears in chart text.
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "tap" => Some(EventKind::Tap),
            "hold_start" => Some(EventKind::HoldStart),
            "hold_mid" => Some(EventKind::HoldMid),
            _ => None,
        }
    }

    /// Token spelling in chart text.
    pub fn token(self) -> &'static str {
        match self {
            EventKind::Tap => "tap",
            EventKind::HoldStart => "hold_start",
            EventKind::HoldMid => "hold_mid",
        }
    }

    /// 2-bit hardware code for this kind (an empty cell half is `00`).
    pub fn code(self) -> u8 {
        match self {
            EventKind::Tap => 0b01,
            EventKind::HoldStart => 0b10,
            EventKind::HoldMid => 0b11,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Chart header: the tempo line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartHeader {
    /// Beats per minute. The parser guarantees tempo > 0.
    pub tempo: u32,
}

/// A single chart event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// Absolute time in ticks.
    pub tick: u32,
    pub kind: EventKind,
    pub lane: Lane,
    /// 1-based line in the source text this event came from.
    pub line: usize,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.tick, self.kind, self.lane)
    }
}

/// A parsed chart: header plus events in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartDocument {
    pub header: ChartHeader,
    pub events: Vec<Event>,
}

impl ChartDocument {
    /// Largest tick in the chart, or `None` for an empty event list.
    pub fn max_tick(&self) -> Option<u32> {
        self.events.iter().map(|e| e.tick).max()
    }

    /// Render the document back to chart text.
    ///
    /// The output re-parses to an equal document (modulo source line numbers),
    /// which is what the round-trip tests rely on.
    pub fn to_chart_text(&self) -> String {
        let mut text = format!("tempo={}\n", self.header.tempo);
        for event in &self.events {
            text.push_str(&event.to_string());
            text.push('\n');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tokens_round_trip() {
        for kind in [EventKind::Tap, EventKind::HoldStart, EventKind::HoldMid] {
            assert_eq!(EventKind::from_token(kind.token()), Some(kind));
        }
        assert_eq!(EventKind::from_token("hold_end"), None);
    }

    #[test]
    fn test_hardware_codes() {
        assert_eq!(EventKind::Tap.code(), 0b01);
        assert_eq!(EventKind::HoldStart.code(), 0b10);
        assert_eq!(EventKind::HoldMid.code(), 0b11);
    }

    #[test]
    fn test_lane_tokens() {
        assert_eq!(Lane::from_token("0"), Some(Lane::Down));
        assert_eq!(Lane::from_token("1"), Some(Lane::Up));
        assert_eq!(Lane::from_token("2"), None);
        assert_eq!(Lane::Down.index(), 0);
        assert_eq!(Lane::Up.index(), 1);
    }

    #[test]
    fn test_event_display() {
        let event = Event {
            tick: 12,
            kind: EventKind::HoldStart,
            lane: Lane::Up,
            line: 3,
        };
        assert_eq!(event.to_string(), "(12,hold_start,1)");
    }

    #[test]
    fn test_chart_text_rendering() {
        let chart = ChartDocument {
            header: ChartHeader { tempo: 180 },
            events: vec![
                Event { tick: 0, kind: EventKind::Tap, lane: Lane::Down, line: 2 },
                Event { tick: 2, kind: EventKind::Tap, lane: Lane::Up, line: 3 },
            ],
        };
        assert_eq!(chart.to_chart_text(), "tempo=180\n(0,tap,0)\n(2,tap,1)\n");
        assert_eq!(chart.max_tick(), Some(2));
    }
}
