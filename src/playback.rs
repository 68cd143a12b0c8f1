//! Playback schedule
//!
//! Converts a parsed chart into a wall-clock schedule an external player can
//! follow. The audio loop itself (key handling, sound output) lives outside
//! this crate; it consumes the serialized schedule.

use crate::chart::{ChartDocument, EventKind, TICKS_PER_BEAT};
use serde::Serialize;

/// One scheduled sounding event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackNote {
    /// Offset from chart start, in seconds.
    pub seconds: f64,
    pub tick: u32,
    pub kind: EventKind,
    /// Lane index (0 = lower trace, 1 = upper).
    pub lane: u8,
}

/// The full schedule for one chart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackData {
    pub tempo: u32,
    pub notes: Vec<PlaybackNote>,
}

/// Convert a tick to seconds at the given tempo.
///
/// A tick is a quarter of a beat; a beat lasts `60 / tempo` seconds.
pub fn tick_to_seconds(tick: u32, tempo: u32) -> f64 {
    (f64::from(tick) / f64::from(TICKS_PER_BEAT)) * (60.0 / f64::from(tempo))
}

/// Build the playback schedule for a parsed chart.
///
/// Every event is scheduled, hold bodies included: the player sounds each
/// sustained tick. Order follows the event stream.
pub fn to_playback(chart: &ChartDocument) -> PlaybackData {
    let tempo = chart.header.tempo;
    let notes = chart
        .events
        .iter()
        .map(|event| PlaybackNote {
            seconds: tick_to_seconds(event.tick, tempo),
            tick: event.tick,
            kind: event.kind,
            lane: event.lane.index() as u8,
        })
        .collect();
    PlaybackData { tempo, notes }
}
