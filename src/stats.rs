//! Chart statistics
//!
//! The data layer behind chart analysis: note counts, lane distribution, and
//! density/difficulty curves computed from the parsed event stream. Rendering
//! these into images is a presentation concern that lives outside this crate;
//! consumers read the serialized summary instead.

use crate::chart::{ChartDocument, EventKind};
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary statistics for one chart.
///
/// Matches the summary artifact the analysis front end consumes. Hold bodies
/// (`hold_mid`) are never counted as notes of their own; a hold contributes
/// exactly one note via its `hold_start`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSummary {
    pub tempo: u32,
    /// Tick of the last event (0 for an empty chart).
    pub duration_ticks: u32,
    /// Taps plus holds.
    pub total_note_count: usize,
    pub tap_count: usize,
    pub hold_count: usize,
    /// Events per lane, hold bodies included (lane 0 first).
    pub lane_event_counts: [usize; 2],
    /// Largest window value of the density curve.
    pub density_peak: usize,
    /// Mean over the occupied density windows.
    pub density_avg: f64,
}

/// Width in ticks of the density/difficulty windows for a chart of the given
/// duration.
pub fn window_size(duration_ticks: u32) -> u32 {
    (duration_ticks / 100).max(100)
}

/// Summarize a parsed chart.
pub fn summarize(chart: &ChartDocument) -> ChartSummary {
    let duration_ticks = chart.max_tick().unwrap_or(0);

    let mut tap_count = 0;
    let mut hold_count = 0;
    let mut lane_event_counts = [0usize; 2];
    for event in &chart.events {
        match event.kind {
            EventKind::Tap => tap_count += 1,
            EventKind::HoldStart => hold_count += 1,
            EventKind::HoldMid => {}
        }
        lane_event_counts[event.lane.index()] += 1;
    }

    let density = density_curve(chart);
    let density_peak = density.iter().map(|&(_, count)| count).max().unwrap_or(0);
    let density_avg = if density.is_empty() {
        0.0
    } else {
        density.iter().map(|&(_, count)| count).sum::<usize>() as f64 / density.len() as f64
    };

    ChartSummary {
        tempo: chart.header.tempo,
        duration_ticks,
        total_note_count: tap_count + hold_count,
        tap_count,
        hold_count,
        lane_event_counts,
        density_peak,
        density_avg,
    }
}

/// Note density per time window: taps and hold starts only, keyed by the
/// window's starting tick, in ascending order. Empty windows are omitted.
pub fn density_curve(chart: &ChartDocument) -> Vec<(u32, usize)> {
    let window = window_size(chart.max_tick().unwrap_or(0));
    let mut density: BTreeMap<u32, usize> = BTreeMap::new();
    for event in &chart.events {
        if matches!(event.kind, EventKind::Tap | EventKind::HoldStart) {
            *density.entry((event.tick / window) * window).or_insert(0) += 1;
        }
    }
    density.into_iter().collect()
}

/// Difficulty score per time window, in ascending window order.
///
/// Each event contributes a kind weight (tap 1.0, hold_start 1.5,
/// hold_mid 0.3); a window's weighted sum is then scaled by how many lanes it
/// touches and by its raw event count, so dense two-handed passages score
/// superlinearly.
pub fn difficulty_curve(chart: &ChartDocument) -> Vec<(u32, f64)> {
    let window = window_size(chart.max_tick().unwrap_or(0));

    struct WindowLoad {
        count: usize,
        weighted_sum: f64,
        lanes: [bool; 2],
    }

    let mut windows: BTreeMap<u32, WindowLoad> = BTreeMap::new();
    for event in &chart.events {
        let weight = match event.kind {
            EventKind::Tap => 1.0,
            EventKind::HoldStart => 1.5,
            EventKind::HoldMid => 0.3,
        };
        let load = windows.entry((event.tick / window) * window).or_insert(WindowLoad {
            count: 0,
            weighted_sum: 0.0,
            lanes: [false; 2],
        });
        load.count += 1;
        load.weighted_sum += weight;
        load.lanes[event.lane.index()] = true;
    }

    windows
        .into_iter()
        .map(|(start, load)| {
            let lane_count = load.lanes.iter().filter(|&&used| used).count();
            let lane_factor = 1.0 + 0.2 * (lane_count.saturating_sub(1)) as f64;
            let density_factor = 1.0 + 0.1 * (load.count - 1) as f64;
            (start, load.weighted_sum * lane_factor * density_factor)
        })
        .collect()
}
