//! Memory encoder: packs a validated chart into the fixed-size ROM image the
//! playback hardware reads, and derives the clock divisor from the tempo.

use crate::chart::{ChartDocument, Lane};
use crate::error::ChartError;

/// Number of addressable 4-bit cells in the playback ROM.
///
/// A hard ceiling: charts whose maximum tick does not fit are rejected, never
/// truncated.
pub const ROM_CAPACITY: usize = 4096;

/// Frequency of the external oscillator driving the hardware clock domain.
pub const OSCILLATOR_HZ: u64 = 375_000_000;

/// The fixed-size, address-indexed binary image of a chart.
///
/// One 4-bit cell per address from 0 up to [`ROM_CAPACITY`]. The two high
/// bits of a cell hold lane 1's code, the two low bits lane 0's, using the
/// fixed code {00 = empty, 01 = tap, 10 = hold_start, 11 = hold_mid}.
/// Untouched addresses stay zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryImage {
    cells: Vec<u8>,
}

impl MemoryImage {
    fn new() -> Self {
        Self {
            cells: vec![0; ROM_CAPACITY],
        }
    }

    /// The 4-bit value at `addr`.
    pub fn cell(&self, addr: usize) -> u8 {
        self.cells[addr]
    }

    /// All cells in address order.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Write a 2-bit code into one lane's half of a cell, leaving the other
    /// half untouched. A later write to the same half overwrites the earlier
    /// one.
    fn set_half(&mut self, addr: usize, lane: Lane, code: u8) {
        let cell = &mut self.cells[addr];
        *cell = match lane {
            Lane::Down => (*cell & 0b1100) | code,
            Lane::Up => (*cell & 0b0011) | (code << 2),
        };
    }
}

/// Derive the hardware clock divisor from a tempo.
///
/// `floor(OSCILLATOR_HZ / tempo)`. The parser already excludes a zero tempo;
/// this re-asserts the invariant so the encoder stands on its own.
pub fn clock_divisor(tempo: u32) -> Result<u64, ChartError> {
    if tempo == 0 {
        return Err(ChartError::InvalidTempo { tempo });
    }
    Ok(OSCILLATOR_HZ / u64::from(tempo))
}

/// Encode a validated chart into a memory image and its clock divisor.
///
/// Every event's 2-bit code lands in the cell addressed by its tick, in the
/// nibble half selected by its lane. Duplicate tick/lane pairs cannot survive
/// validation, but are tolerated here as idempotent overwrites (later event
/// wins) rather than treated as errors.
pub fn encode(chart: &ChartDocument) -> Result<(MemoryImage, u64), ChartError> {
    let divisor = clock_divisor(chart.header.tempo)?;

    if let Some(max) = chart.max_tick() {
        if max as usize >= ROM_CAPACITY {
            return Err(ChartError::CapacityExceeded {
                tick: max,
                capacity: ROM_CAPACITY,
            });
        }
    }

    let mut image = MemoryImage::new();
    for event in &chart.events {
        image.set_half(event.tick as usize, event.lane, event.kind.code());
    }

    Ok((image, divisor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartHeader, Event, EventKind};
    use crate::parser::parse;

    fn event(tick: u32, kind: EventKind, lane: Lane) -> Event {
        Event { tick, kind, lane, line: 0 }
    }

    fn doc(tempo: u32, events: Vec<Event>) -> ChartDocument {
        ChartDocument {
            header: ChartHeader { tempo },
            events,
        }
    }

    #[test]
    fn test_single_tap_layout() {
        let chart = parse("tempo=200\n(10,tap,0)\n").unwrap();
        let (image, divisor) = encode(&chart).unwrap();
        assert_eq!(image.cell(10), 0b0001);
        assert_eq!(divisor, 1_875_000);
        assert!(image
            .cells()
            .iter()
            .enumerate()
            .all(|(addr, &cell)| addr == 10 || cell == 0));
    }

    #[test]
    fn test_upper_lane_uses_high_bits() {
        let chart = doc(120, vec![event(3, EventKind::HoldStart, Lane::Up)]);
        let (image, _) = encode(&chart).unwrap();
        assert_eq!(image.cell(3), 0b1000);
    }

    #[test]
    fn test_both_lanes_share_a_cell() {
        let chart = doc(
            120,
            vec![
                event(5, EventKind::Tap, Lane::Down),
                event(5, EventKind::HoldMid, Lane::Up),
            ],
        );
        let (image, _) = encode(&chart).unwrap();
        assert_eq!(image.cell(5), 0b1101);
    }

    #[test]
    fn test_writing_one_lane_preserves_the_other() {
        let chart = doc(
            120,
            vec![
                event(7, EventKind::HoldStart, Lane::Up),
                event(7, EventKind::Tap, Lane::Down),
            ],
        );
        let (image, _) = encode(&chart).unwrap();
        assert_eq!(image.cell(7), 0b1001);
    }

    #[test]
    fn test_duplicate_overwrite_is_tolerated() {
        // Cannot survive validation; if it reaches the encoder anyway, the
        // later event in stream order wins.
        let chart = doc(
            120,
            vec![
                event(9, EventKind::Tap, Lane::Down),
                event(9, EventKind::HoldStart, Lane::Down),
            ],
        );
        let (image, _) = encode(&chart).unwrap();
        assert_eq!(image.cell(9), 0b0010);
    }

    #[test]
    fn test_last_address_fits() {
        let chart = doc(120, vec![event(4095, EventKind::Tap, Lane::Down)]);
        let (image, _) = encode(&chart).unwrap();
        assert_eq!(image.cell(4095), 0b0001);
    }

    #[test]
    fn test_capacity_exceeded() {
        let chart = doc(120, vec![event(4096, EventKind::Tap, Lane::Down)]);
        let err = encode(&chart).unwrap_err();
        assert!(matches!(
            err,
            ChartError::CapacityExceeded { tick: 4096, capacity: ROM_CAPACITY }
        ));
    }

    #[test]
    fn test_clock_divisor_floors() {
        assert_eq!(clock_divisor(200).unwrap(), 1_875_000);
        assert_eq!(clock_divisor(7).unwrap(), 53_571_428);
    }

    #[test]
    fn test_zero_tempo_reasserted() {
        let chart = doc(0, vec![]);
        assert!(matches!(encode(&chart), Err(ChartError::InvalidTempo { tempo: 0 })));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let chart = parse("tempo=150\n(0,tap,1)\n(2,hold_start,0)\n(3,hold_mid,0)\n").unwrap();
        let (a, _) = encode(&chart).unwrap();
        let (b, _) = encode(&chart).unwrap();
        assert_eq!(a, b);
    }
}
