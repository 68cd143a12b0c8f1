use crate::chart::{ChartDocument, ChartHeader, Event, EventKind, Lane};
use crate::error::ChartError;

/// Parse chart source text into a [`ChartDocument`].
///
/// Line 1 must be `tempo=<positive integer>`. Every following non-blank line
/// must be an event of the form `(<tick>,<kind>,<lane>)`. The first blank line
/// ends the event section; anything after it is not read (callers place
/// trailing blank lines deliberately). No semantic validation happens here;
/// events come out in file order.
pub fn parse(source: &str) -> Result<ChartDocument, ChartError> {
    let mut lines = source.lines();

    let header_line = lines.next().ok_or_else(|| ChartError::Format {
        line: 1,
        message: "empty chart: first line must be tempo=<integer>".to_string(),
    })?;
    let header = parse_header(header_line.trim())?;

    let mut events = Vec::new();
    for (idx, raw_line) in lines.enumerate() {
        let line_number = idx + 2;
        let line = raw_line.trim();
        if line.is_empty() {
            break;
        }
        events.push(parse_event(line, line_number)?);
    }

    Ok(ChartDocument { header, events })
}

fn parse_header(line: &str) -> Result<ChartHeader, ChartError> {
    let value = line.strip_prefix("tempo=").ok_or_else(|| ChartError::Format {
        line: 1,
        message: format!("first line must be tempo=<integer>: {}", line),
    })?;
    let tempo: u32 = value.parse().map_err(|_| ChartError::Format {
        line: 1,
        message: format!("tempo must be a non-negative integer: {}", value),
    })?;
    if tempo == 0 {
        return Err(ChartError::Format {
            line: 1,
            message: "tempo must be positive".to_string(),
        });
    }
    Ok(ChartHeader { tempo })
}

fn parse_event(line: &str, line_number: usize) -> Result<Event, ChartError> {
    let malformed = || ChartError::Format {
        line: line_number,
        message: format!("expected (time,type,trace): {}", line),
    };

    let body = line
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| malformed())?;

    let fields: Vec<&str> = body.split(',').map(str::trim).collect();
    let &[time_str, kind_str, lane_str] = fields.as_slice() else {
        return Err(malformed());
    };

    let tick: u32 = time_str.parse().map_err(|_| ChartError::Format {
        line: line_number,
        message: format!("time must be a non-negative integer: {}", time_str),
    })?;

    let kind = EventKind::from_token(kind_str).ok_or_else(|| ChartError::Format {
        line: line_number,
        message: format!("unknown event type: {}", kind_str),
    })?;

    let lane = Lane::from_token(lane_str).ok_or_else(|| ChartError::Format {
        line: line_number,
        message: format!("trace must be 0 or 1: {}", lane_str),
    })?;

    Ok(Event {
        tick,
        kind,
        lane,
        line: line_number,
    })
}
