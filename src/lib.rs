pub mod chart;
pub mod error;
pub mod parser;
pub mod playback;
pub mod rom;
pub mod stats;
pub mod validator;
pub mod verilog;

pub use chart::*;
pub use error::*;
pub use parser::parse;
pub use playback::{tick_to_seconds, to_playback, PlaybackData, PlaybackNote};
pub use rom::{clock_divisor, encode, MemoryImage, OSCILLATOR_HZ, ROM_CAPACITY};
pub use stats::{difficulty_curve, density_curve, summarize, ChartSummary};
pub use validator::validate;
pub use verilog::{patch_clock_divisor, to_verilog};

/// Compile a chart source string to a Verilog ROM module.
///
/// This is the main entry point for the library.
///
/// # Pipeline
/// 1. Parse the chart text into a typed document
/// 2. Validate ordering and hold-lifecycle invariants
/// 3. Encode the events into the fixed-size memory image and derive the
///    clock divisor
/// 4. Render the Verilog module text
///
/// The emitter only runs once the encoder has fully succeeded, so a failed
/// compilation yields exactly one structured error and no partial output.
pub fn compile(source: &str) -> Result<String, ChartError> {
    let chart = parse(source)?;
    validate(&chart)?;
    let (image, divisor) = encode(&chart)?;
    Ok(to_verilog(&image, divisor))
}

/// Parse and validate a chart without producing any output.
pub fn check(source: &str) -> Result<(), ChartError> {
    let chart = parse(source)?;
    validate(&chart)
}
