use crate::rom::{MemoryImage, ROM_CAPACITY};
use regex::Regex;

/// Render a memory image and clock divisor as a Verilog ROM module.
///
/// The framing is a compatibility contract with the downstream hardware
/// description: one initialization line per address, address 0 first, no
/// gaps, each cell as a fixed-width 4-digit binary literal, plus the single
/// `div_cnt` parameter assignment. Identical input yields byte-identical
/// output.
pub fn to_verilog(image: &MemoryImage, clock_divisor: u64) -> String {
    let mut v = String::new();

    v.push_str("module ROM (\n");
    v.push_str("    input [11:0] addr,\n");
    v.push_str("    output reg [1:0] noteup,\n");
    v.push_str("    output reg [1:0] notedown\n");
    v.push_str(");\n");
    v.push('\n');
    v.push_str(&format!("parameter div_cnt = {};\n", clock_divisor));
    v.push('\n');
    v.push_str(&format!("reg [3:0] ROM [0:{}];\n", ROM_CAPACITY - 1));
    v.push('\n');
    v.push_str("initial begin\n");

    for (addr, cell) in image.cells().iter().enumerate() {
        v.push_str(&format!("\tROM[{}] = 4'b{:04b};\n", addr, cell));
    }

    v.push_str("end\n");
    v.push('\n');
    v.push_str("always @(*) begin\n");
    v.push_str("    {noteup, notedown} = ROM[addr];\n");
    v.push_str("end\n");
    v.push('\n');
    v.push_str("endmodule\n");

    v
}

/// Rewrite the `div_cnt` parameter of an existing hardware description.
///
/// Replaces the digits of every `parameter div_cnt = <n>` assignment in
/// `source` with `clock_divisor`, leaving everything else byte-for-byte
/// intact. Returns `None` when the source carries no such parameter, so
/// callers never write back an unchanged file believing it was patched.
pub fn patch_clock_divisor(source: &str, clock_divisor: u64) -> Option<String> {
    let pattern = Regex::new(r"(parameter\s+div_cnt\s*=\s*)\d+").unwrap();
    if !pattern.is_match(source) {
        return None;
    }
    let replacement = format!("${{1}}{}", clock_divisor);
    Some(pattern.replace_all(source, replacement.as_str()).into_owned())
}
