use std::env;
use std::fs;
use std::process;

fn usage() -> ! {
    eprintln!("Usage: chartrom <chart.txt> [output.v]");
    eprintln!("       chartrom --check <chart.txt>");
    eprintln!("       chartrom --summary <chart.txt> [summary.json]");
    eprintln!("       chartrom --patch-divisor <hardware.v> <chart.txt>");
    process::exit(1);
}

fn read_source(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path, e);
            process::exit(1);
        }
    }
}

fn write_output(path: &str, content: &str) {
    if let Err(e) = fs::write(path, content) {
        eprintln!("Error writing to '{}': {}", path, e);
        process::exit(1);
    }
}

fn parsed_chart(path: &str) -> chartrom::ChartDocument {
    let source = read_source(path);
    let chart = match chartrom::parse(&source) {
        Ok(chart) => chart,
        Err(e) => {
            eprintln!("Compilation error: {}", e);
            process::exit(1);
        }
    };
    if let Err(e) = chartrom::validate(&chart) {
        eprintln!("Compilation error: {}", e);
        process::exit(1);
    }
    chart
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        usage();
    }

    match args[1].as_str() {
        "--check" => {
            let Some(input_path) = args.get(2) else { usage() };
            let source = read_source(input_path);
            match chartrom::check(&source) {
                Ok(()) => println!("{}: ok", input_path),
                Err(e) => {
                    eprintln!("Compilation error: {}", e);
                    process::exit(1);
                }
            }
        }
        "--summary" => {
            let Some(input_path) = args.get(2) else { usage() };
            let chart = parsed_chart(input_path);
            let summary = chartrom::summarize(&chart);
            let json = match serde_json::to_string_pretty(&summary) {
                Ok(json) => json,
                Err(e) => {
                    eprintln!("Error serializing summary: {}", e);
                    process::exit(1);
                }
            };
            match args.get(3) {
                Some(path) => {
                    write_output(path, &json);
                    eprintln!("Wrote summary to {}", path);
                }
                None => println!("{}", json),
            }
        }
        "--patch-divisor" => {
            let (Some(hardware_path), Some(input_path)) = (args.get(2), args.get(3)) else {
                usage()
            };
            let chart = parsed_chart(input_path);
            let divisor = match chartrom::clock_divisor(chart.header.tempo) {
                Ok(divisor) => divisor,
                Err(e) => {
                    eprintln!("Compilation error: {}", e);
                    process::exit(1);
                }
            };
            let hardware = read_source(hardware_path);
            match chartrom::patch_clock_divisor(&hardware, divisor) {
                Some(patched) => {
                    write_output(hardware_path, &patched);
                    eprintln!("Updated div_cnt = {} in {}", divisor, hardware_path);
                }
                None => {
                    eprintln!("Error: no 'parameter div_cnt' found in {}", hardware_path);
                    process::exit(1);
                }
            }
        }
        input_path => {
            if input_path.starts_with("--") {
                usage();
            }
            let source = read_source(input_path);
            let verilog = match chartrom::compile(&source) {
                Ok(verilog) => verilog,
                Err(e) => {
                    eprintln!("Compilation error: {}", e);
                    process::exit(1);
                }
            };
            match args.get(2) {
                Some(path) => {
                    write_output(path, &verilog);
                    eprintln!("Wrote ROM module to {}", path);
                }
                None => print!("{}", verilog),
            }
        }
    }
}
