//! # Dashboard Report Generator
//!
//! Prints the full dashboard report for a snapshot as JSON.
//!
//! ## Usage
//! ```bash
//! # Report with the default scenario (50 a day, current prices)
//! cargo run -p bistro-report -- --snapshot ./snapshot.json
//!
//! # Simulate 80 a day with a 10% price increase
//! cargo run -p bistro-report -- --snapshot ./snapshot.json --daily-sales 80 --multiplier 1.1
//!
//! # Show the effective configuration
//! cargo run -p bistro-report -- --print-config
//! ```
//!
//! Logs go to stderr (`RUST_LOG=debug` for calculation details); the report
//! is the only thing written to stdout.

use std::env;
use std::path::PathBuf;

use bistro_report::{generate, init_tracing, ReportConfig, ReportOptions};

fn print_help() {
    println!("Bistro Finance Dashboard Report");
    println!();
    println!("Usage: bistro-report --snapshot <PATH> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -s, --snapshot <PATH>    Snapshot JSON exported from storage (required)");
    println!("  -c, --config <PATH>      Config file (default: platform config dir/report.toml)");
    println!("  -d, --daily-sales <N>    Burgers per day for every product (10-200)");
    println!("  -m, --multiplier <X>     Price multiplier (0.7-1.5)");
    println!("      --print-config       Print the effective configuration and exit");
    println!("  -h, --help               Show this help message");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut snapshot_path: Option<PathBuf> = None;
    let mut options = ReportOptions::default();
    let mut print_config = false;

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "--snapshot" | "-s" => {
                snapshot_path = value.map(PathBuf::from);
                i += 1;
            }
            "--config" | "-c" => {
                options.config_path = value.map(PathBuf::from);
                i += 1;
            }
            "--daily-sales" | "-d" => {
                let raw = value.ok_or("--daily-sales needs a value")?;
                options.daily_sales = Some(raw.parse().map_err(|_| format!("invalid daily sales: {raw}"))?);
                i += 1;
            }
            "--multiplier" | "-m" => {
                let raw = value.ok_or("--multiplier needs a value")?;
                options.price_multiplier =
                    Some(raw.parse().map_err(|_| format!("invalid multiplier: {raw}"))?);
                i += 1;
            }
            "--print-config" => print_config = true,
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => return Err(format!("unknown argument: {other} (see --help)").into()),
        }
        i += 1;
    }

    init_tracing();

    if print_config {
        let config = ReportConfig::load(options.config_path.clone())?;
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    options.snapshot_path = snapshot_path.ok_or("--snapshot <PATH> is required (see --help)")?;

    let (envelope, config) = generate(&options)?;
    println!("{}", envelope.to_json(config.output.pretty)?);

    Ok(())
}
