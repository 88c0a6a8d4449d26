//! Quick Start Example
//!
//! Plans three ranges for a 16-bit ADC, prints the table, then breaks the
//! overlap between range 0 and range 1 by hand to show how validity is reported.
//!
//! Run with `cargo run -p shunt_core --example quick_start`.

use shunt_core::format::{format_percent, format_si};
use shunt_core::{GlobalConfig, Planner};

fn print_plan(planner: &Planner) {
    for (i, r) in planner.ranges().iter().enumerate() {
        println!(
            "range {i}: {:>9}  {:>9} .. {:>9}  err {:>7}  {}",
            format_si(r.resistance, "Ω"),
            format_si(r.down_threshold, "A"),
            format_si(r.up_threshold, "A"),
            format_percent(r.max_theoretical_error_percent),
            if r.overlap_info.is_valid { "ok" } else { "INVALID" },
        );
    }
}

fn main() -> Result<(), eyre::Report> {
    let mut planner = Planner::builder()
        .with_global(GlobalConfig::default())
        .build()?;
    print_plan(&planner);

    planner.set_resistance(1, 10.0)?;
    println!("\nafter setting range 1 to 10 Ω:");
    print_plan(&planner);
    println!("invalid ranges: {:?}", planner.summary().invalid_ranges);
    Ok(())
}
