//! Command bodies: config/catalog loading, planning, table rendering.

use eyre::WrapErr;
use shunt_core::format::{format_percent, format_si};
use shunt_core::{Catalog, ExportDocument, Planner, ShuntError, conversions};
use shunt_traits::SystemClock;
use std::fmt::Write as _;
use std::path::Path;

/// Read and validate the TOML config; defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> eyre::Result<shunt_config::Config> {
    let Some(path) = path else {
        return Ok(shunt_config::Config::default());
    };
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("read config {}", path.display()))?;
    let cfg = shunt_config::load_toml(&text)
        .wrap_err_with(|| format!("parse config {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Catalog from `[catalog]`; a configured CSV replaces the series.
pub fn load_catalog(cfg: &shunt_config::Config) -> eyre::Result<Catalog> {
    let csv_values = match cfg.catalog.csv.as_deref() {
        Some(path) => Some(shunt_config::load_catalog_csv(Path::new(path))?),
        None => None,
    };
    let catalog = conversions::catalog_from_cfg(&cfg.catalog, csv_values)?;
    tracing::info!(
        resistances = catalog.len(),
        smallest = catalog.smallest(),
        largest = catalog.largest(),
        "catalog loaded"
    );
    Ok(catalog)
}

pub fn build_planner(cfg: &shunt_config::Config) -> eyre::Result<Planner> {
    let catalog = load_catalog(cfg)?;
    let planner = conversions::planner_from_config(cfg, catalog)?;
    let summary = planner.summary();
    tracing::info!(
        resistances = ?planner.resistances(),
        all_valid = summary.all_valid,
        complete = summary.is_complete(),
        "plan ready"
    );
    Ok(planner)
}

/// Fail with `IncompletePlan` unless every range is valid and both span
/// ends are covered.
pub fn ensure_complete(planner: &Planner) -> eyre::Result<()> {
    let summary = planner.summary();
    if summary.is_complete() {
        return Ok(());
    }
    Err(ShuntError::IncompletePlan {
        invalid: summary.invalid_ranges,
    }
    .into())
}

pub fn run_plan(cfg: &shunt_config::Config, strict: bool, json: bool) -> eyre::Result<()> {
    let planner = build_planner(cfg)?;
    if json {
        let doc = ExportDocument::from_planner(&planner, &SystemClock::new());
        println!("{}", doc.to_json_pretty()?);
    } else {
        print!("{}", render_table(&planner));
    }
    if strict {
        ensure_complete(&planner)?;
    }
    Ok(())
}

pub fn run_export(cfg: &shunt_config::Config, out: &Path, json: bool) -> eyre::Result<()> {
    let planner = build_planner(cfg)?;
    let doc = ExportDocument::from_planner(&planner, &SystemClock::new());
    let text = doc.to_json_pretty()?;
    std::fs::write(out, text + "\n").wrap_err_with(|| format!("write {}", out.display()))?;
    tracing::info!(path = %out.display(), ranges = doc.ranges.len(), "plan exported");
    if json {
        println!(
            "{}",
            serde_json::json!({
                "written": out.display().to_string(),
                "ranges": doc.ranges.len(),
                "all_valid": planner.summary().all_valid,
            })
        );
    } else {
        println!("Wrote {} ranges to {}", doc.ranges.len(), out.display());
    }
    Ok(())
}

pub fn run_check(
    cfg: &shunt_config::Config,
    file: &Path,
    strict: bool,
    json: bool,
) -> eyre::Result<()> {
    let text =
        std::fs::read_to_string(file).wrap_err_with(|| format!("read {}", file.display()))?;
    let doc = ExportDocument::from_json(&text)?;
    let timestamp = doc.timestamp.clone();
    let planner = doc.into_planner(load_catalog(cfg)?)?;
    let summary = planner.summary();
    if json {
        println!(
            "{}",
            serde_json::json!({
                "file": file.display().to_string(),
                "timestamp": timestamp,
                "consistent": true,
                "all_valid": summary.all_valid,
                "complete": summary.is_complete(),
                "invalid_ranges": summary.invalid_ranges,
            })
        );
    } else {
        println!("{}: consistent (exported {timestamp})", file.display());
        print!("{}", render_table(&planner));
    }
    if strict {
        ensure_complete(&planner)?;
    }
    Ok(())
}

pub fn run_catalog(cfg: &shunt_config::Config, json: bool) -> eyre::Result<()> {
    let catalog = load_catalog(cfg)?;
    if json {
        println!(
            "{}",
            serde_json::json!({
                "resistances": catalog.resistances(),
                "tolerances": catalog.tolerances(),
            })
        );
        return Ok(());
    }
    let values: Vec<String> = catalog
        .resistances()
        .iter()
        .map(|r| format_si(*r, "Ω"))
        .collect();
    let grades: Vec<String> = catalog
        .tolerances()
        .iter()
        .map(|t| format_percent(*t))
        .collect();
    println!("Resistances ({}): {}", values.len(), values.join(", "));
    println!("Tolerances: {}", grades.join(", "));
    Ok(())
}

/// Fixed-width table of every range plus a one-line verdict.
pub fn render_table(planner: &Planner) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>5} {:>10} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>8} {:>9} {:>5} {:>5} {:>7}",
        "range",
        "R",
        "tol",
        "I max",
        "I min",
        "up",
        "down",
        "R load",
        "error",
        "power",
        "prev",
        "next",
        "valid"
    );
    for (i, r) in planner.ranges().iter().enumerate() {
        let o = r.overlap_info;
        let _ = writeln!(
            out,
            "{:>5} {:>10} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>8} {:>9} {:>5} {:>5} {:>7}",
            i,
            format_si(r.resistance, "Ω"),
            format_percent(r.resistance_tolerance_percent),
            format_si(r.theoretical_max_current, "A"),
            format_si(r.theoretical_min_current, "A"),
            format_si(r.up_threshold, "A"),
            format_si(r.down_threshold, "A"),
            format_si(r.min_load_resistance, "Ω"),
            format_percent(r.max_theoretical_error_percent),
            format_si(r.max_power_dissipation, "W"),
            yes_no(o.overlaps_with_prev),
            yes_no(o.overlaps_with_next),
            yes_no(o.is_valid),
        );
    }
    let summary = planner.summary();
    let verdict = if summary.is_complete() {
        "Plan complete".to_string()
    } else if summary.all_valid {
        "Plan valid but span not fully covered".to_string()
    } else {
        format!("Plan INVALID: ranges {:?}", summary.invalid_ranges)
    };
    let _ = writeln!(
        out,
        "{verdict} ({} .. {})",
        format_si(summary.span_min_current, "A"),
        format_si(summary.span_max_current, "A")
    );
    out
}

fn yes_no(b: bool) -> &'static str {
    if b { "yes" } else { "no" }
}
