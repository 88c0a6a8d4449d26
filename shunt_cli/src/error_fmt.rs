//! Human-readable error descriptions and structured JSON error formatting.

use shunt_core::error::{BuildError, ShuntError};

/// Exit code when `--strict` finds an invalid or incomplete plan.
pub const EXIT_INCOMPLETE: i32 = 3;
/// Exit code when an imported document is malformed or inconsistent.
pub const EXIT_IMPORT: i32 = 4;

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::MissingGlobal => {
                "What happened: No global parameters were given to the planner.\nLikely causes: The planner builder was used without with_global(...).\nHow to fix: Provide a [global] table in the config or call with_global(...).".to_string()
            }
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Missing or out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun. See etc/shunt_config.toml for a sample."
            ),
            BuildError::EmptyCatalog => {
                "What happened: The resistor catalog is empty.\nLikely causes: catalog.min_ohm/max_ohm exclude every series value, or the CSV has no rows.\nHow to fix: Widen the [catalog] bounds or add rows to the CSV.".to_string()
            }
            BuildError::InvalidCatalog(msg) => format!(
                "What happened: The resistor catalog is invalid ({msg}).\nLikely causes: Zero, negative or repeated values.\nHow to fix: Fix the [catalog] section or the catalog CSV."
            ),
        };
    }

    if let Some(se) = err.downcast_ref::<ShuntError>() {
        return match se {
            ShuntError::InvalidIndex { index, len } => format!(
                "What happened: Range {index} does not exist (plan has {len} ranges).\nLikely causes: An [[overrides]] entry points past global.num_ranges.\nHow to fix: Use a range index below {len}."
            ),
            ShuntError::DuplicateResistance { ohms, used_by } => format!(
                "What happened: {ohms} Ω is already used by range {used_by}.\nLikely causes: An override picks the same resistor the search chose for another range.\nHow to fix: Choose a different value or override range {used_by} too."
            ),
            ShuntError::Import(msg) => format!(
                "What happened: The plan document could not be imported ({msg}).\nLikely causes: The file was edited by hand, truncated, or written by another version.\nHow to fix: Re-export the plan with `shunt export --out FILE`."
            ),
            ShuntError::IncompletePlan { invalid } => format!(
                "What happened: The plan does not cover the requested current span (invalid ranges: {invalid:?}).\nLikely causes: Too few ranges, a hysteresis factor too large for the catalog spacing, or a manual override.\nHow to fix: Increase global.num_ranges, use a denser catalog series, or review [[overrides]]."
            ),
            other => format!(
                "What happened: {other}.\nLikely causes: See logs.\nHow to fix: Re-run with --log-level=debug or set RUST_LOG for more detail."
            ),
        };
    }

    // String-based heuristics for errors coming from config loading
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("catalog csv must have header") {
        return "Invalid headers in catalog CSV. Expected 'resistance_ohm'.".to_string();
    }

    if lower.starts_with("read config") || lower.starts_with("parse config") {
        let cause = err.root_cause();
        return format!(
            "What happened: {msg}.\nLikely causes: {cause}\nHow to fix: Check the --config path and the TOML syntax."
        );
    }

    if lower.starts_with("global.")
        || lower.starts_with("catalog.")
        || lower.starts_with("overrides.")
        || lower.starts_with("logging.")
    {
        return format!(
            "What happened: Invalid configuration ({msg}).\nLikely causes: Out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun."
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes: 3 incomplete plan, 4 import failure, 1 otherwise.
/// Usage errors exit with 2 from clap before this is reached.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    match err.downcast_ref::<ShuntError>() {
        Some(ShuntError::IncompletePlan { .. }) => EXIT_INCOMPLETE,
        Some(ShuntError::Import(_)) => EXIT_IMPORT,
        _ => 1,
    }
}

pub fn reason_name(err: &eyre::Report) -> &'static str {
    if let Some(se) = err.downcast_ref::<ShuntError>() {
        return match se {
            ShuntError::InvalidIndex { .. } => "InvalidIndex",
            ShuntError::InvalidResistance(_) => "InvalidResistance",
            ShuntError::DuplicateResistance { .. } => "DuplicateResistance",
            ShuntError::InvalidTolerance(_) => "InvalidTolerance",
            ShuntError::Import(_) => "Import",
            ShuntError::Export(_) => "Export",
            ShuntError::IncompletePlan { .. } => "IncompletePlan",
        };
    }
    if err.downcast_ref::<BuildError>().is_some() {
        return "InvalidConfig";
    }
    "Error"
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    let reason = reason_name(err);
    let message = humanize(err);
    let details = match err.downcast_ref::<ShuntError>() {
        Some(ShuntError::IncompletePlan { invalid }) => Some(json!({ "invalid_ranges": invalid })),
        Some(ShuntError::DuplicateResistance { ohms, used_by }) => {
            Some(json!({ "resistance": ohms, "used_by": used_by }))
        }
        Some(ShuntError::InvalidIndex { index, len }) => {
            Some(json!({ "index": index, "num_ranges": len }))
        }
        _ => None,
    };

    let obj = if let Some(d) = details {
        json!({ "reason": reason, "details": d, "message": message })
    } else {
        json!({ "reason": reason, "message": message })
    };
    obj.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        let incomplete = eyre::Report::new(ShuntError::IncompletePlan { invalid: vec![1] });
        let import = eyre::Report::new(ShuntError::Import("bad".into()));
        let other = eyre::eyre!("boom");
        assert_eq!(exit_code_for_error(&incomplete), EXIT_INCOMPLETE);
        assert_eq!(exit_code_for_error(&import), EXIT_IMPORT);
        assert_eq!(exit_code_for_error(&other), 1);
    }

    #[test]
    fn json_error_carries_details() {
        let err = eyre::Report::new(ShuntError::IncompletePlan { invalid: vec![0, 2] });
        let v: serde_json::Value = serde_json::from_str(&format_error_json(&err)).unwrap();
        assert_eq!(v["reason"], "IncompletePlan");
        assert_eq!(v["details"]["invalid_ranges"], serde_json::json!([0, 2]));
        assert!(v["message"].as_str().unwrap().starts_with("What happened"));
    }

    #[test]
    fn config_messages_are_recognized() {
        let err = eyre::eyre!("global.adc_bits must be in [8, 24]");
        assert!(humanize(&err).contains("Invalid configuration"));
        let csv = eyre::eyre!("catalog CSV must have header 'resistance_ohm', got: ohms");
        assert!(humanize(&csv).contains("Expected 'resistance_ohm'"));
    }
}
