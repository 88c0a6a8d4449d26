//! Engineering-notation formatting for tables and logs.

const PREFIXES: [(f64, &str); 8] = [
    (1e9, "G"),
    (1e6, "M"),
    (1e3, "k"),
    (1.0, ""),
    (1e-3, "m"),
    (1e-6, "µ"),
    (1e-9, "n"),
    (1e-12, "p"),
];

/// Four significant digits with an SI prefix, trailing zeros trimmed:
/// `format_si(0.016384, "A") == "16.38 mA"`, `format_si(2200.0, "Ω") == "2.2 kΩ"`.
pub fn format_si(value: f64, unit: &str) -> String {
    if !value.is_finite() {
        return format!("n/a {unit}");
    }
    if value == 0.0 {
        return format!("0 {unit}");
    }
    let magnitude = value.abs();
    let mut slot = PREFIXES
        .iter()
        .position(|(scale, _)| magnitude >= *scale * (1.0 - 1e-12))
        .unwrap_or(PREFIXES.len() - 1);

    let mut text = scaled_digits(value / PREFIXES[slot].0);
    // 999.96 rounds up to "1000"; move to the next prefix instead.
    if slot > 0 && text.trim_start_matches('-').starts_with("1000") {
        slot -= 1;
        text = scaled_digits(value / PREFIXES[slot].0);
    }
    format!("{text} {}{unit}", PREFIXES[slot].1)
}

/// Percentage with up to three decimals: `format_percent(1.0) == "1%"`.
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return "n/a %".to_string();
    }
    format!("{}%", trim_zeros(format!("{value:.3}")))
}

fn scaled_digits(scaled: f64) -> String {
    let abs = scaled.abs();
    let decimals = if abs >= 100.0 {
        1
    } else if abs >= 10.0 {
        2
    } else {
        3
    };
    trim_zeros(format!("{scaled:.decimals$}"))
}

fn trim_zeros(s: String) -> String {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
