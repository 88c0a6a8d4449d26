//! Numeric helpers shared by the calculator and the import checks.

/// Map NaN/±Inf and non-positive values to 0.0.
///
/// Derived quantities that only make sense when positive (load resistance,
/// error percentage, dissipated power) go through this before being stored.
#[inline]
pub fn positive_or_zero(x: f64) -> f64 {
    if x.is_finite() && x > 0.0 { x } else { 0.0 }
}

/// Relative closeness check: `|a - b| <= rel * max(|a|, |b|)`.
///
/// Two zeros compare equal; a zero against a non-zero never does.
#[inline]
pub fn approx_eq_rel(a: f64, b: f64, rel: f64) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs());
    (a - b).abs() <= rel * scale
}
