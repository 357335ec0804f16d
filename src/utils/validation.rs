//! Input validation helpers
//!
//! Submission validation collects every missing field so the caller gets
//! one complete error instead of the first failure.

/// Record `field` as missing when the value is absent or blank.
pub fn require_field(missing: &mut Vec<&'static str>, field: &'static str, value: Option<&str>) {
    if value.map(str::trim).filter(|v| !v.is_empty()).is_none() {
        missing.push(field);
    }
}

/// Record `field` as missing when the weight is absent or non-positive.
///
/// Zero counts as missing to match the intake form contract (the form never
/// submits a zero weight).
pub fn require_weight(missing: &mut Vec<&'static str>, field: &'static str, value: Option<f64>) {
    if value.filter(|w| *w > 0.0).is_none() {
        missing.push(field);
    }
}
