use std::fmt;

/// A single field that failed validation, with the bound it violated.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

pub(crate) fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Push a violation when an integer falls outside `min..=max`.
pub(crate) fn check_int_range(
    violations: &mut Vec<FieldViolation>,
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
) {
    if value < min {
        violations.push(FieldViolation::new(field, format!("must be at least {}", min)));
    } else if value > max {
        violations.push(FieldViolation::new(field, format!("must be at most {}", max)));
    }
}

/// Push a violation when a number is not finite or falls outside `min..=max`.
pub(crate) fn check_float_range(
    violations: &mut Vec<FieldViolation>,
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) {
    if !value.is_finite() {
        violations.push(FieldViolation::new(field, "must be a finite number"));
    } else if value < min {
        violations.push(FieldViolation::new(field, format!("must be at least {}", min)));
    } else if value > max {
        violations.push(FieldViolation::new(field, format!("must be at most {}", max)));
    }
}

/// Push a violation unless a number is finite and in `(0, max]`.
pub(crate) fn check_positive(
    violations: &mut Vec<FieldViolation>,
    field: &'static str,
    value: f64,
    max: f64,
) {
    if value.is_finite() && value <= 0.0 {
        violations.push(FieldViolation::new(field, "must be greater than 0"));
    } else {
        check_float_range(violations, field, value, 0.0, max);
    }
}

pub(crate) fn check_not_blank(violations: &mut Vec<FieldViolation>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        violations.push(FieldViolation::new(field, "must not be empty"));
    }
}
