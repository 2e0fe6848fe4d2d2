//! Data Sanitization
//!
//! Strict field validation and numerical stability utilities.
//!
//! Functions:
//! - Required text field checks for vocabulary records
//! - Selection weight sanitization

use crate::error::DataIntegrityError;

/// Require a present, non-blank text field
///
/// Returns the value untouched; surrounding whitespace is display content.
pub fn require_text<'a>(
    index: usize,
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, DataIntegrityError> {
    match value {
        None => Err(DataIntegrityError::MissingField { index, field }),
        Some(v) if v.trim().is_empty() => Err(DataIntegrityError::BlankField { index, field }),
        Some(v) => Ok(v),
    }
}

/// Require a present field that may be empty (example sentences)
pub fn require_present<'a>(
    index: usize,
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, DataIntegrityError> {
    value.ok_or(DataIntegrityError::MissingField { index, field })
}

/// 检查数组是否包含无效值 (NaN 或 Inf)
pub fn has_invalid_values(arr: &[f64]) -> bool {
    arr.iter().any(|&x| x.is_nan() || x.is_infinite())
}

/// Zero out weights that cannot take part in a proportional draw
///
/// NaN, infinite and negative weights become `0.0`.
pub fn sanitize_weights(weights: &mut [f64]) {
    for w in weights.iter_mut() {
        if !w.is_finite() || *w < 0.0 {
            *w = 0.0;
        }
    }
}
