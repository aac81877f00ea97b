//! # Input Normalization
//!
//! Converts raw operand text (as typed into a form field or passed on the
//! command line) into `f64` operands.
//!
//! ## Rules
//!
//! - Leading and trailing whitespace is trimmed
//! - An empty string is exactly `0.0`
//! - Anything else must parse as a decimal or scientific literal
//!   (`"42"`, `"-3.5"`, `"+1.5e10"`, `".5"`)
//! - Non-numeric text is an `InvalidInput` error, never zero
//!
//! ## Example
//!
//! ```rust
//! use calk_core::errors::Operand;
//! use calk_core::input::normalize;
//!
//! assert_eq!(normalize("  2.5 ", Operand::A).unwrap(), 2.5);
//! assert_eq!(normalize("", Operand::B).unwrap(), 0.0);
//! assert!(normalize("abc", Operand::A).is_err());
//! ```

use crate::errors::{CalcError, CalcResult, Operand};

/// Normalize a single raw operand.
pub fn normalize(raw: &str, operand: Operand) -> CalcResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    trimmed
        .parse::<f64>()
        .map_err(|e| CalcError::invalid_input(operand, trimmed, e.to_string()))
}

/// Normalize both operands, `a` first.
///
/// Stops at the first failure: if `a` is invalid, `b` is never parsed.
pub fn normalize_pair(a: &str, b: &str) -> CalcResult<(f64, f64)> {
    let a = normalize(a, Operand::A)?;
    let b = normalize(b, Operand::B)?;
    Ok((a, b))
}
