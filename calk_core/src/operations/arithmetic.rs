//! # Basic Arithmetic
//!
//! Two-operand arithmetic and the simple single-operand helpers found on a
//! calculator keypad. Only division and reciprocal can fail.

use crate::errors::{CalcError, CalcResult};

// =============================================================================
// BINARY OPERATIONS
// =============================================================================

#[inline]
pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

#[inline]
pub fn sub(a: f64, b: f64) -> f64 {
    a - b
}

#[inline]
pub fn mul(a: f64, b: f64) -> f64 {
    a * b
}

/// Divide `a` by `b`
///
/// # Errors
/// `DivisionByZero` when `b` is zero (either sign), regardless of `a`.
///
/// # Example
/// ```rust
/// use calk_core::operations::arithmetic::div;
///
/// assert_eq!(div(10.0, 2.0).unwrap(), 5.0);
/// assert!(div(0.0, 0.0).is_err());
/// ```
pub fn div(a: f64, b: f64) -> CalcResult<f64> {
    if b == 0.0 {
        return Err(CalcError::division_by_zero("div"));
    }
    Ok(a / b)
}

/// Percentage of a total
///
/// # Formula
/// a% of total = a / 100 × total
///
/// ```rust
/// use calk_core::operations::arithmetic::percent_of;
///
/// assert_eq!(percent_of(150.0, 100.0), 150.0);
/// assert_eq!(percent_of(50.0, 0.0), 0.0);
/// ```
#[inline]
pub fn percent_of(a: f64, total: f64) -> f64 {
    a / 100.0 * total
}

// =============================================================================
// UNARY OPERATIONS
// =============================================================================

#[inline]
pub fn square(a: f64) -> f64 {
    a * a
}

/// Reciprocal 1/a
///
/// # Errors
/// `DivisionByZero` when `a` is zero.
pub fn reciprocal(a: f64) -> CalcResult<f64> {
    if a == 0.0 {
        return Err(CalcError::division_by_zero("reciprocal"));
    }
    Ok(1.0 / a)
}

/// Percent key: a / 100
#[inline]
pub fn percent(a: f64) -> f64 {
    a / 100.0
}

#[inline]
pub fn negate(a: f64) -> f64 {
    -a
}
