//! # Engineering Functions
//!
//! Roots, trigonometry, logarithms, exponentials and factorial. Each function
//! that has a restricted domain validates its operands before evaluating.
//!
//! ## Domain Rules
//!
//! | Function | Rule | Failure |
//! |---|---|---|
//! | `sqrt` | a ≥ 0 | `negative-sqrt` |
//! | `log10`, `ln` | a > 0 | `non-positive-log` |
//! | `log` | a > 0, base > 0, base ≠ 1 | `non-positive-log`, `invalid-log-base` |
//! | `power` | not (a = 0 and b < 0) | division by zero |
//! | `factorial` | a ≥ 0 and whole | `negative-factorial`, `non-integer-factorial` |

use crate::errors::{CalcError, CalcResult, DomainReason};
use crate::operations::AngleUnit;

/// Largest n for which n! is finite in f64
pub const MAX_FACTORIAL: u32 = 170;

// =============================================================================
// ROOTS
// =============================================================================

/// Square root
///
/// # Errors
/// `DomainError(negative-sqrt)` when `a < 0`.
///
/// # Example
/// ```rust
/// use calk_core::operations::scientific::sqrt;
///
/// assert_eq!(sqrt(9.0).unwrap(), 3.0);
/// assert!(sqrt(-4.0).is_err());
/// ```
pub fn sqrt(a: f64) -> CalcResult<f64> {
    if a < 0.0 {
        return Err(CalcError::domain("sqrt", DomainReason::NegativeSqrt));
    }
    Ok(a.sqrt())
}

// =============================================================================
// TRIGONOMETRY
// Angles are converted to radians first when given in degrees
// =============================================================================

#[inline]
pub fn sin(a: f64, unit: AngleUnit) -> f64 {
    unit.to_radians(a).sin()
}

#[inline]
pub fn cos(a: f64, unit: AngleUnit) -> f64 {
    unit.to_radians(a).cos()
}

/// Tangent. Odd multiples of 90° are not guarded and return a very large
/// finite value, as `f64::tan` does.
#[inline]
pub fn tan(a: f64, unit: AngleUnit) -> f64 {
    unit.to_radians(a).tan()
}

// =============================================================================
// LOGARITHMS AND EXPONENTIALS
// =============================================================================

fn check_log_argument(operation: &str, a: f64) -> CalcResult<()> {
    if a <= 0.0 {
        return Err(CalcError::domain(operation, DomainReason::NonPositiveLog));
    }
    Ok(())
}

/// Base-10 logarithm
pub fn log10(a: f64) -> CalcResult<f64> {
    check_log_argument("log", a)?;
    Ok(a.log10())
}

/// Natural logarithm
pub fn ln(a: f64) -> CalcResult<f64> {
    check_log_argument("ln", a)?;
    Ok(a.ln())
}

/// Logarithm of `a` in an arbitrary `base`
///
/// # Formula
/// log_base(a) = ln(a) / ln(base)
///
/// # Errors
/// - `DomainError(non-positive-log)` when `a ≤ 0` (checked first)
/// - `DomainError(invalid-log-base)` when `base ≤ 0` or `base = 1`
///
/// # Example
/// ```rust
/// use calk_core::operations::scientific::log;
///
/// assert!((log(8.0, 2.0).unwrap() - 3.0).abs() < 1e-12);
/// assert!(log(8.0, 1.0).is_err());
/// ```
pub fn log(a: f64, base: f64) -> CalcResult<f64> {
    check_log_argument("log_base", a)?;
    if base <= 0.0 || base == 1.0 {
        return Err(CalcError::domain("log_base", DomainReason::InvalidLogBase));
    }
    Ok(a.ln() / base.ln())
}

/// e raised to `a`
///
/// # Errors
/// `Overflow` when a finite `a` produces an infinite result (a > ~709.78).
pub fn exp(a: f64) -> CalcResult<f64> {
    let result = a.exp();
    if result.is_infinite() && a.is_finite() {
        return Err(CalcError::overflow("exp"));
    }
    Ok(result)
}

/// `a` raised to the power `b`
///
/// - 0^0 = 1 by convention
/// - A negative base with a fractional exponent is not guarded; the result is
///   whatever `powf` yields (NaN)
///
/// # Errors
/// - `DivisionByZero` when `a = 0` and `b < 0`
/// - `Overflow` when finite operands produce an infinite result
///
/// # Example
/// ```rust
/// use calk_core::operations::scientific::power;
///
/// assert_eq!(power(2.0, 10.0).unwrap(), 1024.0);
/// assert_eq!(power(0.0, 0.0).unwrap(), 1.0);
/// assert!(power(0.0, -1.0).is_err());
/// ```
pub fn power(a: f64, b: f64) -> CalcResult<f64> {
    if a == 0.0 && b < 0.0 {
        return Err(CalcError::division_by_zero("power"));
    }
    let result = a.powf(b);
    if result.is_infinite() && a.is_finite() && b.is_finite() {
        return Err(CalcError::overflow("power"));
    }
    Ok(result)
}

// =============================================================================
// FACTORIAL
// =============================================================================

/// Factorial of a whole, non-negative number
///
/// Computed by repeated multiplication in f64, which is exact up to 22!.
///
/// # Errors
/// - `DomainError(negative-factorial)` when `a < 0`
/// - `DomainError(non-integer-factorial)` when `a` has a fractional part
///   (NaN and infinities included)
/// - `Overflow` when `a > 170`
///
/// # Example
/// ```rust
/// use calk_core::operations::scientific::factorial;
///
/// assert_eq!(factorial(5.0).unwrap(), 120.0);
/// assert!(factorial(3.5).is_err());
/// ```
pub fn factorial(a: f64) -> CalcResult<f64> {
    if a < 0.0 {
        return Err(CalcError::domain("factorial", DomainReason::NegativeFactorial));
    }
    if !a.is_finite() || a.fract() != 0.0 {
        return Err(CalcError::domain("factorial", DomainReason::NonIntegerFactorial));
    }
    if a > f64::from(MAX_FACTORIAL) {
        return Err(CalcError::overflow("factorial"));
    }

    // Bounded by MAX_FACTORIAL above, so the cast is lossless
    let n = a as u32;
    Ok((2..=n).fold(1.0, |acc, k| acc * f64::from(k)))
}
