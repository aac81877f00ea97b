//! # Mathematical Constants
//!
//! Niladic operations: they ignore both operands.

/// Archimedes' constant π
#[inline]
pub fn pi() -> f64 {
    std::f64::consts::PI
}

/// Euler's number e
#[inline]
pub fn e() -> f64 {
    std::f64::consts::E
}
