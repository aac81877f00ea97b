//! # Numeric Operation Library
//!
//! Pure functions implementing every calculator operation. Functions that have
//! a restricted mathematical domain check it themselves and return a
//! [`CalcError`](crate::errors::CalcError) carrying the exact failure kind;
//! the dispatcher never re-derives these checks.
//!
//! ## Modules
//!
//! - [`arithmetic`] - add, sub, mul, div, square, reciprocal, percent, negate
//! - [`scientific`] - sqrt, trigonometry, logarithms, exp, power, factorial
//! - [`constants`] - pi and e
//!
//! ## Floating-Point Conventions
//!
//! - Operands and results are IEEE-754 `f64`
//! - Plain arithmetic follows IEEE-754 (`inf + 5 = inf`)
//! - `exp`, `power` and `factorial` report overflow when finite inputs
//!   produce an infinite result

pub mod arithmetic;
pub mod constants;
pub mod scientific;

use serde::{Deserialize, Serialize};

pub use arithmetic::{add, div, mul, negate, percent, percent_of, reciprocal, square, sub};
pub use constants::{e, pi};
pub use scientific::{cos, exp, factorial, ln, log, log10, power, sin, sqrt, tan};

/// Unit of an angle operand for the trigonometric functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    /// Converted to radians before evaluation
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    /// Convert an angle in this unit to radians
    #[inline]
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleUnit::Degrees => angle.to_radians(),
            AngleUnit::Radians => angle,
        }
    }
}
