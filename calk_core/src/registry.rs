//! # Operation Registry
//!
//! Central registry of every operation the calculator understands. Each
//! operation has a stable string identifier (the token a form or CLI sends),
//! an arity, an angle convention and the library function implementing it.
//!
//! ## Architecture
//!
//! The registry provides:
//! - Type-safe operation identification via the `Operation` enum
//! - An immutable descriptor per operation, built once on first use
//! - Exact-match lookup by identifier that returns `None` for unknown tokens
//!
//! ## Usage
//!
//! ```rust
//! use calk_core::registry::{lookup, Arity, Operation};
//!
//! let desc = lookup("sqrt").expect("sqrt is registered");
//! assert_eq!(desc.operation, Operation::Sqrt);
//! assert_eq!(desc.arity, Arity::Unary);
//! assert_eq!(desc.apply(9.0, 0.0).unwrap(), 3.0);
//!
//! assert!(lookup("bogus_op").is_none());
//! ```

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::operations::{arithmetic, constants, scientific, AngleUnit};

// ============================================================================
// Arity and Angle Convention
// ============================================================================

/// Number of operands an operation consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arity {
    /// No operands (constants)
    Niladic,
    /// Uses operand "a" only; "b" is ignored
    Unary,
    /// Uses both operands
    Binary,
}

impl Arity {
    pub fn operand_count(&self) -> usize {
        match self {
            Arity::Niladic => 0,
            Arity::Unary => 1,
            Arity::Binary => 2,
        }
    }
}

/// How an operation interprets an angle operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleConvention {
    Degrees,
    Radians,
    /// Operation does not take an angle
    NotApplicable,
}

impl AngleConvention {
    /// Angle unit passed to trigonometric functions
    pub fn unit(&self) -> Option<AngleUnit> {
        match self {
            AngleConvention::Degrees => Some(AngleUnit::Degrees),
            AngleConvention::Radians => Some(AngleUnit::Radians),
            AngleConvention::NotApplicable => None,
        }
    }
}

// ============================================================================
// Operation Categories
// ============================================================================

/// Grouping used when listing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationCategory {
    /// add, sub, mul, div
    Basic,
    /// square, reciprocal, percent, negate
    Keypad,
    /// sqrt, power, exponentials, logarithms, factorial
    Engineering,
    /// sin, cos, tan
    Trigonometry,
    /// pi, e
    Constants,
}

impl OperationCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            OperationCategory::Basic => "Basic",
            OperationCategory::Keypad => "Keypad",
            OperationCategory::Engineering => "Engineering",
            OperationCategory::Trigonometry => "Trigonometry",
            OperationCategory::Constants => "Constants",
        }
    }

    /// Sort order for listings (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            OperationCategory::Basic => 1,
            OperationCategory::Keypad => 2,
            OperationCategory::Engineering => 3,
            OperationCategory::Trigonometry => 4,
            OperationCategory::Constants => 5,
        }
    }
}

// ============================================================================
// Operation Functions
// ============================================================================

/// Reference to the library function implementing an operation.
///
/// The variant fixes the shape of the call, so the arity of an operation is
/// always derived from its function and can never disagree with it.
#[derive(Clone, Copy)]
pub enum OperationFn {
    Constant(fn() -> f64),
    Unary(fn(f64) -> CalcResult<f64>),
    Binary(fn(f64, f64) -> CalcResult<f64>),
    /// Unary function of an angle in the given unit
    Angle(fn(f64, AngleUnit) -> f64),
}

impl OperationFn {
    pub fn arity(&self) -> Arity {
        match self {
            OperationFn::Constant(_) => Arity::Niladic,
            OperationFn::Unary(_) | OperationFn::Angle(_) => Arity::Unary,
            OperationFn::Binary(_) => Arity::Binary,
        }
    }
}

impl fmt::Debug for OperationFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = match self {
            OperationFn::Constant(_) => "Constant",
            OperationFn::Unary(_) => "Unary",
            OperationFn::Binary(_) => "Binary",
            OperationFn::Angle(_) => "Angle",
        };
        write!(f, "OperationFn::{}", shape)
    }
}

// ============================================================================
// Operation Descriptor
// ============================================================================

/// Immutable description of a registered operation.
#[derive(Debug, Clone, Copy)]
pub struct OperationDescriptor {
    pub operation: Operation,
    /// Stable identifier (e.g. "add", "log_base")
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Plain-text formula for listings
    pub formula: &'static str,
    pub arity: Arity,
    pub angle: AngleConvention,
    pub category: OperationCategory,
    pub function: OperationFn,
}

impl OperationDescriptor {
    fn new(
        operation: Operation,
        name: &'static str,
        formula: &'static str,
        category: OperationCategory,
        function: OperationFn,
    ) -> Self {
        OperationDescriptor {
            operation,
            id: operation.id(),
            name,
            formula,
            arity: function.arity(),
            angle: AngleConvention::NotApplicable,
            category,
            function,
        }
    }

    fn with_angle(mut self, angle: AngleConvention) -> Self {
        self.angle = angle;
        self
    }

    /// Invoke the operation on normalized operands.
    ///
    /// Unary operations ignore `b`; constants ignore both. Domain failures
    /// come straight from the library function.
    pub fn apply(&self, a: f64, b: f64) -> CalcResult<f64> {
        match self.function {
            OperationFn::Constant(f) => Ok(f()),
            OperationFn::Unary(f) => f(a),
            OperationFn::Binary(f) => f(a, b),
            OperationFn::Angle(f) => Ok(f(a, self.angle.unit().unwrap_or_default())),
        }
    }
}

// ============================================================================
// Operation Enum
// ============================================================================

/// All operations understood by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    // Basic
    Add,
    Sub,
    Mul,
    Div,

    // Keypad
    Square,
    Reciprocal,
    Percent,
    PercentOf,
    Negate,

    // Engineering
    Sqrt,
    Power,
    Exp,
    #[serde(rename = "log")]
    Log10,
    Ln,
    LogBase,
    Factorial,

    // Trigonometry (degrees, then radians)
    Sin,
    Cos,
    Tan,
    SinRad,
    CosRad,
    TanRad,

    // Constants
    Pi,
    E,
}

impl Operation {
    /// Stable identifier used by callers
    pub fn id(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Sub => "sub",
            Operation::Mul => "mul",
            Operation::Div => "div",
            Operation::Square => "square",
            Operation::Reciprocal => "reciprocal",
            Operation::Percent => "percent",
            Operation::PercentOf => "percent_of",
            Operation::Negate => "negate",
            Operation::Sqrt => "sqrt",
            Operation::Power => "power",
            Operation::Exp => "exp",
            Operation::Log10 => "log",
            Operation::Ln => "ln",
            Operation::LogBase => "log_base",
            Operation::Factorial => "factorial",
            Operation::Sin => "sin",
            Operation::Cos => "cos",
            Operation::Tan => "tan",
            Operation::SinRad => "sin_rad",
            Operation::CosRad => "cos_rad",
            Operation::TanRad => "tan_rad",
            Operation::Pi => "pi",
            Operation::E => "e",
        }
    }

    /// Find an operation by exact identifier
    pub fn from_id(id: &str) -> Option<Operation> {
        lookup(id).map(|desc| desc.operation)
    }

    /// Build the descriptor for this operation
    pub fn descriptor(&self) -> OperationDescriptor {
        use OperationCategory::*;
        use OperationFn::*;

        let desc = |name, formula, category, function| {
            OperationDescriptor::new(*self, name, formula, category, function)
        };

        match self {
            Operation::Add => {
                desc("Addition", "a + b", Basic, Binary(|a, b| Ok(arithmetic::add(a, b))))
            }
            Operation::Sub => {
                desc("Subtraction", "a - b", Basic, Binary(|a, b| Ok(arithmetic::sub(a, b))))
            }
            Operation::Mul => {
                desc("Multiplication", "a * b", Basic, Binary(|a, b| Ok(arithmetic::mul(a, b))))
            }
            Operation::Div => desc("Division", "a / b", Basic, Binary(arithmetic::div)),

            Operation::Square => {
                desc("Square", "a^2", Keypad, Unary(|a| Ok(arithmetic::square(a))))
            }
            Operation::Reciprocal => {
                desc("Reciprocal", "1 / a", Keypad, Unary(arithmetic::reciprocal))
            }
            Operation::Percent => {
                desc("Percent", "a / 100", Keypad, Unary(|a| Ok(arithmetic::percent(a))))
            }
            Operation::PercentOf => desc(
                "Percent of Total",
                "a / 100 * b",
                Keypad,
                Binary(|a, b| Ok(arithmetic::percent_of(a, b))),
            ),
            Operation::Negate => {
                desc("Negate", "-a", Keypad, Unary(|a| Ok(arithmetic::negate(a))))
            }

            Operation::Sqrt => desc("Square Root", "sqrt(a)", Engineering, Unary(scientific::sqrt)),
            Operation::Power => desc("Power", "a^b", Engineering, Binary(scientific::power)),
            Operation::Exp => desc("Exponential", "e^a", Engineering, Unary(scientific::exp)),
            Operation::Log10 => {
                desc("Common Logarithm", "log10(a)", Engineering, Unary(scientific::log10))
            }
            Operation::Ln => desc("Natural Logarithm", "ln(a)", Engineering, Unary(scientific::ln)),
            Operation::LogBase => desc(
                "Logarithm",
                "log_b(a) = ln(a) / ln(b)",
                Engineering,
                Binary(scientific::log),
            ),
            Operation::Factorial => {
                desc("Factorial", "a!", Engineering, Unary(scientific::factorial))
            }

            Operation::Sin => desc("Sine", "sin(a°)", Trigonometry, Angle(scientific::sin))
                .with_angle(AngleConvention::Degrees),
            Operation::Cos => desc("Cosine", "cos(a°)", Trigonometry, Angle(scientific::cos))
                .with_angle(AngleConvention::Degrees),
            Operation::Tan => desc("Tangent", "tan(a°)", Trigonometry, Angle(scientific::tan))
                .with_angle(AngleConvention::Degrees),
            Operation::SinRad => {
                desc("Sine (radians)", "sin(a)", Trigonometry, Angle(scientific::sin))
                    .with_angle(AngleConvention::Radians)
            }
            Operation::CosRad => {
                desc("Cosine (radians)", "cos(a)", Trigonometry, Angle(scientific::cos))
                    .with_angle(AngleConvention::Radians)
            }
            Operation::TanRad => {
                desc("Tangent (radians)", "tan(a)", Trigonometry, Angle(scientific::tan))
                    .with_angle(AngleConvention::Radians)
            }

            Operation::Pi => desc("Pi", "π", Constants, Constant(constants::pi)),
            Operation::E => desc("Euler's Number", "e", Constants, Constant(constants::e)),
        }
    }

    /// Get all operations with the given arity
    pub fn in_arity(arity: Arity) -> Vec<Operation> {
        ALL_OPERATIONS
            .iter()
            .filter(|op| op.descriptor().arity == arity)
            .copied()
            .collect()
    }

    /// Get all operations in a given category
    pub fn in_category(category: OperationCategory) -> Vec<Operation> {
        ALL_OPERATIONS
            .iter()
            .filter(|op| op.descriptor().category == category)
            .copied()
            .collect()
    }

    /// All categories, sorted for listings
    pub fn all_categories() -> Vec<OperationCategory> {
        use OperationCategory::*;
        let mut cats = vec![Basic, Keypad, Engineering, Trigonometry, Constants];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// All operations in the registry (for iteration)
pub static ALL_OPERATIONS: &[Operation] = &[
    // Basic
    Operation::Add,
    Operation::Sub,
    Operation::Mul,
    Operation::Div,
    // Keypad
    Operation::Square,
    Operation::Reciprocal,
    Operation::Percent,
    Operation::PercentOf,
    Operation::Negate,
    // Engineering
    Operation::Sqrt,
    Operation::Power,
    Operation::Exp,
    Operation::Log10,
    Operation::Ln,
    Operation::LogBase,
    Operation::Factorial,
    // Trigonometry
    Operation::Sin,
    Operation::Cos,
    Operation::Tan,
    Operation::SinRad,
    Operation::CosRad,
    Operation::TanRad,
    // Constants
    Operation::Pi,
    Operation::E,
];

static REGISTRY: Lazy<HashMap<&'static str, OperationDescriptor>> = Lazy::new(|| {
    let registry: HashMap<_, _> = ALL_OPERATIONS
        .iter()
        .map(|op| (op.id(), op.descriptor()))
        .collect();
    log::trace!("operation registry initialised with {} entries", registry.len());
    registry
});

/// Look up an operation descriptor by exact identifier.
///
/// Identifiers are untrusted user input: unknown tokens return `None`.
pub fn lookup(id: &str) -> Option<&'static OperationDescriptor> {
    REGISTRY.get(id)
}

/// Iterate over all descriptors in registry order
pub fn descriptors() -> impl Iterator<Item = &'static OperationDescriptor> {
    ALL_OPERATIONS.iter().filter_map(|op| lookup(op.id()))
}

// ============================================================================
// Tests
// ============================================================================
