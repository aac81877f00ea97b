//! # Error Types
//!
//! Structured error types for calk_core. Every failure is classified at the
//! point where it is detected, so callers (a web layer, the CLI, a test) can
//! pick a user-facing message from the kind and sub-reason without ever
//! inspecting message text.
//!
//! ## Example
//!
//! ```rust
//! use calk_core::errors::{CalcError, CalcResult, DomainReason};
//!
//! fn checked_sqrt(a: f64) -> CalcResult<f64> {
//!     if a < 0.0 {
//!         return Err(CalcError::domain("sqrt", DomainReason::NegativeSqrt));
//!     }
//!     Ok(a.sqrt())
//! }
//!
//! let err = checked_sqrt(-4.0).unwrap_err();
//! assert_eq!(err.error_code(), "DOMAIN_ERROR");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calk_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Which raw operand an input failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operand {
    /// First operand ("a")
    A,
    /// Second operand ("b")
    B,
}

impl Operand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operand::A => "a",
            Operand::B => "b",
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-reason for a mathematical domain violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DomainReason {
    /// Square root of a negative number
    NegativeSqrt,
    /// Logarithm of zero or a negative number
    NonPositiveLog,
    /// Logarithm base that is non-positive or exactly 1
    InvalidLogBase,
    /// Factorial of a negative number
    NegativeFactorial,
    /// Factorial of a value with a fractional part
    NonIntegerFactorial,
}

impl DomainReason {
    /// Stable token, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainReason::NegativeSqrt => "negative-sqrt",
            DomainReason::NonPositiveLog => "non-positive-log",
            DomainReason::InvalidLogBase => "invalid-log-base",
            DomainReason::NegativeFactorial => "negative-factorial",
            DomainReason::NonIntegerFactorial => "non-integer-factorial",
        }
    }

    /// English description, used by the `Display` impl of [`CalcError`]
    pub fn description(&self) -> &'static str {
        match self {
            DomainReason::NegativeSqrt => "square root of a negative number",
            DomainReason::NonPositiveLog => "logarithm of a non-positive number",
            DomainReason::InvalidLogBase => "logarithm base must be positive and not equal to 1",
            DomainReason::NegativeFactorial => "factorial of a negative number",
            DomainReason::NonIntegerFactorial => "factorial of a non-integer",
        }
    }
}

impl fmt::Display for DomainReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured error type for calculator operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Operand text is not a decimal or scientific-notation numeral
    #[error("Invalid input for {operand}: '{value}' - {reason}")]
    InvalidInput {
        operand: Operand,
        value: String,
        reason: String,
    },

    /// Division, reciprocal of zero, or zero raised to a negative power
    #[error("Division by zero in '{operation}'")]
    DivisionByZero { operation: String },

    /// Operand outside the mathematical domain of the operation
    #[error("Domain error in '{operation}': {}", .reason.description())]
    Domain {
        operation: String,
        reason: DomainReason,
    },

    /// Identifier not present in the operation registry
    #[error("Unknown operation: '{operation}'")]
    UnknownOperation { operation: String },

    /// Finite operands produced a result too large for f64
    #[error("Overflow in '{operation}': result is too large")]
    Overflow { operation: String },

    /// Unexpected failure while evaluating (should be rare)
    #[error("Calculation failed: {operation} - {reason}")]
    CalculationFailed { operation: String, reason: String },

    /// File I/O error (settings files)
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Settings file schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        operand: Operand,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            operand,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a DivisionByZero error
    pub fn division_by_zero(operation: impl Into<String>) -> Self {
        CalcError::DivisionByZero {
            operation: operation.into(),
        }
    }

    /// Create a Domain error
    pub fn domain(operation: impl Into<String>, reason: DomainReason) -> Self {
        CalcError::Domain {
            operation: operation.into(),
            reason,
        }
    }

    /// Create an UnknownOperation error
    pub fn unknown_operation(operation: impl Into<String>) -> Self {
        CalcError::UnknownOperation {
            operation: operation.into(),
        }
    }

    /// Create an Overflow error
    pub fn overflow(operation: impl Into<String>) -> Self {
        CalcError::Overflow {
            operation: operation.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Coarse category for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::InvalidInput { .. } => ErrorKind::InvalidInput,
            CalcError::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            CalcError::Domain { .. } => ErrorKind::DomainError,
            CalcError::UnknownOperation { .. } => ErrorKind::UnknownOperation,
            CalcError::Overflow { .. }
            | CalcError::CalculationFailed { .. }
            | CalcError::FileError { .. }
            | CalcError::SerializationError { .. }
            | CalcError::VersionMismatch { .. } => ErrorKind::CalculationError,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::DivisionByZero { .. } => "DIVISION_BY_ZERO",
            CalcError::Domain { .. } => "DOMAIN_ERROR",
            CalcError::UnknownOperation { .. } => "UNKNOWN_OPERATION",
            CalcError::Overflow { .. } => "OVERFLOW",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

/// Error categories exposed to callers of [`crate::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidInput,
    DivisionByZero,
    DomainError,
    UnknownOperation,
    /// Catch-all for overflow and unexpected internal failures
    CalculationError,
}

/// Sub-reason for a `CalculationError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureCause {
    /// Finite operands produced a result too large for f64
    Overflow,
    /// Panic or other unexpected failure inside an operation
    Internal,
}

/// Flattened error description returned by [`crate::evaluate`].
///
/// `reason` and `cause` are set where the failure is detected; `detail` is
/// free text for humans (the unknown identifier, a panic message) and is
/// never inspected to classify the error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    /// Domain sub-reason, only for `DomainError`
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reason: Option<DomainReason>,
    /// Failure sub-reason, only for `CalculationError`
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cause: Option<FailureCause>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub operand: Option<Operand>,
}

impl ErrorInfo {
    pub fn new(kind: ErrorKind) -> Self {
        ErrorInfo {
            kind,
            reason: None,
            cause: None,
            detail: None,
            operand: None,
        }
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn domain_reason(&self) -> Option<DomainReason> {
        self.reason
    }

    pub fn is_overflow(&self) -> bool {
        self.cause == Some(FailureCause::Overflow)
    }

    /// Stable key a localisation layer can map to a user-facing message.
    ///
    /// ```rust
    /// use calk_core::evaluate;
    ///
    /// let err = evaluate("add", "5", "abc").unwrap_err();
    /// assert_eq!(err.message_key(), "invalid_input_b");
    /// ```
    pub fn message_key(&self) -> &'static str {
        match self.kind {
            ErrorKind::InvalidInput => match self.operand {
                Some(Operand::B) => "invalid_input_b",
                _ => "invalid_input_a",
            },
            ErrorKind::DivisionByZero => "division_by_zero",
            ErrorKind::DomainError => match self.reason {
                Some(DomainReason::NegativeSqrt) => "negative_sqrt",
                Some(DomainReason::NonPositiveLog) => "non_positive_log",
                Some(DomainReason::InvalidLogBase) => "invalid_log_base",
                Some(DomainReason::NegativeFactorial) => "negative_factorial",
                Some(DomainReason::NonIntegerFactorial) => "non_integer_factorial",
                None => "domain_error",
            },
            ErrorKind::UnknownOperation => "unknown_operation",
            ErrorKind::CalculationError => match self.cause {
                Some(FailureCause::Overflow) => "overflow",
                _ => "calculation_error",
            },
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(operand) = self.operand {
            write!(f, " (operand {})", operand)?;
        }
        if let Some(reason) = self.reason {
            write!(f, ": {}", reason)?;
        }
        if self.is_overflow() {
            f.write_str(": overflow")?;
        }
        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

impl From<CalcError> for ErrorInfo {
    fn from(err: CalcError) -> Self {
        let mut info = ErrorInfo::new(err.kind());
        match err {
            CalcError::InvalidInput { operand, .. } => info.operand = Some(operand),
            CalcError::DivisionByZero { .. } => {}
            CalcError::Domain { reason, .. } => info.reason = Some(reason),
            CalcError::UnknownOperation { operation } => info = info.with_detail(operation),
            CalcError::Overflow { .. } => info.cause = Some(FailureCause::Overflow),
            CalcError::CalculationFailed { reason, .. } => {
                info.cause = Some(FailureCause::Internal);
                info = info.with_detail(reason);
            }
            other @ (CalcError::FileError { .. }
            | CalcError::SerializationError { .. }
            | CalcError::VersionMismatch { .. }) => info = info.with_detail(other.to_string()),
        }
        info
    }
}
