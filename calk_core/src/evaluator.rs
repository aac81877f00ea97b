//! # Evaluator
//!
//! The single entry point of the engine: take an operation identifier and two
//! raw operand strings, return a number or a classified error.
//!
//! ## Evaluation Order
//!
//! 1. Normalize operand "a" (failure → `InvalidInput`, operand a)
//! 2. Normalize operand "b" (failure → `InvalidInput`, operand b)
//! 3. Look up the identifier (missing → `UnknownOperation`)
//! 4. Invoke the library function; domain failures pass through unchanged
//!
//! The evaluator is stateless. Each call reads only its arguments and the
//! immutable registry, so identical inputs always give bit-identical results
//! and calls may run concurrently from any thread.
//!
//! ## Example
//!
//! ```rust
//! use calk_core::errors::ErrorKind;
//! use calk_core::evaluate;
//!
//! assert_eq!(evaluate("add", "2", "3").unwrap(), 5.0);
//! assert_eq!(evaluate("div", "1", "0").unwrap_err().kind, ErrorKind::DivisionByZero);
//! ```

use std::any::Any;
use std::panic;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult, ErrorInfo};
use crate::input::normalize_pair;
use crate::registry::{self, OperationDescriptor};

/// A single calculator request as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRequest {
    /// Operation identifier (e.g. "add")
    pub operation: String,
    /// Raw text of operand "a"
    #[serde(default)]
    pub a: String,
    /// Raw text of operand "b"; absent behaves like an empty field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<String>,
}

impl OperationRequest {
    pub fn new(operation: impl Into<String>, a: impl Into<String>) -> Self {
        OperationRequest {
            operation: operation.into(),
            a: a.into(),
            b: None,
        }
    }

    pub fn with_b(mut self, b: impl Into<String>) -> Self {
        self.b = Some(b.into());
        self
    }

    /// Evaluate this request
    pub fn evaluate(&self) -> OperationResult {
        evaluate(&self.operation, &self.a, self.b.as_deref().unwrap_or("")).into()
    }
}

/// Outcome of one evaluation: a value or an error, never both.
///
/// JSON has no literal for infinity or NaN, so non-finite values are written
/// as the strings `"inf"`, `"-inf"` and `"NaN"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OperationResult {
    Value {
        #[serde(with = "float_repr")]
        value: f64,
    },
    Error(ErrorInfo),
}

impl OperationResult {
    pub fn value(&self) -> Option<f64> {
        match self {
            OperationResult::Value { value } => Some(*value),
            OperationResult::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            OperationResult::Value { .. } => None,
            OperationResult::Error(info) => Some(info),
        }
    }
}

mod float_repr {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_sign_positive() {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(FloatVisitor)
    }

    struct FloatVisitor;

    impl Visitor<'_> for FloatVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(r#"a number or one of "inf", "-inf", "NaN""#)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            match v {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "NaN" => Ok(f64::NAN),
                _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
            }
        }
    }
}

impl From<Result<f64, ErrorInfo>> for OperationResult {
    fn from(result: Result<f64, ErrorInfo>) -> Self {
        match result {
            Ok(value) => OperationResult::Value { value },
            Err(info) => OperationResult::Error(info),
        }
    }
}

/// Evaluate `operation` on the raw operand texts.
///
/// Never panics: every failure, including an unexpected panic inside an
/// operation, comes back as an [`ErrorInfo`].
pub fn evaluate(operation: &str, a: &str, b: &str) -> Result<f64, ErrorInfo> {
    try_evaluate(operation, a, b).map_err(ErrorInfo::from)
}

/// Same as [`evaluate`] but keeps the full [`CalcError`].
pub fn try_evaluate(operation: &str, a: &str, b: &str) -> CalcResult<f64> {
    log::debug!("evaluate operation={:?} a={:?} b={:?}", operation, a, b);

    let (a, b) = normalize_pair(a, b).inspect_err(|e| log::debug!("rejected input: {}", e))?;

    let descriptor = registry::lookup(operation).ok_or_else(|| {
        log::debug!("unknown operation {:?}", operation);
        CalcError::unknown_operation(operation)
    })?;

    let result = invoke(descriptor, a, b);
    match &result {
        Ok(value) => log::debug!("{}({}, {}) = {}", descriptor.id, a, b, value),
        Err(e) => log::debug!("{}({}, {}) failed: {}", descriptor.id, a, b, e),
    }
    result
}

/// Apply the operation, turning a panic into `CalculationFailed`.
fn invoke(descriptor: &OperationDescriptor, a: f64, b: f64) -> CalcResult<f64> {
    panic::catch_unwind(|| descriptor.apply(a, b)).unwrap_or_else(|payload| {
        let reason = panic_message(payload.as_ref());
        log::error!("operation '{}' panicked: {}", descriptor.id, reason);
        Err(CalcError::calculation_failed(descriptor.id, reason))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected internal error".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{DomainReason, ErrorKind, FailureCause, Operand};
    use crate::registry::{Operation, OperationFn};

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(evaluate("add", "1", "2").unwrap(), 3.0);
        assert_eq!(evaluate("sub", "5", "3").unwrap(), 2.0);
        assert_eq!(evaluate("mul", "2", "3").unwrap(), 6.0);
        assert_eq!(evaluate("div", "10", "2").unwrap(), 5.0);
    }

    #[test]
    fn test_empty_operand_is_zero() {
        assert_eq!(evaluate("add", "", "5").unwrap(), 5.0);
        assert_eq!(evaluate("add", "", "").unwrap(), 0.0);
    }

    #[test]
    fn test_invalid_operand_position() {
        let err = evaluate("add", "abc", "5").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
        assert_eq!(err.operand, Some(Operand::A));

        let err = evaluate("add", "5", "abc").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
        assert_eq!(err.operand, Some(Operand::B));
    }

    #[test]
    fn test_operand_b_validated_for_unary() {
        let err = evaluate("sqrt", "9", "junk").unwrap_err();
        assert_eq!(err.operand, Some(Operand::B));
    }

    #[test]
    fn test_input_checked_before_lookup() {
        let err = evaluate("bogus_op", "abc", "1").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
    }

    #[test]
    fn test_unknown_operation() {
        let err = evaluate("bogus_op", "1", "2").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownOperation);
        assert_eq!(err.detail.as_deref(), Some("bogus_op"));
    }

    #[test]
    fn test_domain_errors_forwarded() {
        let err = evaluate("sqrt", "-4", "").unwrap_err();
        assert_eq!(err.kind, ErrorKind::DomainError);
        assert_eq!(err.domain_reason(), Some(DomainReason::NegativeSqrt));

        let err = evaluate("log_base", "8", "1").unwrap_err();
        assert_eq!(err.domain_reason(), Some(DomainReason::InvalidLogBase));
    }

    #[test]
    fn test_division_by_zero_kinds() {
        let cases = [
            ("div", "5", "0"),
            ("div", "0", "0"),
            ("reciprocal", "0", ""),
            ("power", "0", "-1"),
        ];
        for (op, a, b) in cases {
            let err = evaluate(op, a, b).unwrap_err();
            assert_eq!(err.kind, ErrorKind::DivisionByZero, "{}({}, {})", op, a, b);
        }
    }

    #[test]
    fn test_overflow_is_calculation_error() {
        let err = evaluate("exp", "1000", "").unwrap_err();
        assert_eq!(err.kind, ErrorKind::CalculationError);
        assert_eq!(err.cause, Some(FailureCause::Overflow));
        assert_eq!(err.detail, None);
    }

    #[test]
    fn test_constants_ignore_operands() {
        assert_eq!(evaluate("pi", "", "").unwrap(), std::f64::consts::PI);
        assert_eq!(evaluate("e", "7", "8").unwrap(), std::f64::consts::E);
    }

    #[test]
    fn test_percent_variants() {
        assert_eq!(evaluate("percent", "50", "").unwrap(), 0.5);
        assert_eq!(evaluate("percent", "50", "200").unwrap(), 0.5);
        assert_eq!(evaluate("percent_of", "50", "200").unwrap(), 100.0);
    }

    #[test]
    fn test_request_evaluation() {
        let request = OperationRequest::new("power", "2").with_b("10");
        assert_eq!(request.evaluate().value(), Some(1024.0));

        let request = OperationRequest::new("negate", " 4 ");
        assert_eq!(request.evaluate(), OperationResult::Value { value: -4.0 });
    }

    #[test]
    fn test_result_serialization() {
        let ok = OperationResult::Value { value: 5.0 };
        assert_eq!(serde_json::to_string(&ok).unwrap(), r#"{"status":"value","value":5.0}"#);

        let err: OperationResult = evaluate("factorial", "3.5", "").into();
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(
            json,
            r#"{"status":"error","kind":"DomainError","reason":"non-integer-factorial"}"#
        );
        let roundtrip: OperationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, err);
    }

    #[test]
    fn test_non_finite_values_serialize() {
        let overflow = OperationRequest::new("mul", "1e308").with_b("10").evaluate();
        assert_eq!(overflow.value(), Some(f64::INFINITY));
        let json = serde_json::to_string(&overflow).unwrap();
        assert_eq!(json, r#"{"status":"value","value":"inf"}"#);
        let roundtrip: OperationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, overflow);

        let negative = OperationResult::Value { value: f64::NEG_INFINITY };
        let json = serde_json::to_string(&negative).unwrap();
        assert_eq!(json, r#"{"status":"value","value":"-inf"}"#);
        assert_eq!(serde_json::from_str::<OperationResult>(&json).unwrap(), negative);

        let nan = OperationRequest::new("power", "-8").with_b("0.3333").evaluate();
        let json = serde_json::to_string(&nan).unwrap();
        assert_eq!(json, r#"{"status":"value","value":"NaN"}"#);
        let roundtrip: OperationResult = serde_json::from_str(&json).unwrap();
        assert!(roundtrip.value().unwrap().is_nan());
    }

    #[test]
    fn test_value_deserialization() {
        let result: OperationResult =
            serde_json::from_str(r#"{"status":"value","value":7}"#).unwrap();
        assert_eq!(result.value(), Some(7.0));
        let result: OperationResult =
            serde_json::from_str(r#"{"status":"value","value":-2.5}"#).unwrap();
        assert_eq!(result.value(), Some(-2.5));

        for json in [
            r#"{"status":"value","value":"big"}"#,
            r#"{"status":"value","value":null}"#,
        ] {
            assert!(serde_json::from_str::<OperationResult>(json).is_err(), "{}", json);
        }
    }

    #[test]
    fn test_request_deserialization_defaults() {
        let request: OperationRequest =
            serde_json::from_str(r#"{"operation":"square","a":"3"}"#).unwrap();
        assert_eq!(request.b, None);
        assert_eq!(request.evaluate().value(), Some(9.0));
    }

    fn explode(_: f64) -> CalcResult<f64> {
        panic!("boom")
    }

    #[test]
    fn test_panic_becomes_calculation_error() {
        let descriptor = OperationDescriptor {
            function: OperationFn::Unary(explode),
            ..Operation::Sqrt.descriptor()
        };

        let err = invoke(&descriptor, 4.0, 0.0).unwrap_err();
        assert_eq!(
            err,
            CalcError::CalculationFailed {
                operation: "sqrt".to_string(),
                reason: "boom".to_string(),
            }
        );

        let info = ErrorInfo::from(err);
        assert_eq!(info.kind, ErrorKind::CalculationError);
        assert_eq!(info.cause, Some(FailureCause::Internal));
        assert_eq!(info.detail.as_deref(), Some("boom"));
    }

    #[test]
    fn test_invoke_passes_results_through() {
        let descriptor = Operation::Sqrt.descriptor();
        assert_eq!(invoke(&descriptor, 9.0, 0.0), Ok(3.0));
        assert_eq!(
            invoke(&descriptor, -1.0, 0.0),
            Err(CalcError::domain("sqrt", DomainReason::NegativeSqrt))
        );
    }

    #[test]
    fn test_panic_message_extraction() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "unexpected internal error");
    }
}
