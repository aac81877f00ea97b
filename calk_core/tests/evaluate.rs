//! End-to-end checks of `calk_core::evaluate` through the public API.

use std::thread;

use calk_core::{evaluate, DomainReason, ErrorKind, Operand, OperationRequest, ALL_OPERATIONS};

const SAMPLES: &[f64] = &[0.0, 1.0, -1.0, 2.5, -3.75, 1e-8, 12345.678, -9.5e12];

fn text(x: f64) -> String {
    // Debug output of f64 always round-trips
    format!("{:?}", x)
}

#[test]
fn arithmetic_matches_native_operators() {
    for &a in SAMPLES {
        for &b in SAMPLES {
            let (ta, tb) = (text(a), text(b));
            assert_eq!(evaluate("add", &ta, &tb).unwrap(), a + b);
            assert_eq!(evaluate("sub", &ta, &tb).unwrap(), a - b);
            assert_eq!(evaluate("mul", &ta, &tb).unwrap(), a * b);
            assert_eq!(evaluate("add", &ta, &tb), evaluate("add", &tb, &ta));
            assert_eq!(evaluate("mul", &ta, &tb), evaluate("mul", &tb, &ta));
        }
    }
}

#[test]
fn division_by_zero_for_every_numerator() {
    for &a in SAMPLES {
        let err = evaluate("div", &text(a), "0").unwrap_err();
        assert_eq!(err.kind, ErrorKind::DivisionByZero);
    }
    // Empty divisor normalizes to zero
    assert_eq!(evaluate("div", "7", "").unwrap_err().kind, ErrorKind::DivisionByZero);
}

#[test]
fn sqrt_domain_and_accuracy() {
    for &a in SAMPLES {
        match evaluate("sqrt", &text(a), "") {
            Ok(root) => {
                assert!(a >= 0.0);
                assert!(root >= 0.0);
                assert!((root * root - a).abs() <= 1e-9 * a.abs().max(1.0));
            }
            Err(err) => {
                assert!(a < 0.0);
                assert_eq!(err.domain_reason(), Some(DomainReason::NegativeSqrt));
            }
        }
    }
}

#[test]
fn factorial_sequence_and_failures() {
    assert_eq!(evaluate("factorial", "0", "").unwrap(), 1.0);
    assert_eq!(evaluate("factorial", "1", "").unwrap(), 1.0);
    assert_eq!(evaluate("factorial", "5", "").unwrap(), 120.0);
    assert_eq!(evaluate("factorial", "20", "").unwrap(), 2432902008176640000.0);

    let negative = evaluate("factorial", "-1", "").unwrap_err();
    let fractional = evaluate("factorial", "3.5", "").unwrap_err();
    assert_eq!(negative.kind, ErrorKind::DomainError);
    assert_eq!(fractional.kind, ErrorKind::DomainError);
    assert_eq!(negative.domain_reason(), Some(DomainReason::NegativeFactorial));
    assert_eq!(fractional.domain_reason(), Some(DomainReason::NonIntegerFactorial));
    assert_ne!(negative.reason, fractional.reason);
}

#[test]
fn power_conventions() {
    assert_eq!(evaluate("power", "0", "-1").unwrap_err().kind, ErrorKind::DivisionByZero);
    assert_eq!(evaluate("power", "0", "0").unwrap(), 1.0);
    assert!((evaluate("power", "2", "-1").unwrap() - 0.5).abs() < 1e-15);
}

#[test]
fn invalid_input_is_tagged_with_operand() {
    let a = evaluate("add", "abc", "5").unwrap_err();
    assert_eq!((a.kind, a.operand), (ErrorKind::InvalidInput, Some(Operand::A)));
    assert_eq!(a.message_key(), "invalid_input_a");

    let b = evaluate("add", "5", "abc").unwrap_err();
    assert_eq!((b.kind, b.operand), (ErrorKind::InvalidInput, Some(Operand::B)));
    assert_eq!(b.message_key(), "invalid_input_b");
}

#[test]
fn unknown_operation_never_panics() {
    for op in ["bogus_op", "", "ADD", "add ", "sqrt;", "\u{1F600}"] {
        let err = evaluate(op, "1", "2").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownOperation, "operation {:?}", op);
    }
}

#[test]
fn logarithm_family() {
    assert!((evaluate("log", "1000", "").unwrap() - 3.0).abs() < 1e-12);
    assert!((evaluate("ln", "1", "").unwrap()).abs() < 1e-12);
    assert!((evaluate("log_base", "1024", "2").unwrap() - 10.0).abs() < 1e-12);

    for (op, a, b, reason) in [
        ("log", "0", "", DomainReason::NonPositiveLog),
        ("ln", "-5", "", DomainReason::NonPositiveLog),
        ("log_base", "-1", "10", DomainReason::NonPositiveLog),
        ("log_base", "10", "1", DomainReason::InvalidLogBase),
        ("log_base", "10", "", DomainReason::InvalidLogBase),
    ] {
        let err = evaluate(op, a, b).unwrap_err();
        assert_eq!(err.domain_reason(), Some(reason), "{}({}, {})", op, a, b);
    }
}

#[test]
fn trig_uses_degrees_by_default() {
    assert!((evaluate("sin", "90", "").unwrap() - 1.0).abs() < 1e-12);
    assert!((evaluate("cos", "180", "").unwrap() + 1.0).abs() < 1e-12);
    assert!((evaluate("tan", "45", "").unwrap() - 1.0).abs() < 1e-9);
    assert!((evaluate("cos_rad", &text(std::f64::consts::PI), "").unwrap() + 1.0).abs() < 1e-12);
}

#[test]
fn double_negation_round_trips() {
    for &x in SAMPLES {
        let once = evaluate("negate", &text(x), "").unwrap();
        let twice = evaluate("negate", &text(once), "").unwrap();
        assert_eq!(twice, x);
    }
}

#[test]
fn repeated_calls_are_bit_identical() {
    for op in ALL_OPERATIONS {
        let first = evaluate(op.id(), "2.5", "1.5");
        for _ in 0..3 {
            let again = evaluate(op.id(), "2.5", "1.5");
            match (&first, &again) {
                (Ok(x), Ok(y)) => assert_eq!(x.to_bits(), y.to_bits(), "{}", op),
                (Err(x), Err(y)) => assert_eq!(x, y, "{}", op),
                _ => panic!("{} changed outcome between calls", op),
            }
        }
    }
}

#[test]
fn concurrent_callers_agree() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let a = (i as f64).to_string();
                (0..100)
                    .map(|_| evaluate("power", &a, "3").unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let results = handle.join().unwrap();
        let expected = (i as f64).powf(3.0);
        assert!(results.iter().all(|r| *r == expected));
    }
}

#[test]
fn json_request_round_trip() {
    let request: OperationRequest =
        serde_json::from_str(r#"{"operation":"percent_of","a":"25","b":"200"}"#).unwrap();
    let result = request.evaluate();
    assert_eq!(result.value(), Some(50.0));

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["status"], "value");
    assert_eq!(json["value"], 50.0);
}
