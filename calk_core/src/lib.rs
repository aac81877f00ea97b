//! # calk_core - Calculator Evaluation Engine
//!
//! `calk_core` is the computational heart of Calk: it turns an operation
//! identifier and two raw operand strings into a number or a classified
//! error. Web forms, the CLI and tests all go through the same entry point.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions, no shared mutable state
//! - **Data-driven**: Operations live in a static registry, not in dispatch code
//! - **Rich Errors**: Structured error kinds and sub-reasons, never message matching
//! - **JSON-First**: Requests, results and errors implement Serialize/Deserialize
//!
//! ## Quick Start
//!
//! ```rust
//! use calk_core::errors::{ErrorKind, Operand};
//! use calk_core::evaluate;
//!
//! assert_eq!(evaluate("add", "2", "3").unwrap(), 5.0);
//! assert_eq!(evaluate("add", "", "5").unwrap(), 5.0);
//!
//! let err = evaluate("add", "5", "abc").unwrap_err();
//! assert_eq!(err.kind, ErrorKind::InvalidInput);
//! assert_eq!(err.operand, Some(Operand::B));
//! ```
//!
//! ## Modules
//!
//! - [`operations`] - Domain-checked numeric functions
//! - [`registry`] - Operation identifiers and descriptors
//! - [`input`] - Raw operand normalization
//! - [`evaluator`] - The `evaluate` entry point
//! - [`errors`] - Structured error types
//! - [`settings`] - Display settings for front ends

pub mod errors;
pub mod evaluator;
pub mod input;
pub mod operations;
pub mod registry;
pub mod settings;

// Re-export commonly used types at crate root for convenience
pub use errors::{
    CalcError, CalcResult, DomainReason, ErrorInfo, ErrorKind, FailureCause, Operand,
};
pub use evaluator::{evaluate, try_evaluate, OperationRequest, OperationResult};
pub use operations::AngleUnit;
pub use registry::{lookup, Arity, Operation, OperationDescriptor, ALL_OPERATIONS};
pub use settings::{load_settings, OutputFormat, Settings};
