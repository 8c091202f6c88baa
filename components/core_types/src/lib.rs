//! Core value types and error handling.
//!
//! This crate provides the foundational types for the bytecode runtime:
//! value representation, script error types, and source location tracking.
//!
//! # Overview
//!
//! - [`Value`] - Runtime values, including the `Empty` and `Undefined` sentinels
//! - [`JsError`] - Script errors surfaced to the host
//! - [`ErrorKind`] - Categories of script errors
//! - [`SourcePosition`] - Source code location
//! - [`StackFrame`] - Call stack frame information
//!
//! # Examples
//!
//! ```
//! use core_types::{Value, JsError, ErrorKind};
//!
//! let num = Value::Smi(42);
//! assert!(num.is_truthy());
//! assert_eq!(num.type_of(), "number");
//!
//! let error = JsError::new(ErrorKind::TypeError, "undefined is not a function");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod source;
mod value;

pub use error::{ErrorKind, JsError};
pub use source::{SourcePosition, StackFrame};
pub use value::Value;
