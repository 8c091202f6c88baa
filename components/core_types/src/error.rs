//! Script error types.
//!
//! This module provides the host-facing error type produced when a run
//! completes abruptly with an uncaught thrown value.

use crate::{SourcePosition, StackFrame};

/// The kind of script error.
///
/// These correspond to the language's built-in error constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Type error (e.g., arithmetic on a non-numeric value)
    TypeError,
    /// Reference to an undefined binding
    ReferenceError,
    /// Value out of allowed range
    RangeError,
    /// Internal engine error (including uncaught thrown values)
    InternalError,
}

/// A script error with message and stack trace.
///
/// Returned from `Interpreter::run` when execution completes abruptly.
/// The shared exception slot still holds the thrown value itself; this
/// struct is the host-facing description of the failure.
#[derive(Debug, Clone)]
pub struct JsError {
    /// The type of error
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Stack trace (call stack at the time of the error)
    pub stack: Vec<StackFrame>,
    /// Source position where the error occurred
    pub source_position: Option<SourcePosition>,
}

impl JsError {
    /// Create an error with no stack trace or source position.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            stack: Vec::new(),
            source_position: None,
        }
    }
}
