//! Runtime value representation.
//!
//! This module provides the core `Value` enum shared between the bytecode
//! system and the interpreter. The interpreter treats values as opaque
//! payloads apart from two sentinels: `Empty` (no value was produced) and
//! `Undefined`.

use num_bigint::BigInt;
use num_traits::Zero;
use std::fmt;

/// Represents any runtime value, or the absence of one.
///
/// Primitive values are stored inline; heap objects are referenced by ID.
///
/// `Empty` is an interpreter-internal marker: it fills freshly created
/// register slots and signals "no value produced". Script code can never
/// observe it; a completed run always yields a real value (`Undefined` at
/// worst).
///
/// # Examples
///
/// ```
/// use core_types::Value;
///
/// let number = Value::Smi(42);
/// assert!(number.is_truthy());
/// assert_eq!(number.type_of(), "number");
///
/// assert!(Value::Empty.is_empty());
/// assert!(!Value::Undefined.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value. Interpreter-internal sentinel, never visible to script code.
    Empty,
    /// The undefined value
    Undefined,
    /// The null value
    Null,
    /// Boolean (true or false)
    Boolean(bool),
    /// Small integer (fits in 32 bits, tagged representation)
    Smi(i32),
    /// IEEE 754 double-precision floating point
    Double(f64),
    /// String value
    String(String),
    /// Arbitrary precision integer
    BigInt(BigInt),
    /// Heap-allocated object (referenced by ID for safety)
    HeapObject(usize),
}

impl Value {
    /// Returns whether this is the `Empty` sentinel (no value produced).
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Returns whether this is the undefined value.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Returns whether this value is numeric (Smi or Double).
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Smi(_) | Value::Double(_))
    }

    /// Numeric view of this value, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Smi(n) => Some(f64::from(*n)),
            Value::Double(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns whether this value is truthy.
    ///
    /// Falsy values: undefined, null, false, 0, NaN, the empty string and 0n.
    /// All objects are truthy. `Empty` is falsy by convention but should
    /// never reach a truthiness check in a well-formed unit.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Empty => false,
            Value::Undefined => false,
            Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Smi(n) => *n != 0,
            Value::Double(n) => !n.is_nan() && *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::BigInt(n) => !n.is_zero(),
            Value::HeapObject(_) => true,
        }
    }

    /// Returns the `typeof` result for this value.
    ///
    /// Follows the usual operator behavior, including the historical
    /// `typeof null == "object"` quirk. `Empty` has no script-visible type
    /// and reports "undefined".
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Empty => "undefined",
            Value::Undefined => "undefined",
            Value::Null => "object",
            Value::Boolean(_) => "boolean",
            Value::Smi(_) => "number",
            Value::Double(_) => "number",
            Value::String(_) => "string",
            Value::BigInt(_) => "bigint",
            Value::HeapObject(_) => "object",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => write!(f, "(empty)"),
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Smi(n) => write!(f, "{}", n),
            Value::Double(n) => {
                if n.is_nan() {
                    write!(f, "NaN")
                } else if n.is_infinite() {
                    if n.is_sign_positive() {
                        write!(f, "Infinity")
                    } else {
                        write!(f, "-Infinity")
                    }
                } else if n.fract() == 0.0 && n.abs() < 1e15 {
                    // Integer-valued doubles display without decimal point
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => write!(f, "{}", s),
            Value::BigInt(n) => write!(f, "{}n", n),
            Value::HeapObject(_) => write!(f, "[object Object]"),
        }
    }
}
