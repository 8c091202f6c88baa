//! Source position and stack frame types for error tracking.

/// Represents a position in source code.
///
/// Carried on instructions by the front-end and used for error reporting
/// to indicate where an issue occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePosition {
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
    /// Byte offset from the start of the source
    pub offset: u32,
}

impl SourcePosition {
    /// Create a new source position
    pub fn new(line: u32, column: u32, offset: u32) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// Represents a single frame in a script call stack.
///
/// Used when materializing a stack trace for an uncaught thrown value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    /// Name of the function, or None for anonymous functions
    pub function_name: Option<String>,
    /// Line number where the call occurred
    pub line: u32,
    /// Column number where the call occurred
    pub column: u32,
}
