//! Call frames - per-activation runtime bookkeeping.

use core_types::Value;

/// Display name of the implicit activation pushed when a run starts with an
/// empty call stack.
pub const GLOBAL_EXECUTION_CONTEXT_NAME: &str = "(global execution context)";

/// One function activation's context, held on the shared call stack.
///
/// Distinct from the register window: the frame carries the receiver,
/// display name, lexical scope and strictness of the activation, while the
/// window carries its local value slots.
#[derive(Debug, Clone, PartialEq)]
pub struct CallFrame {
    /// The `this` binding of this activation
    pub this_value: Value,
    /// Display name, used in stack traces
    pub function_name: String,
    /// Handle to the activation's lexical scope in the object model
    pub scope: Value,
    /// Whether this activation executes in strict mode
    pub strict_mode: bool,
}

impl CallFrame {
    /// Frame for the implicit top-level activation: receiver and scope are
    /// the global object, and strictness comes from the unit's metadata.
    pub fn global(global_object: Value, strict_mode: bool) -> Self {
        Self {
            this_value: global_object.clone(),
            function_name: GLOBAL_EXECUTION_CONTEXT_NAME.to_string(),
            scope: global_object,
            strict_mode,
        }
    }
}
