//! Shared runtime state: the call stack and the exception slot.

use crate::call_frame::CallFrame;
use core_types::Value;

/// State owned by the surrounding runtime and shared across all nested runs
/// on one interpreter: the global object handle, the call stack of
/// [`CallFrame`]s, and the pending-exception slot.
///
/// Execution is single-threaded, so no locking is involved; stack discipline
/// is strictly LIFO.
#[derive(Debug)]
pub struct Runtime {
    global_object: Value,
    call_stack: Vec<CallFrame>,
    exception: Option<Value>,
}

impl Runtime {
    /// Create a runtime around the given global object handle.
    pub fn new(global_object: Value) -> Self {
        Self {
            global_object,
            call_stack: Vec::with_capacity(64),
            exception: None,
        }
    }

    /// Handle to the global object in the external object model.
    pub fn global_object(&self) -> &Value {
        &self.global_object
    }

    /// Current call stack depth.
    pub fn call_stack_depth(&self) -> usize {
        self.call_stack.len()
    }

    /// The innermost active call frame, if any.
    pub fn current_frame(&self) -> Option<&CallFrame> {
        self.call_stack.last()
    }

    /// All active call frames, outermost first.
    pub fn frames(&self) -> &[CallFrame] {
        &self.call_stack
    }

    /// Push a call frame onto the stack.
    pub fn push_call_frame(&mut self, frame: CallFrame) {
        self.call_stack.push(frame);
    }

    /// Pop the innermost call frame from the stack.
    pub fn pop_call_frame(&mut self) -> Option<CallFrame> {
        self.call_stack.pop()
    }

    /// Record a thrown value in the pending-exception slot.
    pub fn throw_value(&mut self, value: Value) {
        self.exception = Some(value);
    }

    /// The pending thrown value, if one is recorded.
    pub fn exception(&self) -> Option<&Value> {
        self.exception.as_ref()
    }

    /// Take and clear the pending thrown value.
    pub fn take_exception(&mut self) -> Option<Value> {
        self.exception.take()
    }
}
