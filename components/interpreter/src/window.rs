//! Register windows - per-activation local storage.

use bytecode_system::Register;
use core_types::Value;

/// A fixed-size, index-addressed array of value slots for one activation.
///
/// Created when a run begins and destroyed when that run completes, normally
/// or abruptly. Slot 0 is reserved by convention: it receives the result of
/// the most recently completed nested call, distinct from any register the
/// unit's own code declares.
///
/// Slots start out `Empty`. Reading a slot before it is written is a defect
/// in the compiled unit, not a condition the interpreter detects.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterWindow {
    registers: Vec<Value>,
}

impl RegisterWindow {
    /// Create a window with `count` slots, all `Empty`.
    pub fn new(count: u32) -> Self {
        Self {
            registers: vec![Value::Empty; count as usize],
        }
    }

    /// Read the value in `register`.
    ///
    /// Out-of-bounds indices indicate a malformed unit that escaped builder
    /// validation; this is fatal.
    pub fn get(&self, register: Register) -> &Value {
        &self.registers[register.index()]
    }

    /// Write `value` into `register`.
    pub fn set(&mut self, register: Register, value: Value) {
        self.registers[register.index()] = value;
    }

    /// Number of slots in this window.
    pub fn len(&self) -> usize {
        self.registers.len()
    }

    /// Whether the window has no slots.
    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    /// All slots in index order, for diagnostics.
    pub fn slots(&self) -> &[Value] {
        &self.registers
    }
}
