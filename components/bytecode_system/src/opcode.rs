//! Bytecode opcodes for the block-based VM.
//!
//! Defines the register-addressed instruction set executed by the
//! interpreter. Control transfer is expressed in terms of basic block
//! identifiers rather than raw instruction offsets.

use std::fmt;

/// Register identifier for a slot in the active register window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register(pub u32);

impl Register {
    /// Slot 0 is reserved: it receives the result of the most recently
    /// completed nested call. Compiled code allocates its own registers
    /// starting at slot 1.
    pub const RETURN_VALUE: Register = Register(0);

    /// The slot index of this register.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Stable identity of a basic block within its executable.
///
/// Fixed at compile time; block 0 is the entry block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(pub usize);

impl BlockId {
    /// The entry block of every executable.
    pub const ENTRY: BlockId = BlockId(0);
}

/// Bytecode opcodes.
///
/// Each opcode reads and writes registers of the active window and produces
/// at most one control-transfer signal (jump, return or throw).
#[derive(Debug, Clone, PartialEq)]
pub enum Opcode {
    /// Load constant pool entry `index` into `dst`
    LoadConstant {
        /// Destination register
        dst: Register,
        /// Constant pool index
        index: u32,
    },
    /// Load the undefined value into `dst`
    LoadUndefined {
        /// Destination register
        dst: Register,
    },
    /// Copy `src` into `dst`
    Mov {
        /// Destination register
        dst: Register,
        /// Source register
        src: Register,
    },
    /// `dst = lhs + rhs`
    Add {
        /// Destination register
        dst: Register,
        /// Left operand register
        lhs: Register,
        /// Right operand register
        rhs: Register,
    },
    /// `dst = lhs - rhs`
    Sub {
        /// Destination register
        dst: Register,
        /// Left operand register
        lhs: Register,
        /// Right operand register
        rhs: Register,
    },
    /// `dst = lhs * rhs`
    Mul {
        /// Destination register
        dst: Register,
        /// Left operand register
        lhs: Register,
        /// Right operand register
        rhs: Register,
    },
    /// Add one to the numeric value in `reg`, in place
    Increment {
        /// Register holding the value to increment
        reg: Register,
    },
    /// `dst = lhs < rhs` as a boolean
    LessThan {
        /// Destination register
        dst: Register,
        /// Left operand register
        lhs: Register,
        /// Right operand register
        rhs: Register,
    },
    /// Unconditional transfer to `target`
    Jump {
        /// Successor block
        target: BlockId,
    },
    /// Transfer to `target` when `condition` is falsy, fall through otherwise
    JumpIfFalse {
        /// Register holding the tested value
        condition: Register,
        /// Successor block taken on a falsy condition
        target: BlockId,
    },
    /// Run nested unit `function` re-entrantly; its result lands in the
    /// reserved slot 0 of this activation's window
    Call {
        /// Index into the executable's nested-unit table
        function: u32,
    },
    /// Finish this run, producing the value in `reg`
    Return {
        /// Register holding the return value
        reg: Register,
    },
    /// Throw the value in `reg`, completing this run abruptly
    Throw {
        /// Register holding the thrown value
        reg: Register,
    },
}

impl Opcode {
    /// Check if this opcode ends a basic block.
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            Opcode::Jump { .. }
                | Opcode::JumpIfFalse { .. }
                | Opcode::Return { .. }
                | Opcode::Throw { .. }
        )
    }

    /// Check if this opcode ends a basic block with a single successor
    /// (or none at all).
    pub fn is_unconditional_terminator(&self) -> bool {
        matches!(
            self,
            Opcode::Jump { .. } | Opcode::Return { .. } | Opcode::Throw { .. }
        )
    }
}
