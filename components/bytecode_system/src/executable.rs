//! Compiled units and their builder.
//!
//! An [`Executable`] is the immutable output of the front-end: an ordered
//! collection of basic blocks, a constant pool, a table of nested units and
//! the number of registers one activation needs. It may be run repeatedly
//! and re-entrantly; the interpreter never mutates it.
//!
//! [`ExecutableBuilder`] is the trusted boundary where compiled units enter
//! the system. It validates block targets and operand ranges so the
//! interpreter can treat every built unit as well-formed.

use crate::block::BasicBlock;
use crate::instruction::Instruction;
use crate::opcode::{BlockId, Opcode, Register};
use core_types::{SourcePosition, Value};
use thiserror::Error;

/// An immutable compiled unit ready for repeated or recursive execution.
#[derive(Debug, Clone, PartialEq)]
pub struct Executable {
    basic_blocks: Vec<BasicBlock>,
    constants: Vec<Value>,
    functions: Vec<Executable>,
    register_count: u32,
    strict_mode: bool,
}

impl Executable {
    /// The blocks of this unit in creation order. Block 0 is the entry.
    pub fn basic_blocks(&self) -> &[BasicBlock] {
        &self.basic_blocks
    }

    /// Look up a block by its stable identity.
    ///
    /// Targets are validated at build time, so an out-of-range ID is a
    /// defect in this crate rather than in the compiled unit.
    pub fn block(&self, id: BlockId) -> &BasicBlock {
        &self.basic_blocks[id.0]
    }

    /// Constant pool entry at `index`.
    pub fn constant(&self, index: u32) -> &Value {
        &self.constants[index as usize]
    }

    /// Nested unit at `index` in the function table.
    pub fn function(&self, index: u32) -> &Executable {
        &self.functions[index as usize]
    }

    /// Number of register slots one activation of this unit requires,
    /// including the reserved call-result slot 0.
    pub fn register_count(&self) -> u32 {
        self.register_count
    }

    /// Strict-mode flag supplied by the front-end for this unit's
    /// top-level activation.
    pub fn strict_mode(&self) -> bool {
        self.strict_mode
    }
}

/// Error building an executable from front-end input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// The front-end never supplied the unit's strict-mode flag.
    /// There is no sensible default; this is a compile-time input gap.
    #[error("compiled unit is missing its strict-mode flag")]
    MissingStrictMode,
    /// A jump names a block the unit does not contain
    #[error("jump target {target:?} out of range ({block_count} blocks)")]
    JumpTargetOutOfRange {
        /// The offending target
        target: BlockId,
        /// Number of blocks in the unit
        block_count: usize,
    },
    /// An operand names a register outside the declared window
    #[error("register {register} out of range ({register_count} slots)")]
    RegisterOutOfRange {
        /// The offending register
        register: Register,
        /// Declared register count
        register_count: u32,
    },
    /// An operand names a constant the pool does not contain
    #[error("constant index {index} out of range ({count} constants)")]
    ConstantOutOfRange {
        /// The offending pool index
        index: u32,
        /// Number of pool entries
        count: usize,
    },
    /// A call names a nested unit the function table does not contain
    #[error("function index {index} out of range ({count} functions)")]
    FunctionOutOfRange {
        /// The offending table index
        index: u32,
        /// Number of table entries
        count: usize,
    },
}

/// Builder used by the front-end to assemble an [`Executable`].
///
/// Starts with an empty entry block selected. Register allocation begins at
/// slot 1; slot 0 stays reserved for nested-call results.
#[derive(Debug)]
pub struct ExecutableBuilder {
    blocks: Vec<Vec<Instruction>>,
    current_block: BlockId,
    constants: Vec<Value>,
    functions: Vec<Executable>,
    next_register: u32,
    strict_mode: Option<bool>,
}

impl ExecutableBuilder {
    /// Create a builder with an empty entry block selected.
    pub fn new() -> Self {
        Self {
            blocks: vec![Vec::new()],
            current_block: BlockId::ENTRY,
            constants: Vec::new(),
            functions: Vec::new(),
            next_register: 1,
            strict_mode: None,
        }
    }

    /// Create a new empty block and return its identity.
    ///
    /// The new block is not selected; jumps may reference it before any
    /// instruction is emitted into it.
    pub fn make_block(&mut self) -> BlockId {
        let id = BlockId(self.blocks.len());
        self.blocks.push(Vec::new());
        id
    }

    /// Select the block that subsequent `emit` calls append to.
    pub fn switch_to_block(&mut self, block: BlockId) {
        assert!(block.0 < self.blocks.len(), "unknown block {:?}", block);
        self.current_block = block;
    }

    /// Append an instruction to the selected block.
    pub fn emit(&mut self, opcode: Opcode) {
        self.blocks[self.current_block.0].push(Instruction::new(opcode));
    }

    /// Append an instruction carrying a source position.
    pub fn emit_with_position(&mut self, opcode: Opcode, position: SourcePosition) {
        self.blocks[self.current_block.0].push(Instruction::with_position(opcode, position));
    }

    /// Add a constant to the pool and return its index.
    pub fn add_constant(&mut self, value: Value) -> u32 {
        let index = self.constants.len() as u32;
        self.constants.push(value);
        index
    }

    /// Add a nested unit to the function table and return its index.
    pub fn add_function(&mut self, function: Executable) -> u32 {
        let index = self.functions.len() as u32;
        self.functions.push(function);
        index
    }

    /// Allocate a fresh register slot for this unit.
    pub fn allocate_register(&mut self) -> Register {
        let register = Register(self.next_register);
        self.next_register += 1;
        register
    }

    /// Record the unit's strict-mode flag. Required before `build`.
    pub fn set_strict_mode(&mut self, strict: bool) {
        self.strict_mode = Some(strict);
    }

    /// Validate the assembled unit and freeze it into an [`Executable`].
    pub fn build(self) -> Result<Executable, BuildError> {
        let strict_mode = self.strict_mode.ok_or(BuildError::MissingStrictMode)?;
        let register_count = self.next_register;

        for block in &self.blocks {
            for instruction in block {
                self.validate_opcode(&instruction.opcode, register_count)?;
            }
        }

        let basic_blocks = self
            .blocks
            .iter()
            .map(|instructions| {
                let mut block = BasicBlock::new();
                for instruction in instructions {
                    block.append(instruction);
                }
                block
            })
            .collect();

        Ok(Executable {
            basic_blocks,
            constants: self.constants,
            functions: self.functions,
            register_count,
            strict_mode,
        })
    }

    fn validate_opcode(&self, opcode: &Opcode, register_count: u32) -> Result<(), BuildError> {
        let check_register = |register: Register| {
            if register.0 < register_count {
                Ok(())
            } else {
                Err(BuildError::RegisterOutOfRange {
                    register,
                    register_count,
                })
            }
        };
        let check_target = |target: BlockId| {
            if target.0 < self.blocks.len() {
                Ok(())
            } else {
                Err(BuildError::JumpTargetOutOfRange {
                    target,
                    block_count: self.blocks.len(),
                })
            }
        };

        match *opcode {
            Opcode::LoadConstant { dst, index } => {
                check_register(dst)?;
                if index as usize >= self.constants.len() {
                    return Err(BuildError::ConstantOutOfRange {
                        index,
                        count: self.constants.len(),
                    });
                }
                Ok(())
            }
            Opcode::LoadUndefined { dst } => check_register(dst),
            Opcode::Mov { dst, src } => {
                check_register(dst)?;
                check_register(src)
            }
            Opcode::Add { dst, lhs, rhs }
            | Opcode::Sub { dst, lhs, rhs }
            | Opcode::Mul { dst, lhs, rhs }
            | Opcode::LessThan { dst, lhs, rhs } => {
                check_register(dst)?;
                check_register(lhs)?;
                check_register(rhs)
            }
            Opcode::Increment { reg } => check_register(reg),
            Opcode::Jump { target } => check_target(target),
            Opcode::JumpIfFalse { condition, target } => {
                check_register(condition)?;
                check_target(target)
            }
            Opcode::Call { function } => {
                if function as usize >= self.functions.len() {
                    return Err(BuildError::FunctionOutOfRange {
                        index: function,
                        count: self.functions.len(),
                    });
                }
                Ok(())
            }
            Opcode::Return { reg } => check_register(reg),
            Opcode::Throw { reg } => check_register(reg),
        }
    }
}

impl Default for ExecutableBuilder {
    fn default() -> Self {
        Self::new()
    }
}
