//! Bytecode system for the block-based runtime core.
//!
//! This crate defines the compiled-unit boundary between the front-end and
//! the interpreter:
//!
//! - Register-addressed [`Opcode`]s operating on an activation's window
//! - [`Instruction`]s held in encoded form and decoded by a streaming
//!   iterator, one instruction at a time
//! - [`BasicBlock`]s addressed by stable [`BlockId`]s
//! - Immutable [`Executable`]s assembled through a validating
//!   [`ExecutableBuilder`]
//!
//! # Example
//!
//! ```
//! use bytecode_system::{ExecutableBuilder, Opcode};
//! use core_types::Value;
//!
//! let mut builder = ExecutableBuilder::new();
//! builder.set_strict_mode(false);
//!
//! let reg = builder.allocate_register();
//! let forty_two = builder.add_constant(Value::Smi(42));
//! builder.emit(Opcode::LoadConstant { dst: reg, index: forty_two });
//! builder.emit(Opcode::Return { reg });
//!
//! let executable = builder.build().unwrap();
//! assert_eq!(executable.basic_blocks().len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod block;
pub mod executable;
pub mod instruction;
pub mod opcode;

// Re-export main types at crate root
pub use block::{BasicBlock, InstructionStreamIterator};
pub use executable::{BuildError, Executable, ExecutableBuilder};
pub use instruction::{DecodeError, Instruction};
pub use opcode::{BlockId, Opcode, Register};
