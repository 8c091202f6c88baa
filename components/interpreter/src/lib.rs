//! Block-based bytecode execution core.
//!
//! This crate drives execution of compiled units produced by the front-end:
//!
//! - A tight dispatch loop streaming instructions out of basic blocks
//! - Per-activation [`RegisterWindow`]s pushed and popped in lockstep with
//!   nested runs
//! - [`CallFrame`]s on a [`Runtime`]-owned call stack shared with the wider
//!   runtime, plus its pending-exception slot
//! - A per-step [`Completion`] signal (continue / jump / return / throw)
//!   consumed by the loop
//!
//! # Example
//!
//! ```
//! use bytecode_system::{ExecutableBuilder, Opcode};
//! use core_types::Value;
//! use interpreter::Interpreter;
//!
//! let mut builder = ExecutableBuilder::new();
//! builder.set_strict_mode(false);
//! let reg = builder.allocate_register();
//! let idx = builder.add_constant(Value::Smi(42));
//! builder.emit(Opcode::LoadConstant { dst: reg, index: idx });
//! builder.emit(Opcode::Return { reg });
//! let executable = builder.build().unwrap();
//!
//! let mut interpreter = Interpreter::new(Value::HeapObject(0));
//! let result = interpreter.run(&executable).unwrap();
//! assert_eq!(result, Value::Smi(42));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod call_frame;
pub mod dispatch;
pub mod interpreter;
pub mod registry;
pub mod runtime;
pub mod window;

// Re-export main types at crate root
pub use call_frame::{CallFrame, GLOBAL_EXECUTION_CONTEXT_NAME};
pub use dispatch::Completion;
pub use interpreter::Interpreter;
pub use registry::interpreter_active;
pub use runtime::Runtime;
pub use window::RegisterWindow;
