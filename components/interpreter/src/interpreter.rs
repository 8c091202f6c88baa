//! The interpreter: orchestration of one executable's run.
//!
//! Owns the stack of register windows and the shared runtime state, and
//! drives the block-streaming execution loop. Nested script calls re-enter
//! [`Interpreter::run`] on the same instance; the window stack mirrors the
//! bytecode-level activation depth while the host stack carries the
//! recursion.

use bytecode_system::{BlockId, Executable, Register};
use core_types::{ErrorKind, JsError, SourcePosition, StackFrame, Value};
use tracing::trace;

use crate::call_frame::CallFrame;
use crate::dispatch::{self, Completion};
use crate::registry::CurrentGuard;
use crate::runtime::Runtime;
use crate::window::RegisterWindow;

/// How the block-streaming loop ended. Every variant flows through the same
/// cleanup point in `run`.
enum RunOutcome {
    /// Explicit return or implicit fallthrough termination
    Completed(Value),
    /// A thrown value was recorded; the exception slot holds it
    Thrown(Option<SourcePosition>),
}

/// Drives instruction-by-instruction execution of compiled units.
///
/// One interpreter is active per thread of control for its whole lifetime
/// (enforced at construction); that one instance may be re-entered many
/// times via nested runs.
#[derive(Debug)]
pub struct Interpreter {
    runtime: Runtime,
    register_windows: Vec<RegisterWindow>,
    _registration: CurrentGuard,
}

impl Interpreter {
    /// Create the interpreter for this thread around a global object handle.
    ///
    /// Fatal if another interpreter is already alive on this thread.
    pub fn new(global_object: Value) -> Self {
        Self {
            runtime: Runtime::new(global_object),
            register_windows: Vec::new(),
            _registration: CurrentGuard::acquire(),
        }
    }

    /// The shared runtime state (call stack, exception slot, global object).
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Mutable access to the shared runtime state.
    pub fn runtime_mut(&mut self) -> &mut Runtime {
        &mut self.runtime
    }

    /// Number of register windows currently on the stack; equals the
    /// nesting depth of active runs.
    pub fn window_depth(&self) -> usize {
        self.register_windows.len()
    }

    /// The active run's register window.
    pub(crate) fn window(&self) -> &RegisterWindow {
        self.register_windows
            .last()
            .expect("instruction executed with no active register window")
    }

    /// Mutable access to the active run's register window.
    pub(crate) fn window_mut(&mut self) -> &mut RegisterWindow {
        self.register_windows
            .last_mut()
            .expect("instruction executed with no active register window")
    }

    /// Execute `executable` from its entry block to completion.
    ///
    /// On success the result is always a well-defined value, `Undefined`
    /// when the unit fell through without an explicit return. On abrupt
    /// completion the error is returned and the shared exception slot is
    /// left populated for the caller to inspect (and clear before the next
    /// run). Either way, the window and any call frame this run pushed are
    /// gone when `run` returns.
    pub fn run(&mut self, executable: &Executable) -> Result<Value, JsError> {
        trace!(
            target: "bytecode",
            blocks = executable.basic_blocks().len(),
            registers = executable.register_count(),
            "run start"
        );

        // An implicit top-level activation is pushed only when no enclosing
        // activation exists, and ownership is remembered explicitly: this
        // run pops the frame iff this run pushed it.
        let pushed_global_frame = self.runtime.call_stack_depth() == 0;
        if pushed_global_frame {
            debug_assert!(self.runtime.exception().is_none());
            let frame = CallFrame::global(
                self.runtime.global_object().clone(),
                executable.strict_mode(),
            );
            self.runtime.push_call_frame(frame);
        }

        self.register_windows
            .push(RegisterWindow::new(executable.register_count()));
        let entry_depth = self.register_windows.len();

        let outcome = self.execute_blocks(executable);

        // Cleanup below runs on every exit path: the loop never returns
        // around it, normal and abrupt outcomes alike converge here.
        debug_assert_eq!(self.register_windows.len(), entry_depth);
        let window = self
            .register_windows
            .pop()
            .expect("register window stack underflow");
        for (index, slot) in window.slots().iter().enumerate() {
            trace!(target: "bytecode", "[{:3}] {}", index, slot);
        }

        let result = match outcome {
            RunOutcome::Completed(value) => {
                // A unit that returns an unwritten register yields undefined;
                // run never surfaces the Empty sentinel.
                let value = if value.is_empty() {
                    Value::Undefined
                } else {
                    value
                };
                // The caller observes the result only now, with the callee
                // window already popped (strict LIFO ordering).
                if let Some(caller_window) = self.register_windows.last_mut() {
                    caller_window.set(Register::RETURN_VALUE, value.clone());
                }
                Ok(value)
            }
            RunOutcome::Thrown(position) => {
                let thrown = self
                    .runtime
                    .exception()
                    .cloned()
                    .unwrap_or(Value::Undefined);
                let mut error = JsError::new(
                    ErrorKind::InternalError,
                    format!("Uncaught exception: {}", thrown),
                );
                error.source_position = position;
                // Innermost frame first; only the throw site has a known
                // position.
                error.stack = self
                    .runtime
                    .frames()
                    .iter()
                    .rev()
                    .enumerate()
                    .map(|(depth, frame)| StackFrame {
                        function_name: Some(frame.function_name.clone()),
                        line: if depth == 0 {
                            position.map_or(0, |p| p.line)
                        } else {
                            0
                        },
                        column: if depth == 0 {
                            position.map_or(0, |p| p.column)
                        } else {
                            0
                        },
                    })
                    .collect();
                Err(error)
            }
        };

        if pushed_global_frame {
            let frame = self.runtime.pop_call_frame();
            debug_assert!(frame.is_some(), "call frame pushed by this run is gone");
        }

        trace!(target: "bytecode", ok = result.is_ok(), "run finished");
        result
    }

    /// Stream and execute instructions block by block until the run ends.
    fn execute_blocks(&mut self, executable: &Executable) -> RunOutcome {
        let mut current = BlockId::ENTRY;
        'blocks: loop {
            for instruction in executable.block(current).instruction_stream() {
                let position = instruction.source_position;
                match dispatch::execute(&instruction, self, executable) {
                    Completion::Continue => {}
                    Completion::Jump(target) => {
                        // Remaining instructions of this block are abandoned.
                        current = target;
                        continue 'blocks;
                    }
                    Completion::Return(value) => return RunOutcome::Completed(value),
                    Completion::Throw(value) => {
                        self.runtime.throw_value(value);
                        return RunOutcome::Thrown(position);
                    }
                }
                // A nested run or collaborator may have recorded a thrown
                // value without signalling it through the completion.
                if self.runtime.exception().is_some() {
                    return RunOutcome::Thrown(None);
                }
            }
            // Instructions exhausted with no transfer: implicit fallthrough
            // termination.
            return RunOutcome::Completed(Value::Undefined);
        }
    }
}
