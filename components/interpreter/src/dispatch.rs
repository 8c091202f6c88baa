//! Per-instruction execution.
//!
//! Each step receives the active interpreter and produces exactly one
//! [`Completion`]: fall through, jump to another block, return a value, or
//! throw. The execution loop consumes the completion; no control-transfer
//! state lives outside it.

use bytecode_system::{Executable, Instruction, Opcode, Register};
use core_types::Value;
use num_bigint::BigInt;

use crate::interpreter::Interpreter;

/// The control-transfer signal produced by one instruction step.
///
/// Exactly one signal per step, by construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Fall through to the next instruction of the current block
    Continue,
    /// Abandon the rest of this block and continue from the target's first
    /// instruction
    Jump(bytecode_system::BlockId),
    /// Stop this run, producing the value
    Return(Value),
    /// Stop this run abruptly with a thrown value
    Throw(Value),
}

/// Execute one instruction against the interpreter's current window.
pub(crate) fn execute(
    instruction: &Instruction,
    interpreter: &mut Interpreter,
    executable: &Executable,
) -> Completion {
    match &instruction.opcode {
        Opcode::LoadConstant { dst, index } => {
            let value = executable.constant(*index).clone();
            interpreter.window_mut().set(*dst, value);
            Completion::Continue
        }
        Opcode::LoadUndefined { dst } => {
            interpreter.window_mut().set(*dst, Value::Undefined);
            Completion::Continue
        }
        Opcode::Mov { dst, src } => {
            let value = interpreter.window().get(*src).clone();
            interpreter.window_mut().set(*dst, value);
            Completion::Continue
        }
        Opcode::Add { dst, lhs, rhs } => binary_op(interpreter, *dst, *lhs, *rhs, "+"),
        Opcode::Sub { dst, lhs, rhs } => binary_op(interpreter, *dst, *lhs, *rhs, "-"),
        Opcode::Mul { dst, lhs, rhs } => binary_op(interpreter, *dst, *lhs, *rhs, "*"),
        Opcode::Increment { reg } => {
            let value = interpreter.window().get(*reg).clone();
            match value {
                Value::Smi(n) => {
                    let incremented = match n.checked_add(1) {
                        Some(m) => Value::Smi(m),
                        None => Value::Double(f64::from(n) + 1.0),
                    };
                    interpreter.window_mut().set(*reg, incremented);
                    Completion::Continue
                }
                Value::Double(n) => {
                    interpreter.window_mut().set(*reg, Value::Double(n + 1.0));
                    Completion::Continue
                }
                Value::BigInt(n) => {
                    let incremented = Value::BigInt(n + BigInt::from(1));
                    interpreter.window_mut().set(*reg, incremented);
                    Completion::Continue
                }
                other => Completion::Throw(type_error(format!(
                    "cannot increment a value of type {}",
                    other.type_of()
                ))),
            }
        }
        Opcode::LessThan { dst, lhs, rhs } => {
            let lhs_value = interpreter.window().get(*lhs).clone();
            let rhs_value = interpreter.window().get(*rhs).clone();
            match (lhs_value.as_number(), rhs_value.as_number()) {
                (Some(a), Some(b)) => {
                    interpreter.window_mut().set(*dst, Value::Boolean(a < b));
                    Completion::Continue
                }
                _ => match (&lhs_value, &rhs_value) {
                    (Value::BigInt(a), Value::BigInt(b)) => {
                        interpreter.window_mut().set(*dst, Value::Boolean(a < b));
                        Completion::Continue
                    }
                    _ => Completion::Throw(type_error(format!(
                        "cannot compare {} and {}",
                        lhs_value.type_of(),
                        rhs_value.type_of()
                    ))),
                },
            }
        }
        Opcode::Jump { target } => Completion::Jump(*target),
        Opcode::JumpIfFalse { condition, target } => {
            if interpreter.window().get(*condition).is_truthy() {
                Completion::Continue
            } else {
                Completion::Jump(*target)
            }
        }
        Opcode::Call { function } => {
            // Re-entrant nested run. Its result lands in this activation's
            // reserved slot 0; a thrown value stays in the shared exception
            // slot and is observed by the loop after this step.
            let callee = executable.function(*function);
            let _ = interpreter.run(callee);
            Completion::Continue
        }
        Opcode::Return { reg } => Completion::Return(interpreter.window().get(*reg).clone()),
        Opcode::Throw { reg } => Completion::Throw(interpreter.window().get(*reg).clone()),
    }
}

/// Numeric binary operator shared by Add/Sub/Mul.
fn binary_op(
    interpreter: &mut Interpreter,
    dst: Register,
    lhs: Register,
    rhs: Register,
    op: &str,
) -> Completion {
    let lhs_value = interpreter.window().get(lhs).clone();
    let rhs_value = interpreter.window().get(rhs).clone();

    let result = match (&lhs_value, &rhs_value) {
        (Value::BigInt(a), Value::BigInt(b)) => Some(Value::BigInt(match op {
            "+" => a + b,
            "-" => a - b,
            _ => a * b,
        })),
        _ => match (lhs_value.as_number(), rhs_value.as_number()) {
            (Some(a), Some(b)) => Some(number_value(match op {
                "+" => a + b,
                "-" => a - b,
                _ => a * b,
            })),
            _ => None,
        },
    };

    match result {
        Some(value) => {
            interpreter.window_mut().set(dst, value);
            Completion::Continue
        }
        None => Completion::Throw(type_error(format!(
            "cannot apply '{}' to {} and {}",
            op,
            lhs_value.type_of(),
            rhs_value.type_of()
        ))),
    }
}

/// Pick the Smi representation when a result is a small integer.
fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n >= f64::from(i32::MIN) && n <= f64::from(i32::MAX) {
        Value::Smi(n as i32)
    } else {
        Value::Double(n)
    }
}

/// Thrown values are plain values; the object model that would wrap them in
/// proper error objects lives outside this core.
fn type_error(message: String) -> Value {
    Value::String(format!("TypeError: {}", message))
}
