//! Unit tests for single-unit instruction execution

use bytecode_system::{Executable, ExecutableBuilder, Opcode};
use core_types::Value;
use interpreter::Interpreter;
use num_bigint::BigInt;

fn run(executable: &Executable) -> Result<Value, core_types::JsError> {
    let mut interpreter = Interpreter::new(Value::HeapObject(0));
    interpreter.run(executable)
}

fn builder() -> ExecutableBuilder {
    let mut builder = ExecutableBuilder::new();
    builder.set_strict_mode(false);
    builder
}

#[test]
fn test_load_undefined() {
    let mut b = builder();
    let reg = b.allocate_register();
    b.emit(Opcode::LoadUndefined { dst: reg });
    b.emit(Opcode::Return { reg });

    assert_eq!(run(&b.build().unwrap()).unwrap(), Value::Undefined);
}

#[test]
fn test_mov_copies_value() {
    let mut b = builder();
    let src = b.allocate_register();
    let dst = b.allocate_register();
    let index = b.add_constant(Value::String("moved".to_string()));
    b.emit(Opcode::LoadConstant { dst: src, index });
    b.emit(Opcode::Mov { dst, src });
    b.emit(Opcode::Return { reg: dst });

    assert_eq!(
        run(&b.build().unwrap()).unwrap(),
        Value::String("moved".to_string())
    );
}

#[test]
fn test_add_small_integers() {
    let mut b = builder();
    let lhs = b.allocate_register();
    let rhs = b.allocate_register();
    let out = b.allocate_register();
    let ten = b.add_constant(Value::Smi(10));
    let twenty = b.add_constant(Value::Smi(20));
    b.emit(Opcode::LoadConstant { dst: lhs, index: ten });
    b.emit(Opcode::LoadConstant { dst: rhs, index: twenty });
    b.emit(Opcode::Add { dst: out, lhs, rhs });
    b.emit(Opcode::Return { reg: out });

    assert_eq!(run(&b.build().unwrap()).unwrap(), Value::Smi(30));
}

#[test]
fn test_sub_and_mul() {
    let mut b = builder();
    let lhs = b.allocate_register();
    let rhs = b.allocate_register();
    let seven = b.add_constant(Value::Smi(7));
    let three = b.add_constant(Value::Smi(3));
    b.emit(Opcode::LoadConstant { dst: lhs, index: seven });
    b.emit(Opcode::LoadConstant { dst: rhs, index: three });
    b.emit(Opcode::Sub { dst: lhs, lhs, rhs });
    b.emit(Opcode::Mul { dst: lhs, lhs, rhs });
    b.emit(Opcode::Return { reg: lhs });

    // (7 - 3) * 3
    assert_eq!(run(&b.build().unwrap()).unwrap(), Value::Smi(12));
}

#[test]
fn test_add_produces_double_when_needed() {
    let mut b = builder();
    let lhs = b.allocate_register();
    let rhs = b.allocate_register();
    let half = b.add_constant(Value::Double(0.5));
    let one = b.add_constant(Value::Smi(1));
    b.emit(Opcode::LoadConstant { dst: lhs, index: half });
    b.emit(Opcode::LoadConstant { dst: rhs, index: one });
    b.emit(Opcode::Add { dst: lhs, lhs, rhs });
    b.emit(Opcode::Return { reg: lhs });

    assert_eq!(run(&b.build().unwrap()).unwrap(), Value::Double(1.5));
}

#[test]
fn test_bigint_arithmetic() {
    let mut b = builder();
    let lhs = b.allocate_register();
    let rhs = b.allocate_register();
    let big = b.add_constant(Value::BigInt(BigInt::from(1_000_000_000_000_i64)));
    let two = b.add_constant(Value::BigInt(BigInt::from(2)));
    b.emit(Opcode::LoadConstant { dst: lhs, index: big });
    b.emit(Opcode::LoadConstant { dst: rhs, index: two });
    b.emit(Opcode::Mul { dst: lhs, lhs, rhs });
    b.emit(Opcode::Return { reg: lhs });

    assert_eq!(
        run(&b.build().unwrap()).unwrap(),
        Value::BigInt(BigInt::from(2_000_000_000_000_i64))
    );
}

#[test]
fn test_increment() {
    let mut b = builder();
    let reg = b.allocate_register();
    let index = b.add_constant(Value::Smi(41));
    b.emit(Opcode::LoadConstant { dst: reg, index });
    b.emit(Opcode::Increment { reg });
    b.emit(Opcode::Return { reg });

    assert_eq!(run(&b.build().unwrap()).unwrap(), Value::Smi(42));
}

#[test]
fn test_increment_overflows_to_double() {
    let mut b = builder();
    let reg = b.allocate_register();
    let index = b.add_constant(Value::Smi(i32::MAX));
    b.emit(Opcode::LoadConstant { dst: reg, index });
    b.emit(Opcode::Increment { reg });
    b.emit(Opcode::Return { reg });

    assert_eq!(
        run(&b.build().unwrap()).unwrap(),
        Value::Double(f64::from(i32::MAX) + 1.0)
    );
}

#[test]
fn test_less_than() {
    let mut b = builder();
    let lhs = b.allocate_register();
    let rhs = b.allocate_register();
    let out = b.allocate_register();
    let one = b.add_constant(Value::Smi(1));
    let two = b.add_constant(Value::Smi(2));
    b.emit(Opcode::LoadConstant { dst: lhs, index: one });
    b.emit(Opcode::LoadConstant { dst: rhs, index: two });
    b.emit(Opcode::LessThan { dst: out, lhs, rhs });
    b.emit(Opcode::Return { reg: out });

    assert_eq!(run(&b.build().unwrap()).unwrap(), Value::Boolean(true));
}

#[test]
fn test_arithmetic_type_error_is_thrown() {
    let mut b = builder();
    let lhs = b.allocate_register();
    let rhs = b.allocate_register();
    let text = b.add_constant(Value::String("nope".to_string()));
    let one = b.add_constant(Value::Smi(1));
    b.emit(Opcode::LoadConstant { dst: lhs, index: text });
    b.emit(Opcode::LoadConstant { dst: rhs, index: one });
    b.emit(Opcode::Add { dst: lhs, lhs, rhs });
    b.emit(Opcode::Return { reg: lhs });
    let executable = b.build().unwrap();

    let mut interpreter = Interpreter::new(Value::HeapObject(0));
    assert!(interpreter.run(&executable).is_err());
    // The thrown value stays in the shared exception slot
    let thrown = interpreter.runtime().exception().cloned();
    assert!(matches!(thrown, Some(Value::String(message)) if message.starts_with("TypeError")));
}
