//! Abrupt completions: throws, unwinding, and interpreter reuse afterwards

use bytecode_system::{Executable, ExecutableBuilder, Opcode};
use core_types::{SourcePosition, Value};
use interpreter::{Interpreter, GLOBAL_EXECUTION_CONTEXT_NAME};

fn builder() -> ExecutableBuilder {
    let mut builder = ExecutableBuilder::new();
    builder.set_strict_mode(false);
    builder
}

fn throw_string(message: &str) -> Executable {
    let mut b = builder();
    let reg = b.allocate_register();
    let index = b.add_constant(Value::String(message.to_string()));
    b.emit(Opcode::LoadConstant { dst: reg, index });
    b.emit(Opcode::Throw { reg });
    b.build().unwrap()
}

#[test]
fn test_throw_stops_the_block() {
    // Everything after the throw must never run, so the exception slot
    // still holds the first value when the run reports failure.
    let mut b = builder();
    let reg = b.allocate_register();
    let first = b.add_constant(Value::String("first".to_string()));
    let second = b.add_constant(Value::String("second".to_string()));
    b.emit(Opcode::LoadConstant { dst: reg, index: first });
    b.emit(Opcode::Throw { reg });
    b.emit(Opcode::LoadConstant { dst: reg, index: second });
    b.emit(Opcode::Throw { reg });
    let executable = b.build().unwrap();

    let mut interpreter = Interpreter::new(Value::HeapObject(0));
    assert!(interpreter.run(&executable).is_err());
    assert_eq!(
        interpreter.runtime().exception(),
        Some(&Value::String("first".to_string()))
    );
    assert_eq!(interpreter.window_depth(), 0);
    assert_eq!(interpreter.runtime().call_stack_depth(), 0);
}

#[test]
fn test_nested_throw_unwinds_the_caller() {
    let callee = throw_string("from callee");

    // caller: call the throwing unit, then try to throw its own value.
    // The callee's exception must stop the caller before it gets there.
    let mut b = builder();
    let reg = b.allocate_register();
    let own = b.add_constant(Value::String("from caller".to_string()));
    let function = b.add_function(callee);
    b.emit(Opcode::Call { function });
    b.emit(Opcode::LoadConstant { dst: reg, index: own });
    b.emit(Opcode::Throw { reg });
    let caller = b.build().unwrap();

    let mut interpreter = Interpreter::new(Value::HeapObject(0));
    assert!(interpreter.run(&caller).is_err());
    assert_eq!(
        interpreter.runtime().exception(),
        Some(&Value::String("from callee".to_string()))
    );
    // Both activations were torn down on the way out
    assert_eq!(interpreter.window_depth(), 0);
    assert_eq!(interpreter.runtime().call_stack_depth(), 0);
}

#[test]
fn test_interpreter_is_reusable_after_taking_the_exception() {
    let failing = throw_string("boom");

    let mut ok = builder();
    let reg = ok.allocate_register();
    let index = ok.add_constant(Value::Smi(7));
    ok.emit(Opcode::LoadConstant { dst: reg, index });
    ok.emit(Opcode::Return { reg });
    let succeeding = ok.build().unwrap();

    let mut interpreter = Interpreter::new(Value::HeapObject(0));
    assert!(interpreter.run(&failing).is_err());
    assert_eq!(
        interpreter.runtime_mut().take_exception(),
        Some(Value::String("boom".to_string()))
    );

    assert_eq!(interpreter.run(&succeeding).unwrap(), Value::Smi(7));
    assert!(interpreter.runtime().exception().is_none());
}

#[test]
fn test_error_message_names_the_thrown_value() {
    let failing = throw_string("kaput");
    let mut interpreter = Interpreter::new(Value::HeapObject(0));
    let error = interpreter.run(&failing).unwrap_err();
    assert!(error.message.contains("kaput"));
}

#[test]
fn test_error_carries_throw_site_and_stack() {
    let mut b = builder();
    let reg = b.allocate_register();
    let index = b.add_constant(Value::Smi(1));
    b.emit(Opcode::LoadConstant { dst: reg, index });
    b.emit_with_position(Opcode::Throw { reg }, SourcePosition::new(3, 9, 27));
    let executable = b.build().unwrap();

    let mut interpreter = Interpreter::new(Value::HeapObject(0));
    let error = interpreter.run(&executable).unwrap_err();

    let position = error.source_position.expect("throw site recorded");
    assert_eq!((position.line, position.column), (3, 9));

    assert_eq!(error.stack.len(), 1);
    assert_eq!(
        error.stack[0].function_name.as_deref(),
        Some(GLOBAL_EXECUTION_CONTEXT_NAME)
    );
    assert_eq!(error.stack[0].line, 3);
}
