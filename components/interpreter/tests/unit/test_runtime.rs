//! Unit tests for the shared runtime state

use core_types::Value;
use interpreter::{CallFrame, Runtime, GLOBAL_EXECUTION_CONTEXT_NAME};

#[test]
fn test_runtime_starts_clean() {
    let runtime = Runtime::new(Value::HeapObject(1));
    assert_eq!(runtime.call_stack_depth(), 0);
    assert!(runtime.exception().is_none());
    assert_eq!(runtime.global_object(), &Value::HeapObject(1));
}

#[test]
fn test_call_frames_stack_in_order() {
    let mut runtime = Runtime::new(Value::HeapObject(0));
    runtime.push_call_frame(CallFrame::global(Value::HeapObject(0), false));
    runtime.push_call_frame(CallFrame {
        this_value: Value::Undefined,
        function_name: "inner".to_string(),
        scope: Value::HeapObject(0),
        strict_mode: true,
    });

    assert_eq!(runtime.call_stack_depth(), 2);
    assert_eq!(
        runtime.current_frame().map(|f| f.function_name.as_str()),
        Some("inner")
    );

    runtime.pop_call_frame();
    assert_eq!(
        runtime.current_frame().map(|f| f.function_name.as_str()),
        Some(GLOBAL_EXECUTION_CONTEXT_NAME)
    );
}

#[test]
fn test_exception_slot_take_clears() {
    let mut runtime = Runtime::new(Value::HeapObject(0));
    runtime.throw_value(Value::Smi(13));
    assert!(runtime.exception().is_some());
    assert_eq!(runtime.take_exception(), Some(Value::Smi(13)));
    assert!(runtime.exception().is_none());
    assert_eq!(runtime.take_exception(), None);
}

#[test]
fn test_global_frame_strictness_comes_from_metadata() {
    let strict = CallFrame::global(Value::HeapObject(0), true);
    let sloppy = CallFrame::global(Value::HeapObject(0), false);
    assert!(strict.strict_mode);
    assert!(!sloppy.strict_mode);
}
