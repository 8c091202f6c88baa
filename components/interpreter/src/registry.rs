//! Thread-scoped current-interpreter registration.
//!
//! At most one interpreter may be active per thread of control, though that
//! one instance is re-entered freely via nested runs. The invariant is
//! enforced with a thread-local flag and an RAII guard held by the
//! interpreter for its lifetime; the execution context itself is threaded
//! explicitly through dispatch rather than looked up globally.

use std::cell::Cell;
use std::marker::PhantomData;

thread_local! {
    static INTERPRETER_ACTIVE: Cell<bool> = const { Cell::new(false) };
}

/// Returns whether an interpreter is currently registered on this thread.
pub fn interpreter_active() -> bool {
    INTERPRETER_ACTIVE.with(Cell::get)
}

/// RAII registration of "the interpreter driving this thread".
///
/// Acquired during interpreter construction and released on drop. The
/// `PhantomData<*const ()>` keeps the holder off other threads, matching the
/// thread-scoped nature of the registration.
#[derive(Debug)]
pub(crate) struct CurrentGuard {
    _not_send: PhantomData<*const ()>,
}

impl CurrentGuard {
    /// Register this thread's interpreter.
    ///
    /// Two live interpreters on one thread is a programmer invariant
    /// violation and fatal.
    pub(crate) fn acquire() -> Self {
        INTERPRETER_ACTIVE.with(|active| {
            assert!(
                !active.get(),
                "an interpreter is already active on this thread"
            );
            active.set(true);
        });
        Self {
            _not_send: PhantomData,
        }
    }
}

impl Drop for CurrentGuard {
    fn drop(&mut self) {
        INTERPRETER_ACTIVE.with(|active| {
            debug_assert!(active.get(), "current-interpreter registration lost");
            active.set(false);
        });
    }
}
