//! Unit tests for interpreter components

mod test_execution;
mod test_runtime;
