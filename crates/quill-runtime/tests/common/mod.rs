//! Shared test helpers

#![allow(dead_code)]

use quill_runtime::{process, Bindings, Diagnostic, Value};

pub use pretty_assertions::{assert_eq, assert_ne};

/// Process `source`, panicking with the rendered diagnostic on failure
pub fn bindings_of(source: &str) -> Bindings {
    match process(source) {
        Ok(bindings) => bindings,
        Err(diag) => panic!("Expected success, got:\n{}", diag.to_human_string()),
    }
}

/// Process `source` and expect it to fail
pub fn diagnostic_of(source: &str) -> Diagnostic {
    match process(source) {
        Ok(bindings) => panic!("Expected an error, got {:?}", bindings),
        Err(diag) => diag,
    }
}

/// Assert `name` is bound to `expected` after processing `source`
pub fn assert_binding(source: &str, name: &str, expected: Value) {
    let bindings = bindings_of(source);
    assert_eq!(bindings.get(name), Some(&expected), "binding '{}'", name);
}

/// Assert processing `source` fails with `code` on `line`
pub fn assert_error_at(source: &str, code: &str, line: usize) {
    let diag = diagnostic_of(source);
    assert_eq!(diag.code, code, "unexpected diagnostic: {}", diag);
    assert_eq!(diag.line, line, "unexpected line: {}", diag);
}
