//! Quill runtime API for embedding

use crate::bindings::Bindings;
use crate::diagnostic::{error_codes, Diagnostic};
use crate::interpreter::Interpreter;
use crate::value::Value;
use std::cell::RefCell;
use std::path::Path;

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, Diagnostic>;

/// Input name used when none is given
pub const DEFAULT_INPUT_NAME: &str = "<input>";

/// Quill runtime instance
///
/// Keeps one binding table across calls. Each call to [`Quill::process`] is
/// all-or-nothing: a failing text leaves the bindings as they were.
///
/// # Examples
///
/// ```
/// use quill_runtime::{Quill, Value};
///
/// let quill = Quill::new();
/// quill.process("global x = 5\ny = ?{+ x 2}").unwrap();
/// assert_eq!(quill.get("y"), Some(Value::Integer(7)));
/// ```
pub struct Quill {
    /// Committed state (using interior mutability)
    interpreter: RefCell<Interpreter>,
    /// Warnings from committed calls, tagged with their input name
    warnings: RefCell<Vec<Diagnostic>>,
    /// Name reported in diagnostics
    input_name: String,
}

impl Quill {
    /// Create a new runtime with an empty binding table
    pub fn new() -> Self {
        Self {
            interpreter: RefCell::new(Interpreter::new()),
            warnings: RefCell::new(Vec::new()),
            input_name: DEFAULT_INPUT_NAME.to_string(),
        }
    }

    /// Set the input name shown in diagnostics (a path, or `<stdin>`)
    pub fn with_input_name(mut self, name: impl Into<String>) -> Self {
        self.input_name = name.into();
        self
    }

    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    /// Process configuration text
    ///
    /// Returns a snapshot of all bindings after the text was applied, or the
    /// diagnostic for the first failing line.
    pub fn process(&self, source: &str) -> RuntimeResult<Bindings> {
        self.process_named(source, &self.input_name)
    }

    /// Read and process a configuration file
    ///
    /// The file path is the input name for this call's diagnostics.
    pub fn process_file(&self, path: impl AsRef<Path>) -> RuntimeResult<Bindings> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let source = std::fs::read_to_string(path).map_err(|e| {
            Diagnostic::error_with_code(
                error_codes::INPUT_UNREADABLE,
                format!("Failed to read file: {}", e),
            )
            .with_file(name.clone())
        })?;

        self.process_named(&source, &name)
    }

    fn process_named(&self, source: &str, name: &str) -> RuntimeResult<Bindings> {
        let mut staged = Interpreter::with_bindings(self.bindings());
        staged.process(source).map_err(|diag| diag.with_file(name))?;

        self.warnings.borrow_mut().extend(
            staged
                .take_warnings()
                .into_iter()
                .map(|warning| warning.with_file(name)),
        );
        let bindings = staged.into_bindings();
        *self.interpreter.borrow_mut() = Interpreter::with_bindings(bindings.clone());
        Ok(bindings)
    }

    /// Copy of the current bindings
    pub fn bindings(&self) -> Bindings {
        self.interpreter.borrow().bindings().clone()
    }

    /// Current value bound to `name`
    pub fn get(&self, name: &str) -> Option<Value> {
        self.interpreter.borrow().bindings().get(name).cloned()
    }

    /// Drain the warnings collected so far
    pub fn take_warnings(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.warnings.borrow_mut())
    }
}

impl Default for Quill {
    fn default() -> Self {
        Self::new()
    }
}
