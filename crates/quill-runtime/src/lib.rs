//! Quill Runtime - Core language implementation
//!
//! This library provides the Quill configuration language:
//! - Tokenizing and parsing assignment lines
//! - Resolving operands and evaluating `?{...}` expressions
//! - Diagnostics with stable error codes
//! - Rendering bindings as YAML, JSON or TOML

/// Quill runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Public API modules
pub mod ast;
pub mod bindings;
pub mod diagnostic;
pub mod interpreter;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod resolver;
pub mod runtime;
pub mod span;
pub mod token;
pub mod value;

// Re-export commonly used types
pub use ast::{DeclKind, Expression, Operation, Statement, ValueExpr};
pub use bindings::Bindings;
pub use diagnostic::{error_codes, Diagnostic, DiagnosticLevel, DIAG_VERSION};
pub use interpreter::{evaluate, process, Interpreter};
pub use lexer::{tokenize, Lexer};
pub use output::{render, OutputError, OutputOptions};
pub use parser::{parse_expression, parse_statement, parse_value};
pub use quill_config::OutputFormat;
pub use resolver::resolve;
pub use runtime::{Quill, RuntimeResult};
pub use span::Span;
pub use token::{Token, TokenKind};
pub use value::{RuntimeError, Value};
