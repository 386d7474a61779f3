//! Runtime value representation
//!
//! - Integers: 64-bit signed
//! - Text: owned UTF-8 strings
//! - Arrays: the raw member tokens of an array literal, never evaluated

use crate::diagnostic::error_codes;
use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A resolved configuration value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Text(String),
    /// Raw tokens exactly as written between the parentheses
    Array(Vec<String>),
}

impl Value {
    /// Create a text value
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Create an array value from raw tokens
    pub fn array<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    /// Name of the value's type, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Text(_) => "text",
            Value::Array(_) => "array",
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Textual form used by `concat`
    ///
    /// Integers print as decimal digits, text as itself, arrays in their
    /// literal form `(a b c)`.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
            Value::Array(items) => write!(f, "({})", items.join(" ")),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// Every way processing a configuration can fail
///
/// Spans are byte ranges into the text handed to the failing operation; the
/// interpreter rebases them onto the source line before reporting.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Operand is not an integer, a quoted string, or a bound name
    #[error("Unknown operand: {operand}")]
    UnknownOperand { operand: String, span: Span },

    /// Operand resolved to a value the operation cannot use
    #[error("Type mismatch: '{operation}' expects {expected}, found {found} in operand '{operand}'")]
    TypeMismatch {
        operation: String,
        expected: &'static str,
        found: &'static str,
        operand: String,
        span: Span,
    },

    /// Integer sum left the i64 range
    #[error("Integer overflow while evaluating '{operation}'")]
    ArithmeticOverflow { operation: String, span: Span },

    /// `?{` without a later `}`
    #[error("Malformed expression: {expression}")]
    MalformedExpression { expression: String, span: Span },

    /// `?{}` with only whitespace inside
    #[error("Empty expression: {expression}")]
    EmptyExpression { expression: String, span: Span },

    /// Operation without operands
    #[error("Incomplete expression: '{operation}' needs at least one operand")]
    IncompleteExpression { operation: String, span: Span },

    /// Operation other than `+` or `concat`
    #[error("Unknown operation: {operation}")]
    UnknownOperation { operation: String, span: Span },

    /// Line without a ` = ` separator
    #[error("Invalid assignment: {line}")]
    InvalidAssignment { line: String, span: Span },

    /// `global` line whose separator is missing or repeated
    #[error("Invalid global declaration: {line}")]
    InvalidGlobalDeclaration { line: String, span: Span },
}

impl RuntimeError {
    /// Get the source span for this error
    pub fn span(&self) -> Span {
        match self {
            RuntimeError::UnknownOperand { span, .. }
            | RuntimeError::TypeMismatch { span, .. }
            | RuntimeError::ArithmeticOverflow { span, .. }
            | RuntimeError::MalformedExpression { span, .. }
            | RuntimeError::EmptyExpression { span, .. }
            | RuntimeError::IncompleteExpression { span, .. }
            | RuntimeError::UnknownOperation { span, .. }
            | RuntimeError::InvalidAssignment { span, .. }
            | RuntimeError::InvalidGlobalDeclaration { span, .. } => *span,
        }
    }

    fn span_mut(&mut self) -> &mut Span {
        match self {
            RuntimeError::UnknownOperand { span, .. }
            | RuntimeError::TypeMismatch { span, .. }
            | RuntimeError::ArithmeticOverflow { span, .. }
            | RuntimeError::MalformedExpression { span, .. }
            | RuntimeError::EmptyExpression { span, .. }
            | RuntimeError::IncompleteExpression { span, .. }
            | RuntimeError::UnknownOperation { span, .. }
            | RuntimeError::InvalidAssignment { span, .. }
            | RuntimeError::InvalidGlobalDeclaration { span, .. } => span,
        }
    }

    /// Rebase the span by `offset` bytes
    pub fn offset_by(mut self, offset: usize) -> Self {
        let span = self.span_mut();
        *span = span.shift(offset);
        self
    }

    /// Diagnostic code for this error
    pub fn code(&self) -> &'static str {
        match self {
            RuntimeError::UnknownOperand { .. } => error_codes::UNKNOWN_OPERAND,
            RuntimeError::TypeMismatch { .. } => error_codes::TYPE_MISMATCH,
            RuntimeError::ArithmeticOverflow { .. } => error_codes::ARITHMETIC_OVERFLOW,
            RuntimeError::MalformedExpression { .. } => error_codes::MALFORMED_EXPRESSION,
            RuntimeError::EmptyExpression { .. } => error_codes::EMPTY_EXPRESSION,
            RuntimeError::IncompleteExpression { .. } => error_codes::INCOMPLETE_EXPRESSION,
            RuntimeError::UnknownOperation { .. } => error_codes::UNKNOWN_OPERATION,
            RuntimeError::InvalidAssignment { .. } => error_codes::INVALID_ASSIGNMENT,
            RuntimeError::InvalidGlobalDeclaration { .. } => {
                error_codes::INVALID_GLOBAL_DECLARATION
            }
        }
    }
}
