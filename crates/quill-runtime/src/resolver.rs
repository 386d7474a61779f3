//! Operand resolution
//!
//! Turns one operand into a value. Candidates are tried in a fixed order and
//! the first match wins:
//!
//! 1. base-10 `i64` literal (optional leading `+`/`-`, single `_` allowed
//!    between digits as in `1_000`)
//! 2. `"..."` quoted text, outer quotes stripped, no escapes
//! 3. name already present in the binding table
//!
//! Anything else is an unknown operand.

use crate::bindings::Bindings;
use crate::span::Span;
use crate::token::Token;
use crate::value::{RuntimeError, Value};

/// Resolve a bare operand string
pub fn resolve(bindings: &Bindings, operand: &str) -> Result<Value, RuntimeError> {
    resolve_at(bindings, operand, Span::new(0, operand.len()))
}

/// Resolve a token produced by the lexer, reporting errors at its span
pub fn resolve_token(bindings: &Bindings, token: &Token) -> Result<Value, RuntimeError> {
    resolve_at(bindings, &token.lexeme, token.span)
}

fn resolve_at(bindings: &Bindings, operand: &str, span: Span) -> Result<Value, RuntimeError> {
    let value = integer_literal(operand)
        .or_else(|| quoted_text(operand))
        .or_else(|| bindings.get(operand).cloned())
        .ok_or_else(|| RuntimeError::UnknownOperand {
            operand: operand.to_string(),
            span,
        })?;

    tracing::trace!(operand, kind = value.type_name(), "resolved operand");
    Ok(value)
}

fn integer_literal(operand: &str) -> Option<Value> {
    if !operand.contains('_') {
        return operand.parse::<i64>().ok().map(Value::Integer);
    }

    let digits = operand.trim_start_matches(['+', '-']);
    // exactly one sign at most, and every `_` sits between two digits
    if operand.len() - digits.len() > 1 || digits.split('_').any(|group| group.is_empty()) {
        return None;
    }
    operand.replace('_', "").parse::<i64>().ok().map(Value::Integer)
}

fn quoted_text(operand: &str) -> Option<Value> {
    // A lone `"` is both first and last character; it needs a partner.
    if operand.len() < 2 {
        return None;
    }
    operand
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .map(Value::text)
}
