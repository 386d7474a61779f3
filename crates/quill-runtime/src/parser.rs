//! Line parser
//!
//! Classifies one configuration line and parses its right-hand side into a
//! [`ValueExpr`]. Nothing is resolved here; that is the interpreter's job.
//!
//! Value dispatch order:
//! 1. contains `?{` with a `}` somewhere after it -> expression
//! 2. starts with `(` and ends with `)` -> array
//! 3. anything else -> scalar

use crate::ast::{DeclKind, Expression, Operation, Statement, ValueExpr};
use crate::lexer::Lexer;
use crate::span::Span;
use crate::value::RuntimeError;

/// Opens an embedded expression
pub const EXPR_OPEN: &str = "?{";
/// Closes an embedded expression
pub const EXPR_CLOSE: char = '}';
/// Separates name and value
pub const SEPARATOR: &str = " = ";
/// Prefix of a global declaration, trailing space included
pub const GLOBAL_PREFIX: &str = "global ";

/// Parse one source line. Blank lines yield `None`.
pub fn parse_statement(line: &str) -> Result<Option<Statement>, RuntimeError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let lead = line.len() - line.trim_start().len();
    let line_span = Span::new(lead, lead + trimmed.len());

    let (kind, body, body_offset, sep) = if let Some(rest) = trimmed.strip_prefix(GLOBAL_PREFIX) {
        let invalid = || RuntimeError::InvalidGlobalDeclaration {
            line: trimmed.to_string(),
            span: line_span,
        };
        // Exactly one separator: a second one would split the value.
        if rest.matches(SEPARATOR).count() != 1 {
            return Err(invalid());
        }
        let sep = rest.find(SEPARATOR).ok_or_else(invalid)?;
        (DeclKind::Global, rest, lead + GLOBAL_PREFIX.len(), sep)
    } else {
        let sep = trimmed
            .find(SEPARATOR)
            .ok_or_else(|| RuntimeError::InvalidAssignment {
                line: trimmed.to_string(),
                span: line_span,
            })?;
        (DeclKind::Plain, trimmed, lead, sep)
    };

    // Only `global  = v` can yield an empty name; it is bound as "".
    let raw_name = &body[..sep];
    let name = raw_name.trim();
    let name_start = body_offset + (raw_name.len() - raw_name.trim_start().len());
    let value_offset = body_offset + sep + SEPARATOR.len();

    Ok(Some(Statement {
        kind,
        name: name.to_string(),
        name_span: Span::new(name_start, name_start + name.len()),
        value: parse_value_at(&body[sep + SEPARATOR.len()..], value_offset)?,
    }))
}

/// Parse a right-hand side on its own
pub fn parse_value(raw: &str) -> Result<ValueExpr, RuntimeError> {
    parse_value_at(raw, 0)
}

/// Parse a `?{...}` expression on its own
pub fn parse_expression(text: &str) -> Result<Expression, RuntimeError> {
    parse_expression_at(text, 0)
}

/// Whether `text` holds `?{` followed later by `}`
pub fn contains_expression(text: &str) -> bool {
    expression_bounds(text).is_some()
}

/// Byte positions of the first `?{` and the first `}` after it
fn expression_bounds(text: &str) -> Option<(usize, usize)> {
    let open = text.find(EXPR_OPEN)?;
    let close = text[open..].find(EXPR_CLOSE)? + open;
    Some((open, close))
}

fn parse_value_at(raw: &str, offset: usize) -> Result<ValueExpr, RuntimeError> {
    let value = raw.trim();
    let offset = offset + (raw.len() - raw.trim_start().len());
    let span = Span::new(offset, offset + value.len());

    if contains_expression(value) {
        return parse_expression_at(value, offset).map(ValueExpr::Expression);
    }

    if value.starts_with('(') && value.ends_with(')') {
        let inner = &value[1..value.len() - 1];
        let items = Lexer::new(inner)
            .map(|mut token| {
                token.span = token.span.shift(offset + 1);
                token
            })
            .collect();
        return Ok(ValueExpr::Array { items, span });
    }

    Ok(ValueExpr::Scalar {
        text: value.to_string(),
        span,
    })
}

fn parse_expression_at(text: &str, offset: usize) -> Result<Expression, RuntimeError> {
    let (open, close) = expression_bounds(text).ok_or_else(|| RuntimeError::MalformedExpression {
        expression: text.to_string(),
        span: Span::new(offset, offset + text.len()),
    })?;
    let span = Span::new(offset + open, offset + close + 1);
    let source = &text[open..=close];

    let body_offset = offset + open + EXPR_OPEN.len();
    let body = &text[open + EXPR_OPEN.len()..close];
    if body.trim().is_empty() {
        return Err(RuntimeError::EmptyExpression {
            expression: source.to_string(),
            span,
        });
    }

    let mut tokens = Lexer::new(body).map(|mut token| {
        token.span = token.span.shift(body_offset);
        token
    });
    // body is non-blank, so there is a first token
    let op = tokens.next().ok_or_else(|| RuntimeError::EmptyExpression {
        expression: source.to_string(),
        span,
    })?;
    let operands: Vec<_> = tokens.collect();

    if operands.is_empty() {
        return Err(RuntimeError::IncompleteExpression {
            operation: op.lexeme,
            span,
        });
    }

    let operation = Operation::from_name(&op.lexeme).ok_or_else(|| RuntimeError::UnknownOperation {
        operation: op.lexeme.clone(),
        span: op.span,
    })?;

    let mut ignored = Vec::new();
    let before = &text[..open];
    if !before.trim().is_empty() {
        ignored.push(Span::new(offset, offset + open));
    }
    let after = &text[close + 1..];
    if !after.trim().is_empty() {
        ignored.push(Span::new(offset + close + 1, offset + text.len()));
    }

    Ok(Expression {
        operation,
        operation_span: op.span,
        operands,
        span,
        ignored,
    })
}
