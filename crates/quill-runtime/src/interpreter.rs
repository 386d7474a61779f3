//! Statement interpreter
//!
//! Processes configuration text line by line against one binding table.
//! Each line may observe every binding made by the lines before it and none
//! after it. The first failing line stops processing.

use crate::ast::{Expression, Operation, Statement, ValueExpr};
use crate::bindings::Bindings;
use crate::diagnostic::{error_codes, Diagnostic};
use crate::parser::{parse_expression, parse_statement};
use crate::resolver::{resolve, resolve_token};
use crate::runtime::RuntimeResult;
use crate::span::Span;
use crate::token::Token;
use crate::value::{RuntimeError, Value};

/// Interpreter state
pub struct Interpreter {
    /// Global binding table
    bindings: Bindings,
    /// Warnings collected while processing
    warnings: Vec<Diagnostic>,
}

impl Interpreter {
    /// Create an interpreter with an empty binding table
    pub fn new() -> Self {
        Self::with_bindings(Bindings::new())
    }

    /// Create an interpreter seeded with existing bindings
    pub fn with_bindings(bindings: Bindings) -> Self {
        Self {
            bindings,
            warnings: Vec::new(),
        }
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn into_bindings(self) -> Bindings {
        self.bindings
    }

    /// Warnings produced so far, oldest first
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.warnings)
    }

    /// Process a whole configuration text
    ///
    /// Lines before the failing one stay applied; callers that need
    /// all-or-nothing behaviour should work on a copy (see [`crate::Quill`]).
    pub fn process(&mut self, source: &str) -> RuntimeResult<()> {
        for (index, line) in source.lines().enumerate() {
            let line_no = index + 1;
            let seen = self.warnings.len();
            match self.exec_line(line) {
                Ok(Some(name)) => {
                    tracing::debug!(line = line_no, name = %name, "bound");
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::debug!(line = line_no, code = err.code(), "line failed");
                    return Err(Diagnostic::from_runtime_error(&err, line_no, line));
                }
            }
            for warning in &mut self.warnings[seen..] {
                warning.line = line_no;
            }
        }
        Ok(())
    }

    /// Parse and execute one line, returning the name it bound
    pub fn exec_line(&mut self, line: &str) -> Result<Option<String>, RuntimeError> {
        let Some(stmt) = parse_statement(line)? else {
            return Ok(None);
        };
        self.exec_statement(&stmt)?;
        if let ValueExpr::Expression(expr) = &stmt.value {
            for span in &expr.ignored {
                tracing::debug!(
                    name = %stmt.name,
                    span = ?span,
                    "ignoring text outside expression"
                );
                self.warnings.push(ignored_text_warning(&stmt.name, line, *span));
            }
        }
        Ok(Some(stmt.name))
    }

    /// Evaluate a statement's value and bind it
    pub fn exec_statement(&mut self, stmt: &Statement) -> Result<(), RuntimeError> {
        let value = self.eval_value(&stmt.value)?;
        if self.bindings.define(stmt.name.clone(), value).is_some() {
            tracing::trace!(name = %stmt.name, "rebinding");
        }
        Ok(())
    }

    /// Evaluate a parsed right-hand side
    pub fn eval_value(&self, value: &ValueExpr) -> Result<Value, RuntimeError> {
        match value {
            ValueExpr::Expression(expr) => self.eval_expression(expr),
            ValueExpr::Array { items, .. } => Ok(Value::Array(
                items.iter().map(|token| token.lexeme.clone()).collect(),
            )),
            ValueExpr::Scalar { text, span } => {
                resolve(&self.bindings, text).map_err(|e| e.offset_by(span.start))
            }
        }
    }

    /// Evaluate a parsed expression
    pub fn eval_expression(&self, expr: &Expression) -> Result<Value, RuntimeError> {
        match expr.operation {
            Operation::Sum => self.sum(expr),
            Operation::Concat => self.concat(&expr.operands),
        }
    }

    fn sum(&self, expr: &Expression) -> Result<Value, RuntimeError> {
        let mut total: i64 = 0;
        for token in &expr.operands {
            let n = match resolve_token(&self.bindings, token)? {
                Value::Integer(n) => n,
                other => {
                    return Err(RuntimeError::TypeMismatch {
                        operation: Operation::Sum.name().to_string(),
                        expected: "integer",
                        found: other.type_name(),
                        operand: token.lexeme.clone(),
                        span: token.span,
                    })
                }
            };
            total = total
                .checked_add(n)
                .ok_or_else(|| RuntimeError::ArithmeticOverflow {
                    operation: Operation::Sum.name().to_string(),
                    span: expr.span,
                })?;
        }
        Ok(Value::Integer(total))
    }

    fn concat(&self, operands: &[Token]) -> Result<Value, RuntimeError> {
        let mut out = String::new();
        for token in operands {
            out.push_str(&resolve_token(&self.bindings, token)?.to_display_string());
        }
        Ok(Value::Text(out))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn ignored_text_warning(name: &str, line: &str, span: Span) -> Diagnostic {
    let mut warning = Diagnostic::warning_with_code(
        error_codes::IGNORED_TEXT,
        format!("Text outside the expression assigned to '{}' is ignored", name),
    )
    .with_location(line, span)
    .with_label("ignored");
    if let Some(help) = error_codes::help_for(error_codes::IGNORED_TEXT) {
        warning = warning.with_help(help);
    }
    warning
}

/// Process a whole configuration text into a fresh binding table
///
/// Warnings are dropped; use [`Interpreter`] or [`crate::Quill`] to keep them.
pub fn process(source: &str) -> RuntimeResult<Bindings> {
    let mut interpreter = Interpreter::new();
    interpreter.process(source)?;
    Ok(interpreter.into_bindings())
}

/// Evaluate a standalone `?{...}` expression against `bindings`
pub fn evaluate(bindings: &Bindings, text: &str) -> Result<Value, RuntimeError> {
    let expr = parse_expression(text)?;
    Interpreter::with_bindings(bindings.clone()).eval_expression(&expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sum() {
        let bindings = Bindings::new();
        assert_eq!(evaluate(&bindings, "?{+ 1 2 3}"), Ok(Value::Integer(6)));
        assert_eq!(evaluate(&bindings, "?{+ -4}"), Ok(Value::Integer(-4)));
    }

    #[test]
    fn test_concat() {
        let bindings = Bindings::new();
        assert_eq!(
            evaluate(&bindings, r#"?{concat "a" "b" 1}"#),
            Ok(Value::text("ab1"))
        );
    }

    #[test]
    fn test_sum_rejects_text() {
        let err = evaluate(&Bindings::new(), r#"?{+ 1 "x"}"#).unwrap_err();
        assert_eq!(
            err,
            RuntimeError::TypeMismatch {
                operation: "+".to_string(),
                expected: "integer",
                found: "text",
                operand: "\"x\"".to_string(),
                span: Span::new(6, 9),
            }
        );
    }

    #[test]
    fn test_sum_rejects_array_binding() {
        let mut interp = Interpreter::new();
        interp.exec_line("xs = (1 2)").unwrap();
        let err = interp.exec_line("total = ?{+ xs 1}").unwrap_err();
        assert!(matches!(err, RuntimeError::TypeMismatch { found: "array", .. }));
    }

    #[test]
    fn test_sum_overflow_is_checked() {
        let err = evaluate(&Bindings::new(), "?{+ 9223372036854775807 1}").unwrap_err();
        assert!(matches!(err, RuntimeError::ArithmeticOverflow { .. }));
        // intermediate overflow counts even if a later operand would undo it
        let err = evaluate(&Bindings::new(), "?{+ 9223372036854775807 1 -1}").unwrap_err();
        assert!(matches!(err, RuntimeError::ArithmeticOverflow { .. }));
    }

    #[test]
    fn test_unknown_operand_stops_before_later_operands() {
        let err = evaluate(&Bindings::new(), r#"?{concat nope "x"}"#).unwrap_err();
        assert_eq!(
            err,
            RuntimeError::UnknownOperand {
                operand: "nope".to_string(),
                span: Span::new(9, 13),
            }
        );
    }

    #[test]
    fn test_concat_of_array_uses_literal_form() {
        let mut interp = Interpreter::new();
        interp.exec_line(r#"xs = (a "b c")"#).unwrap();
        interp.exec_line("s = ?{concat xs \"!\"}").unwrap();
        assert_eq!(
            interp.bindings().get("s"),
            Some(&Value::text("(a \"b c\")!"))
        );
    }

    #[test]
    fn test_scalar_error_span_is_line_relative() {
        let mut interp = Interpreter::new();
        let err = interp.exec_line("  port = missing").unwrap_err();
        assert_eq!(err.span(), Span::new(9, 16));
    }

    #[test]
    fn test_ignored_text_warning() {
        let mut interp = Interpreter::new();
        interp.process("x = ?{+ 1 2} trailing").unwrap();
        assert_eq!(interp.bindings().get("x"), Some(&Value::Integer(3)));

        let warnings = interp.take_warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, error_codes::IGNORED_TEXT);
        assert_eq!(warnings[0].line, 1);
        assert_eq!(warnings[0].column, 13);
        assert!(interp.warnings().is_empty());
    }

    #[test]
    fn test_process_reports_line_of_failure() {
        let mut interp = Interpreter::new();
        let diag = interp.process("a = 1\n\nb = ?{+ a c}\nc = 3").unwrap_err();
        assert_eq!(diag.code, error_codes::UNKNOWN_OPERAND);
        assert_eq!(diag.line, 3);
        assert_eq!(diag.column, 11);
        assert_eq!(diag.snippet, "b = ?{+ a c}");
        // the earlier line stays applied, the later one never ran
        assert!(interp.bindings().contains("a"));
        assert!(!interp.bindings().contains("c"));
    }
}
