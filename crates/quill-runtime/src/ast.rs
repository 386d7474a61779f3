//! Parsed form of configuration lines
//!
//! All spans are byte ranges into the source line the node came from.

use crate::span::Span;
use crate::token::Token;
use serde::{Deserialize, Serialize};

/// How a name was declared. Storage is identical for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclKind {
    /// `name = value`
    Plain,
    /// `global name = value`
    Global,
}

/// One assignment line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub kind: DeclKind,
    /// Trimmed name being bound
    pub name: String,
    pub name_span: Span,
    pub value: ValueExpr,
}

/// Right-hand side of an assignment, in dispatch order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValueExpr {
    /// `?{op operand...}`
    Expression(Expression),
    /// `(token token ...)`; members are kept verbatim
    Array { items: Vec<Token>, span: Span },
    /// Integer literal, quoted text, or a name
    Scalar { text: String, span: Span },
}

impl ValueExpr {
    pub fn span(&self) -> Span {
        match self {
            ValueExpr::Expression(expr) => expr.span,
            ValueExpr::Array { span, .. } | ValueExpr::Scalar { span, .. } => *span,
        }
    }
}

/// Operations understood inside `?{...}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// `+`: checked integer sum
    Sum,
    /// `concat`: textual concatenation
    Concat,
}

impl Operation {
    /// Look up an operation by its source name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "+" => Some(Operation::Sum),
            "concat" => Some(Operation::Concat),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::Sum => "+",
            Operation::Concat => "concat",
        }
    }
}

/// A parsed `?{op operand...}` expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub operation: Operation,
    pub operation_span: Span,
    /// At least one operand, unresolved
    pub operands: Vec<Token>,
    /// From `?` through the closing `}`
    pub span: Span,
    /// Non-blank text before `?{` or after `}`; it takes no part in evaluation
    pub ignored: Vec<Span>,
}
