//! Token types for operand splitting

use crate::span::Span;
use serde::{Deserialize, Serialize};

/// A contiguous operand substring produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The source text of this token, quotes included
    pub lexeme: String,
    /// Location inside the tokenized text
    pub span: Span,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    pub fn is_quoted(&self) -> bool {
        self.kind == TokenKind::Quoted
    }
}

/// Classification of tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// `"..."` run, may contain whitespace
    Quoted,
    /// Maximal run of non-whitespace characters
    Word,
}
