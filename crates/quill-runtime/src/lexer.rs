//! Quote-aware operand splitting
//!
//! Expression bodies and array literals are split on whitespace, except that a
//! double-quoted run is kept as one token. The quotes stay in the lexeme.
//!
//! At every token start the lexer first tries a quoted run (a `"` with a
//! matching later `"`); failing that it takes the longest run of
//! non-whitespace characters, which may itself contain stray quotes.

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Lexer over a borrowed piece of source text
pub struct Lexer<'src> {
    /// Text being split
    source: &'src str,
    /// Byte offset of the next unread character
    current: usize,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given text
    pub fn new(source: &'src str) -> Self {
        Self { source, current: 0 }
    }

    /// Split the whole text into tokens
    pub fn tokenize(&mut self) -> Vec<Token> {
        self.by_ref().collect()
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.source[self.current..];
        self.current += rest.len() - rest.trim_start().len();
    }

    fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace();

        let start = self.current;
        let rest = &self.source[start..];
        if rest.is_empty() {
            return None;
        }

        if let Some(body) = rest.strip_prefix('"') {
            if let Some(close) = body.find('"') {
                // opening quote + body + closing quote
                let end = start + close + 2;
                return Some(self.make_token(TokenKind::Quoted, start, end));
            }
        }

        let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        Some(self.make_token(TokenKind::Word, start, start + len))
    }

    fn make_token(&mut self, kind: TokenKind, start: usize, end: usize) -> Token {
        self.current = end;
        Token::new(kind, &self.source[start..end], Span::new(start, end))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

/// Split `text` into tokens
pub fn tokenize(text: &str) -> Vec<Token> {
    Lexer::new(text).tokenize()
}
