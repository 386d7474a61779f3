//! Diagnostic system for errors and warnings
//!
//! Every failure and warning is reported through the unified Diagnostic type,
//! so the CLI can print it for humans or as JSON.

pub mod error_codes;

use crate::span::Span;
use crate::value::RuntimeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic schema version
pub const DIAG_VERSION: u32 = 1;

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    /// Fatal error, no output is produced
    Error,
    /// Processing continues
    Warning,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Error => write!(f, "error"),
            DiagnosticLevel::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message (error or warning)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Diagnostic schema version
    pub diag_version: u32,
    /// Severity level
    pub level: DiagnosticLevel,
    /// Error code (e.g., "QL0001")
    pub code: String,
    /// Main diagnostic message
    pub message: String,
    /// Input name ("<stdin>" or a file path)
    pub file: String,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based, in characters)
    pub column: usize,
    /// Length of the marked range, in characters
    pub length: usize,
    /// Source line string
    pub snippet: String,
    /// Short label for caret range
    pub label: String,
    /// Additional notes (optional)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
    /// Suggested fix (optional)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub help: Option<String>,
}

impl Diagnostic {
    fn new(level: DiagnosticLevel, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            diag_version: DIAG_VERSION,
            level,
            code: code.into(),
            message: message.into(),
            file: "<input>".to_string(),
            line: 1,
            column: 1,
            length: 0,
            snippet: String::new(),
            label: String::new(),
            notes: Vec::new(),
            help: None,
        }
    }

    /// Create a new error diagnostic with code
    pub fn error_with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, code, message)
    }

    /// Create a new warning diagnostic with code
    pub fn warning_with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warning, code, message)
    }

    /// Build the diagnostic for a failed line
    pub fn from_runtime_error(error: &RuntimeError, line: usize, source_line: &str) -> Self {
        let mut diag = Self::error_with_code(error.code(), error.to_string())
            .with_line(line)
            .with_location(source_line, error.span());
        diag.label = match error {
            RuntimeError::UnknownOperand { .. } => "not a number, string, or known name",
            RuntimeError::TypeMismatch { found, .. } => *found,
            RuntimeError::ArithmeticOverflow { .. } => "sum overflows",
            RuntimeError::UnknownOperation { .. } => "unknown operation",
            RuntimeError::IncompleteExpression { .. } => "missing operands",
            RuntimeError::EmptyExpression { .. } => "empty",
            RuntimeError::MalformedExpression { .. } => "unclosed expression",
            RuntimeError::InvalidAssignment { .. }
            | RuntimeError::InvalidGlobalDeclaration { .. } => "expected `name = value`",
        }
        .to_string();
        if let Some(help) = error_codes::help_for(error.code()) {
            diag.help = Some(help.to_string());
        }
        diag
    }

    /// Set the file path
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    /// Set the line number
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Set snippet, column and length from a byte span of `source_line`
    pub fn with_location(mut self, source_line: &str, span: Span) -> Self {
        let char_count = |from: usize, to: usize| {
            source_line
                .get(from.min(to)..to)
                .map_or(0, |s| s.chars().count())
        };
        let end = span.end.min(source_line.len());
        let start = span.start.min(end);
        self.column = char_count(0, start) + 1;
        self.length = char_count(start, end);
        self.snippet = source_line.to_string();
        self
    }

    /// Set the label (caret description)
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Add a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Add a help message
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Format as human-readable string
    pub fn to_human_string(&self) -> String {
        let mut output = String::new();

        // Header: error[QL0001]: Unknown operand: foo
        output.push_str(&format!("{}[{}]: {}\n", self.level, self.code, self.message));

        // Location: --> <stdin>:3:9
        output.push_str(&format!("  --> {}:{}:{}\n", self.file, self.line, self.column));

        if !self.snippet.is_empty() {
            output.push_str("   |\n");
            output.push_str(&format!("{:>2} | {}\n", self.line, self.snippet));

            if self.length > 0 {
                let padding = " ".repeat(self.column - 1);
                let carets = "^".repeat(self.length);
                output.push_str(&format!("   | {}{}", padding, carets));

                if !self.label.is_empty() {
                    output.push_str(&format!(" {}", self.label));
                }
                output.push('\n');
            }
        }

        for note in &self.notes {
            output.push_str(&format!("   = note: {}\n", note));
        }

        if let Some(help) = &self.help {
            output.push_str(&format!("   = help: {}\n", help));
        }

        output
    }

    /// Format as JSON string
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}: {}", self.file, self.line, self.column, self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_location_counts_characters() {
        let line = "имя = ?{+ 1 x}";
        // "x" sits after the multi-byte name
        let start = line.find('x').unwrap();
        let diag = Diagnostic::error_with_code("QL0001", "Unknown operand: x")
            .with_location(line, Span::new(start, start + 1));
        assert_eq!(diag.column, 13);
        assert_eq!(diag.length, 1);
    }

    #[test]
    fn test_human_format() {
        let line = "port = ?{+ 1 \"x\"}";
        let err = RuntimeError::TypeMismatch {
            operation: "+".to_string(),
            expected: "integer",
            found: "text",
            operand: "\"x\"".to_string(),
            span: Span::new(13, 16),
        };
        let text = Diagnostic::from_runtime_error(&err, 4, line)
            .with_file("<stdin>")
            .to_human_string();

        assert_eq!(
            text,
            "error[QL0002]: Type mismatch: '+' expects integer, found text in operand '\"x\"'\n\
             \x20 --> <stdin>:4:14\n\
             \x20  |\n\
             \x204 | port = ?{+ 1 \"x\"}\n\
             \x20  |              ^^^ text\n\
             \x20  = help: '+' only adds integers. Use 'concat' to join text.\n"
        );
    }

    #[test]
    fn test_json_round_trip_fields() {
        let diag = Diagnostic::error_with_code("QL1010", "Invalid assignment: oops")
            .with_line(2)
            .with_note("first error stops processing");
        let json = diag.to_json_string().unwrap();
        assert!(json.contains("\"level\": \"error\""));
        assert!(json.contains("\"code\": \"QL1010\""));
        assert!(json.contains("first error stops processing"));
        assert!(!json.contains("\"help\""));
    }

    #[test]
    fn test_display_is_one_line() {
        let diag = Diagnostic::warning_with_code("QW0001", "ignored")
            .with_file("cfg.txt")
            .with_line(7);
        assert_eq!(diag.to_string(), "cfg.txt:7:1: ignored");
        assert_eq!(diag.level, DiagnosticLevel::Warning);
    }
}
