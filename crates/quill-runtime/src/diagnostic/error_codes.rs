//! Error code registry with descriptions and help text
//!
//! Error codes follow the QLxxxx scheme for errors and QWxxxx for warnings.
//! Ranges:
//! - QL0xxx: Evaluation errors (operands, types, arithmetic)
//! - QL1xxx: Syntax errors (expressions, statements)
//! - QL2xxx: Input errors
//! - QW0xxx: Warnings

// === Error Code Constants ===

// QL0xxx - Evaluation Errors
pub const UNKNOWN_OPERAND: &str = "QL0001";
pub const TYPE_MISMATCH: &str = "QL0002";
pub const ARITHMETIC_OVERFLOW: &str = "QL0003";

// QL1xxx - Syntax Errors
pub const MALFORMED_EXPRESSION: &str = "QL1001";
pub const EMPTY_EXPRESSION: &str = "QL1002";
pub const INCOMPLETE_EXPRESSION: &str = "QL1003";
pub const UNKNOWN_OPERATION: &str = "QL1004";
pub const INVALID_ASSIGNMENT: &str = "QL1010";
pub const INVALID_GLOBAL_DECLARATION: &str = "QL1011";

// QL2xxx - Input Errors
pub const INPUT_UNREADABLE: &str = "QL2001";

// QW0xxx - Warnings
pub const IGNORED_TEXT: &str = "QW0001";

// === Error Code Info Registry ===

/// Error code descriptor with code, description, and optional help text
#[derive(Debug, Clone)]
pub struct ErrorCodeInfo {
    /// The error code string (e.g., "QL0001")
    pub code: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Optional contextual help text
    pub help: Option<&'static str>,
}

/// Get info for an error code, if known
pub fn lookup(code: &str) -> Option<ErrorCodeInfo> {
    ERROR_CODES.iter().find(|e| e.code == code).cloned()
}

/// Get help text for an error code
pub fn help_for(code: &str) -> Option<&'static str> {
    lookup(code).and_then(|e| e.help)
}

/// Get description for an error code
pub fn description_for(code: &str) -> Option<&'static str> {
    lookup(code).map(|e| e.description)
}

/// All known error codes with descriptions and help
pub static ERROR_CODES: &[ErrorCodeInfo] = &[
    // === QL0xxx: Evaluation Errors ===
    ErrorCodeInfo {
        code: UNKNOWN_OPERAND,
        description: "Unknown operand",
        help: Some("Operands are integers, \"quoted\" text, or names bound on an earlier line."),
    },
    ErrorCodeInfo {
        code: TYPE_MISMATCH,
        description: "Type mismatch",
        help: Some("'+' only adds integers. Use 'concat' to join text."),
    },
    ErrorCodeInfo {
        code: ARITHMETIC_OVERFLOW,
        description: "Integer overflow",
        help: Some("Sums must stay within the signed 64-bit range."),
    },
    // === QL1xxx: Syntax Errors ===
    ErrorCodeInfo {
        code: MALFORMED_EXPRESSION,
        description: "Malformed expression",
        help: Some("Expressions are written as ?{operation operand ...}."),
    },
    ErrorCodeInfo {
        code: EMPTY_EXPRESSION,
        description: "Empty expression",
        help: Some("Add an operation and operands, e.g. ?{+ 1 2}."),
    },
    ErrorCodeInfo {
        code: INCOMPLETE_EXPRESSION,
        description: "Expression without operands",
        help: Some("Give the operation at least one operand, e.g. ?{concat \"a\" name}."),
    },
    ErrorCodeInfo {
        code: UNKNOWN_OPERATION,
        description: "Unknown operation",
        help: Some("Supported operations are '+' and 'concat'."),
    },
    ErrorCodeInfo {
        code: INVALID_ASSIGNMENT,
        description: "Invalid assignment",
        help: Some("Assignments are written as name = value, with one space around '='."),
    },
    ErrorCodeInfo {
        code: INVALID_GLOBAL_DECLARATION,
        description: "Invalid global declaration",
        help: Some("Write global name = value with exactly one ' = ' separator."),
    },
    // === QL2xxx: Input Errors ===
    ErrorCodeInfo {
        code: INPUT_UNREADABLE,
        description: "Input could not be read",
        help: Some("Check that the file exists and is valid UTF-8."),
    },
    // === QW0xxx: Warnings ===
    ErrorCodeInfo {
        code: IGNORED_TEXT,
        description: "Text outside the expression is ignored",
        help: Some("Only the ?{...} part of the value is evaluated."),
    },
];
