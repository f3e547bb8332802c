//! Error codes for input diagnostics.
//!
//! - `E1xx` - The document is not valid JSON or does not have the expected shape
//! - `E2xx` - The document is well formed but describes an invalid diagram

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Document Errors (E1xx)
    // =========================================================================
    /// Invalid JSON syntax.
    E100,

    /// The input ended in the middle of a JSON value.
    E101,

    /// A value has the wrong JSON type, e.g. a string where a list of classes
    /// is expected.
    E102,

    /// The document has no `Diagram` object at its root.
    E103,

    // =========================================================================
    // Model Errors (E2xx)
    // =========================================================================
    /// A class has an empty or missing `ClassName`.
    E200,

    /// Two classes share the same `ClassName`.
    E201,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "invalid JSON syntax",
            ErrorCode::E101 => "unexpected end of input",
            ErrorCode::E102 => "invalid document structure",
            ErrorCode::E103 => "missing diagram root",
            ErrorCode::E200 => "missing class name",
            ErrorCode::E201 => "duplicate class name",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
