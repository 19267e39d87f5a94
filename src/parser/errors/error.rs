//! Syntax error type carried on the per-file error list.

use crate::base::Span;

use super::codes::ErrorCode;

/// A recoverable syntax error with location and categorized code.
///
/// Errors never abort the parse: the engine records one of these, skips to
/// the construct's recovery point, and continues. The driver only ever looks
/// at the count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
    pub code: ErrorCode,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Span, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            span,
            code,
        }
    }

    /// Error with the code's default message
    pub fn from_code(code: ErrorCode, span: Span) -> Self {
        Self::new(code.default_message(), span, code)
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} at {}", self.code, self.message, self.span.start)
    }
}
