//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Structural errors (braces, semicolons, file shape)
//! - E03xx: Declaration errors (definitions, members)
//! - E04xx: Constant and list-entry errors

use std::fmt;

/// Error codes for parser diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors (invalid tokens)
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,
    /// Unterminated inline block (missing end marker)
    E0102,

    // =========================================================================
    // E02xx: Structural errors (braces, semicolons, file shape)
    // =========================================================================
    /// Missing expected token (semicolon, brace, delimiter)
    E0201,
    /// File does not begin with copyright and file comments
    E0202,

    // =========================================================================
    // E03xx: Declaration errors (definitions, members)
    // =========================================================================
    /// Missing identifier/name
    E0301,
    /// Unexpected token where a definition was expected
    E0302,
    /// Malformed interface/dictionary/exception member
    E0303,
    /// Missing or invalid type
    E0304,

    // =========================================================================
    // E04xx: Constant and list-entry errors
    // =========================================================================
    /// Invalid constant value
    E0401,
    /// Malformed label entry
    E0402,
    /// Malformed enum value
    E0403,
}

impl ErrorCode {
    /// Default message used when no specific message is supplied
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated inline block",
            Self::E0201 => "missing expected token",
            Self::E0202 => "file must begin with a copyright comment and a file comment",
            Self::E0301 => "missing identifier",
            Self::E0302 => "expected a definition",
            Self::E0303 => "malformed member",
            Self::E0304 => "missing or invalid type",
            Self::E0401 => "invalid constant value",
            Self::E0402 => "malformed label entry",
            Self::E0403 => "malformed enum value",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
