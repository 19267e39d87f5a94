//! Parser diagnostics: syntax errors and error codes.

mod codes;
mod error;

pub use codes::ErrorCode;
pub use error::SyntaxError;
