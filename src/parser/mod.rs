//! Reduction-driven parser for Pepper-style IDL
//!
//! This module provides the whole front end below the driver:
//! - **logos** lexer producing typed tokens with line/column spans
//! - a recursive-descent **engine** that matches grammar productions and
//!   invokes one pure reducer per matched right-hand side
//! - the **grammar** reducers themselves, each a pure function from matched
//!   symbol values to a produced value (node, element list, or nothing)
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with TokenKind + Span
//!     ↓
//! Engine → drives productions bottom-up, left to right
//!     ↓
//! Reducers (grammar) → Node / Vec<Element> / nothing
//!     ↓
//! File AST root + per-file error list
//! ```
//!
//! The engine owns error recovery: each list construct names its recovery
//! points (next separator or closer), and a malformed entry is skipped
//! without invalidating siblings already built.

pub mod engine;
pub mod errors;
pub mod grammar;
mod lexer;
mod token_kind;

pub use engine::{ParseOutput, parse};
pub use errors::{ErrorCode, SyntaxError};
pub use lexer::{Lexer, Token, tokenize};
pub use token_kind::TokenKind;
