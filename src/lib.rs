//! # ppidl
//!
//! Front end for Pepper-style IDL: lexer, reduction engine, and typed AST.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! driver    → Multi-file parsing, error aggregation, AST root assembly
//!   ↓
//! parser    → Logos lexer, reduction engine, per-production reducers
//!   ↓
//! ast       → Node/Attribute model, builders, diagnostic tree printer
//!   ↓
//! base      → Primitives (Position, Span)
//! ```
//!
//! The grammar is reduced bottom-up: the engine in [`parser::engine`] walks
//! the token stream and, each time a production's right-hand side is fully
//! matched, invokes the corresponding pure reducer in [`parser::grammar`]
//! with the already-reduced symbol values. The value produced by the top
//! production becomes the file's AST root.

// ============================================================================
// MODULES (dependency order: base → ast → parser → driver)
// ============================================================================

/// Foundation types: Position, Span
pub mod base;

/// AST: Node/Attribute model, node builders, tree printer
pub mod ast;

/// Parser: Logos lexer, reduction engine, per-production reducers
pub mod parser;

/// Driver: per-file parse invocation, error totals, AST root assembly
pub mod driver;

// Re-export foundation types
pub use base::{Position, Span};

// Re-export the types most callers need
pub use ast::{Attribute, Element, Node, NodeKind};
pub use driver::{ParsedFile, parse_file, parse_files, parse_source};
pub use parser::{SyntaxError, TokenKind};
