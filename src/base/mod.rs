//! Foundation types for the ppidl front end.
//!
//! This module provides the primitives used throughout the crate:
//! - [`Position`], [`Span`] - Line/column positions for tokens and AST nodes
//!
//! This module has NO dependencies on other ppidl modules.

mod position;

pub use position::{Position, Span};
