//! Per-production reducers.
//!
//! Each grammar production has one reducer: a pure function from the
//! matched symbols' already-reduced values to the single value the
//! production contributes upward (a node, a flat element list, or nothing).
//! The engine in [`super::engine`] is the only caller; reducers never look
//! at tokens themselves and never carry state between reductions.
//!
//! - `types`  - Type Terminal Mapper (wrap-vs-pass-through)
//! - `consts` - Literal & Constant Evaluator ({TYPE, VALUE} pairs)
//! - `decls`  - declaration handlers (top, definitions, enum, label, inline)

pub mod consts;
pub mod decls;
pub mod types;

pub use consts::{ConstExpr, reduce_boolean_literal, reduce_const_value, reduce_float_literal};
pub use decls::*;
pub use types::{TypeTerm, reduce_primitive_type};
