//! Type Terminal Mapper
//!
//! Five terminal categories (integer widths, unsigned widths, floats,
//! handles, pointer-likes) share one reducer. What varies is the shape of
//! the matched value, made explicit here as a tagged union: a raw keyword
//! terminal must be wrapped into a canonical PrimitiveType node, while an
//! alternative that already produced a composite node passes through
//! unchanged.

use smol_str::SmolStr;

use crate::ast::{Node, NodeKind, build_named};
use crate::base::Span;

/// The matched value of a type-category production.
#[derive(Debug, Clone)]
pub enum TypeTerm {
    /// A raw type-keyword terminal, carrying its literal source text
    Keyword(SmolStr, Span),
    /// An already-built composite result from a lower production
    Composite(Node),
}

impl TypeTerm {
    pub fn keyword(text: &str, span: Span) -> Self {
        Self::Keyword(SmolStr::new(text), span)
    }
}

/// `PrimitiveType : IntegerType | UnsignedIntegerType | FloatType
///                | HandleType | PointerType`
///
/// Wrap a raw terminal into a PrimitiveType node named by the keyword's
/// literal text; pass an already-built node through untouched.
pub fn reduce_primitive_type(term: TypeTerm) -> Node {
    match term {
        TypeTerm::Keyword(text, span) => {
            build_named(NodeKind::PrimitiveType, &text, span, vec![])
        }
        TypeTerm::Composite(node) => node,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_is_wrapped() {
        let node = reduce_primitive_type(TypeTerm::keyword("int32_t", Span::default()));
        assert_eq!(node.kind, NodeKind::PrimitiveType);
        assert_eq!(node.name(), Some("int32_t"));
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_composite_passes_through_unchanged() {
        let typeref = build_named(NodeKind::Typeref, "PP_Point", Span::default(), vec![]);
        let out = reduce_primitive_type(TypeTerm::Composite(typeref.clone()));
        assert_eq!(out, typeref);
    }

    #[test]
    fn test_wrapping_is_idempotent_on_composites() {
        // A node that went through once must survive a second pass intact.
        let first = reduce_primitive_type(TypeTerm::keyword("handle_t", Span::default()));
        let second = reduce_primitive_type(TypeTerm::Composite(first.clone()));
        assert_eq!(first, second);
    }
}
