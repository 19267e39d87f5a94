//! Declaration reducers.
//!
//! One pure function per declaration production: file root, the
//! definitions list, the dialect-specific label block, enums, inline
//! blocks, and the supporting member shapes. List productions flatten
//! through `list_from_concat`; empty alternatives contribute nothing.

use crate::ast::{
    AttrKey, Element, Node, NodeKind, build_attribute, build_named, build_production,
    list_from_concat,
};
use crate::base::Span;

// =============================================================================
// File root
// =============================================================================

/// `Top : COMMENT COMMENT Definitions`
///
/// The two leading comments are classified positionally: Copyright first,
/// file-level documentation second. Both arrive already built by
/// `build_comment`.
pub fn reduce_top(copyright: Node, filedoc: Node, definitions: Vec<Element>) -> Vec<Element> {
    list_from_concat([copyright.into(), filedoc.into(), definitions.into()])
}

/// `Definitions : ExtendedAttributeList Definition Definitions | ε`
///
/// The pending extended-attribute list is hoisted onto the Definition node
/// (the one sanctioned post-hoc `attach`), then the Definition joins the
/// flat sequence ahead of the rest.
pub fn reduce_definitions(
    ext_attrs: Vec<Element>,
    mut definition: Node,
    rest: Vec<Element>,
) -> Vec<Element> {
    definition.attach(ext_attrs);
    list_from_concat([definition.into(), rest.into()])
}

/// `Definition : CallbackOrInterface | Partial | Dictionary | Exception
///             | Enum | Typedef | ImplementsStatement | Label | Inline`
///
/// Pure pass-through: whichever alternative matched already produced a
/// complete node.
pub fn reduce_definition(node: Node) -> Node {
    node
}

// =============================================================================
// Inline blocks
// =============================================================================

/// `Inline : INLINE`
///
/// The token's first line is `#inline <name>`, its last line the end
/// marker. The name is the second whitespace-separated word; the body is
/// every line strictly between the first and the last, re-joined with a
/// single trailing newline and otherwise preserved byte-for-byte.
pub fn reduce_inline(text: &str, span: Span) -> Node {
    let name = text.split_whitespace().nth(1).unwrap_or("");
    let lines: Vec<&str> = text.split('\n').collect();
    let body = if lines.len() >= 2 {
        format!("{}\n", lines[1..lines.len() - 1].join("\n"))
    } else {
        "\n".to_string()
    };
    let children = list_from_concat([
        build_attribute(AttrKey::Name, name).into(),
        build_attribute(AttrKey::Value, body).into(),
    ]);
    build_production(NodeKind::Inline, span, children)
}

// =============================================================================
// Label blocks
// =============================================================================

/// `Label : LABEL identifier '{' LabelList '}' ';'`
pub fn reduce_label(name: &str, span: Span, items: Vec<Element>) -> Node {
    build_named(NodeKind::Label, name, span, items)
}

/// `LabelList : identifier '=' float LabelCont`
///
/// `version` is the float token's literal text, carried as a VALUE
/// attribute on the LabelItem.
pub fn reduce_label_list(name: &str, span: Span, version: &str, cont: Vec<Element>) -> Vec<Element> {
    let value = build_attribute(AttrKey::Value, version);
    let item = build_named(NodeKind::LabelItem, name, span, vec![value.into()]);
    list_from_concat([item.into(), cont.into()])
}

// =============================================================================
// Enums
// =============================================================================

/// `Enum : ENUM identifier '{' EnumValueList '}' ';'`
pub fn reduce_enum(name: &str, span: Span, values: Vec<Element>) -> Node {
    build_named(NodeKind::Enum, name, span, values)
}

/// `EnumValueList : EnumValue EnumValues` /
/// `EnumValues : ',' EnumValue EnumValues | ε`
pub fn reduce_enum_values(value: Node, rest: Vec<Element>) -> Vec<Element> {
    list_from_concat([value.into(), rest.into()])
}

/// `EnumValue : ExtendedAttributeList identifier
///            | ExtendedAttributeList identifier '=' ConstValue`
///
/// An item without an explicit value carries no TYPE/VALUE children;
/// absence is meaningful and preserved.
pub fn reduce_enum_value(
    ext_attrs: Vec<Element>,
    name: &str,
    span: Span,
    value: Option<Vec<Element>>,
) -> Node {
    let mut item = build_named(NodeKind::EnumItem, name, span, ext_attrs);
    if let Some(pair) = value {
        item.attach(pair);
    }
    item
}

// =============================================================================
// Remaining definition forms
// =============================================================================

/// `CallbackOrInterface : callback? INTERFACE identifier '{' Members '}' ';'`
pub fn reduce_interface(name: &str, span: Span, members: Vec<Element>) -> Node {
    build_named(NodeKind::Interface, name, span, members)
}

/// `Partial : PARTIAL INTERFACE identifier '{' Members '}' ';'`
pub fn reduce_partial(name: &str, span: Span, members: Vec<Element>) -> Node {
    build_named(NodeKind::Partial, name, span, members)
}

/// `Dictionary : DICTIONARY identifier '{' DictionaryMembers '}' ';'`
pub fn reduce_dictionary(name: &str, span: Span, members: Vec<Element>) -> Node {
    build_named(NodeKind::Dictionary, name, span, members)
}

/// `Exception : EXCEPTION identifier '{' ExceptionMembers '}' ';'`
pub fn reduce_exception(name: &str, span: Span, members: Vec<Element>) -> Node {
    build_named(NodeKind::Exception, name, span, members)
}

/// `Typedef : TYPEDEF ExtendedAttributeList Type identifier ';'`
pub fn reduce_typedef(ext_attrs: Vec<Element>, ty: Node, name: &str, span: Span) -> Node {
    let children = list_from_concat([ext_attrs.into(), ty.into()]);
    build_named(NodeKind::Typedef, name, span, children)
}

/// `ImplementsStatement : identifier IMPLEMENTS identifier ';'`
pub fn reduce_implements(name: &str, span: Span, reference: &str) -> Node {
    let attr = build_attribute(AttrKey::Reference, reference);
    build_named(NodeKind::ImplementsStatement, name, span, vec![attr.into()])
}

/// `Member : ReturnType identifier '(' Params ')' ';'` (interface body)
pub fn reduce_operation(return_type: Node, name: &str, span: Span, params: Vec<Element>) -> Node {
    let children = list_from_concat([return_type.into(), params.into()]);
    build_named(NodeKind::Operation, name, span, children)
}

/// `Param : ExtendedAttributeList Type identifier`
pub fn reduce_param(ext_attrs: Vec<Element>, ty: Node, name: &str, span: Span) -> Node {
    let children = list_from_concat([ext_attrs.into(), ty.into()]);
    build_named(NodeKind::Param, name, span, children)
}

/// `Member : Type identifier ';'` (dictionary/exception body)
pub fn reduce_member(ty: Node, name: &str, span: Span) -> Node {
    build_named(NodeKind::Member, name, span, vec![ty.into()])
}

/// `ExtendedAttribute : identifier | identifier '=' ConstValue`
pub fn reduce_ext_attribute(name: &str, span: Span, value: Option<Vec<Element>>) -> Node {
    let mut node = build_named(NodeKind::ExtAttribute, name, span, vec![]);
    if let Some(pair) = value {
        node.attach(pair);
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AttrValue;

    fn attr_text(node: &Node, key: AttrKey) -> Option<&str> {
        node.attr(key).map(AttrValue::as_text)
    }

    #[test]
    fn test_inline_round_trip() {
        let node = reduce_inline("#inline Foo\nline1\nline2\n#endinl", Span::default());
        assert_eq!(node.kind, NodeKind::Inline);
        assert_eq!(attr_text(&node, AttrKey::Name), Some("Foo"));
        assert_eq!(attr_text(&node, AttrKey::Value), Some("line1\nline2\n"));
    }

    #[test]
    fn test_inline_empty_body() {
        let node = reduce_inline("#inline Foo\n#endinl", Span::default());
        assert_eq!(attr_text(&node, AttrKey::Value), Some("\n"));
    }

    #[test]
    fn test_inline_preserves_body_bytes() {
        let node = reduce_inline(
            "#inline Impl\n  int x = 1;\n\n\treturn;\n#endinl",
            Span::default(),
        );
        assert_eq!(
            attr_text(&node, AttrKey::Value),
            Some("  int x = 1;\n\n\treturn;\n")
        );
    }

    #[test]
    fn test_label_list_builds_items_in_order() {
        let tail = reduce_label_list("M2", Span::default(), "2.0", vec![]);
        let items = reduce_label_list("M1", Span::default(), "1.0", tail);
        let names: Vec<_> = items
            .iter()
            .filter_map(Element::as_node)
            .filter_map(Node::name)
            .collect();
        assert_eq!(names, vec!["M1", "M2"]);

        let label = reduce_label("Chrome", Span::default(), items);
        assert_eq!(label.kind, NodeKind::Label);
        let first = label.child_nodes().next().unwrap();
        assert_eq!(first.kind, NodeKind::LabelItem);
        assert_eq!(attr_text(first, AttrKey::Value), Some("1.0"));
    }

    #[test]
    fn test_enum_value_without_assignment_has_no_type_value() {
        let item = reduce_enum_value(vec![], "RED", Span::default(), None);
        assert_eq!(item.attr(AttrKey::Type), None);
        assert_eq!(item.attr(AttrKey::Value), None);
    }

    #[test]
    fn test_definitions_hoists_ext_attrs_onto_definition() {
        let attrs = vec![
            reduce_ext_attribute("deprecated", Span::default(), None).into(),
        ];
        let definition = reduce_enum("Color", Span::default(), vec![]);
        let out = reduce_definitions(attrs, definition, vec![]);
        assert_eq!(out.len(), 1);
        let node = out[0].as_node().unwrap();
        assert_eq!(node.kind, NodeKind::Enum);
        let hoisted: Vec<_> = node.child_nodes().map(|n| n.kind).collect();
        assert_eq!(hoisted, vec![NodeKind::ExtAttribute]);
    }

    #[test]
    fn test_empty_definitions_tail_is_noop() {
        let definition = reduce_enum("Color", Span::default(), vec![]);
        let out = reduce_definitions(vec![], definition.clone(), vec![]);
        assert_eq!(out, vec![Element::Node(definition)]);
    }

    #[test]
    fn test_implements_carries_reference() {
        let node = reduce_implements("PPB_Left", Span::default(), "PPB_Right");
        assert_eq!(node.kind, NodeKind::ImplementsStatement);
        assert_eq!(node.name(), Some("PPB_Left"));
        assert_eq!(attr_text(&node, AttrKey::Reference), Some("PPB_Right"));
    }

    #[test]
    fn test_top_orders_comments_before_definitions() {
        let copyright = build_production(NodeKind::Copyright, Span::default(), vec![]);
        let filedoc = build_production(NodeKind::Comment, Span::default(), vec![]);
        let definition = reduce_enum("Color", Span::default(), vec![]);
        let out = reduce_top(copyright, filedoc, vec![definition.into()]);
        let kinds: Vec<_> = out
            .iter()
            .filter_map(Element::as_node)
            .map(|n| n.kind)
            .collect();
        assert_eq!(kinds, vec![NodeKind::Copyright, NodeKind::Comment, NodeKind::Enum]);
    }
}
