//! Node-construction primitives shared by every production reducer.
//!
//! These are the generic composition helpers the grammar calls into:
//! building nodes and attributes, flattening sibling contributions into one
//! ordered sequence, and classifying leading comments.

use smol_str::SmolStr;

use crate::base::Span;

use super::{AttrKey, AttrValue, Attribute, Element, Node, NodeKind};

/// What one matched symbol contributes to an enclosing list.
///
/// A symbol may contribute a single element, an already-flattened run of
/// elements, or nothing at all (empty grammar alternatives). There is no
/// "null placeholder" variant on purpose: an empty alternative simply does
/// not appear in the output.
#[derive(Debug, Clone)]
pub enum Contribution {
    One(Element),
    Many(Vec<Element>),
    None,
}

impl From<Node> for Contribution {
    fn from(node: Node) -> Self {
        Self::One(Element::Node(node))
    }
}

impl From<Attribute> for Contribution {
    fn from(attr: Attribute) -> Self {
        Self::One(Element::Attribute(attr))
    }
}

impl From<Element> for Contribution {
    fn from(element: Element) -> Self {
        Self::One(element)
    }
}

impl From<Vec<Element>> for Contribution {
    fn from(elements: Vec<Element>) -> Self {
        Self::Many(elements)
    }
}

impl From<Option<Node>> for Contribution {
    fn from(node: Option<Node>) -> Self {
        match node {
            Some(n) => n.into(),
            None => Self::None,
        }
    }
}

/// Concatenate sibling contributions into a single flat ordered sequence.
///
/// List-building productions never nest list results inside list results:
/// however many recursive productions contributed, the output is one flat
/// sequence in source order. Concatenating with an empty contribution is a
/// no-op.
pub fn list_from_concat<I>(parts: I) -> Vec<Element>
where
    I: IntoIterator<Item = Contribution>,
{
    let mut out = Vec::new();
    for part in parts {
        match part {
            Contribution::One(element) => out.push(element),
            Contribution::Many(elements) => out.extend(elements),
            Contribution::None => {}
        }
    }
    out
}

/// Build an unnamed production node.
pub fn build_production(kind: NodeKind, span: Span, children: Vec<Element>) -> Node {
    Node::new(kind, None, span, children)
}

/// Build a named production node.
pub fn build_named(kind: NodeKind, name: &str, span: Span, children: Vec<Element>) -> Node {
    Node::new(kind, Some(SmolStr::new(name)), span, children)
}

/// Build a leaf attribute.
pub fn build_attribute(key: AttrKey, value: impl Into<AttrValue>) -> Attribute {
    Attribute::new(key, value)
}

/// Build a comment node from a raw COMMENT token.
///
/// The first leading comment of a file becomes a Copyright node, the second
/// a Comment node; the classification is positional and done by the caller.
/// The comment markers are stripped and the cleaned text is carried as a
/// NAME attribute, with a FORM attribute recording the source style
/// (`cc` for `//` runs, `c` for `/* */` blocks).
pub fn build_comment(kind: NodeKind, text: &str, span: Span) -> Node {
    let (cleaned, form) = clean_comment(text);
    let children = list_from_concat([
        build_attribute(AttrKey::Name, cleaned).into(),
        build_attribute(AttrKey::Form, form).into(),
    ]);
    build_production(kind, span, children)
}

/// Strip comment markers, preserving the line structure of the text.
fn clean_comment(text: &str) -> (String, &'static str) {
    if text.starts_with("//") {
        // A run of `//` lines: drop the marker and any indentation before it.
        let lines: Vec<&str> = text
            .split('\n')
            .map(|line| match line.find("//") {
                Some(offset) => &line[offset + 2..],
                None => line,
            })
            .collect();
        (lines.join("\n"), "cc")
    } else {
        // Block comment: drop the trailing `*/`, then keep what follows the
        // first `*` of each line (the left gutter), or blank if none.
        let body = text.strip_suffix("*/").unwrap_or(text);
        let lines: Vec<String> = body
            .split('\n')
            .map(|line| match line.find('*') {
                Some(offset) => line[offset + 1..].trim_end().to_string(),
                None => String::new(),
            })
            .collect();
        (lines.join("\n"), "c")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeKind;

    fn item(name: &str) -> Node {
        build_named(NodeKind::EnumItem, name, Span::default(), vec![])
    }

    #[test]
    fn test_concat_flattens_in_order() {
        let head = item("A");
        let tail = list_from_concat([item("B").into(), item("C").into()]);
        let all = list_from_concat([head.into(), tail.into()]);
        let names: Vec<_> = all
            .iter()
            .filter_map(Element::as_node)
            .filter_map(Node::name)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_concat_with_empty_is_noop() {
        let prior = list_from_concat([item("A").into(), item("B").into()]);
        let same = list_from_concat([prior.clone().into(), Contribution::None]);
        assert_eq!(prior, same);
    }

    #[test]
    fn test_empty_alternative_contributes_nothing() {
        let out = list_from_concat([Contribution::None, Vec::new().into()]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_clean_line_comment_run() {
        let (text, form) = clean_comment("// first line\n  // second line");
        assert_eq!(text, " first line\n second line");
        assert_eq!(form, "cc");
    }

    #[test]
    fn test_clean_block_comment() {
        let (text, form) = clean_comment("/* Copyright 2013\n * All rights reserved.\n */");
        assert_eq!(form, "c");
        let lines: Vec<_> = text.split('\n').collect();
        assert_eq!(lines[0], " Copyright 2013");
        assert_eq!(lines[1], " All rights reserved.");
    }

    #[test]
    fn test_build_comment_carries_name_and_form() {
        let node = build_comment(NodeKind::Copyright, "// Copyright", Span::default());
        assert_eq!(node.kind, NodeKind::Copyright);
        assert_eq!(node.attr(AttrKey::Name).map(|v| v.as_text()), Some(" Copyright"));
        assert_eq!(node.attr(AttrKey::Form).map(|v| v.as_text()), Some("cc"));
    }
}
