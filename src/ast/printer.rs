//! Diagnostic tree printer.
//!
//! Renders an AST as indented text, one node per line, exposing only a
//! whitelisted set of properties (the node's kind and name, plus its TYPE
//! and VALUE attributes) so the output stays stable and diff-friendly.

use super::{AttrKey, Node};

/// Properties shown in the dump. Everything else (NAME, FORM, REFERENCE,
/// spans) is omitted to keep the output stable.
const ACCEPT_PROPS: [AttrKey; 2] = [AttrKey::Type, AttrKey::Value];

const INDENT: &str = "  ";

/// Render a tree rooted at `node` as indented text.
pub fn tree(node: &Node) -> String {
    let mut lines = Vec::new();
    render(node, 0, &mut lines);
    lines.join("\n")
}

fn render(node: &Node, depth: usize, lines: &mut Vec<String>) {
    let pad = INDENT.repeat(depth);
    match node.name() {
        Some(name) => lines.push(format!("{pad}{}({name})", node.kind)),
        None => lines.push(format!("{pad}{}", node.kind)),
    }
    let pad = INDENT.repeat(depth + 1);
    for attr in node.attributes() {
        if ACCEPT_PROPS.contains(&attr.key) {
            lines.push(format!("{pad}{}={}", attr.key, attr.value));
        }
    }
    for child in node.child_nodes() {
        render(child, depth + 1, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build::{build_attribute, build_named};
    use crate::ast::NodeKind;
    use crate::base::Span;

    #[test]
    fn test_tree_indents_by_depth() {
        let item = build_named(
            NodeKind::EnumItem,
            "GREEN",
            Span::default(),
            vec![
                build_attribute(AttrKey::Type, "integer").into(),
                build_attribute(AttrKey::Value, "2").into(),
            ],
        );
        let root = build_named(NodeKind::Enum, "Color", Span::default(), vec![item.into()]);

        let out = tree(&root);
        let lines: Vec<_> = out.split('\n').collect();
        assert_eq!(lines[0], "Enum(Color)");
        assert_eq!(lines[1], "  EnumItem(GREEN)");
        assert_eq!(lines[2], "    TYPE=integer");
        assert_eq!(lines[3], "    VALUE=2");
    }

    #[test]
    fn test_tree_hides_non_whitelisted_props() {
        let node = build_named(
            NodeKind::ImplementsStatement,
            "A",
            Span::default(),
            vec![build_attribute(AttrKey::Reference, "B").into()],
        );
        let out = tree(&node);
        assert_eq!(out, "ImplementsStatement(A)");
    }
}
