//! Typed AST for Pepper-style IDL.
//!
//! Every production reducer composes values of two shapes: [`Node`], the
//! unit of the tree, and [`Attribute`], a leaf fact (key + literal value)
//! attached as a child of a node. [`Element`] is the tagged union the child
//! sequence holds.
//!
//! Nodes are created exactly once, at the moment their production reduces,
//! and are passed upward immutably. The one documented exception is
//! [`Node::attach`]: the Definitions-list reducer hoists a pending
//! extended-attribute list onto the Definition node it precedes.

use smol_str::SmolStr;

use crate::base::Span;

pub mod build;
pub mod printer;

pub use build::{
    Contribution, build_attribute, build_comment, build_named, build_production, list_from_concat,
};

/// Node kinds produced by the grammar.
///
/// A fixed vocabulary: every reducer names its result from this set, so the
/// printer and downstream passes can match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Synthetic root wrapping all parsed files
    Ast,
    /// Per-file root
    File,
    /// First leading comment of a file
    Copyright,
    /// Second leading comment of a file (file-level documentation)
    Comment,
    /// Raw `#inline ... #endinl` code block
    Inline,
    /// Dialect-specific version-label block
    Label,
    /// One `identifier = <float>` entry of a label block
    LabelItem,
    Enum,
    EnumItem,
    Typedef,
    Interface,
    Partial,
    Dictionary,
    Exception,
    ImplementsStatement,
    /// One entry of an extended-attribute list
    ExtAttribute,
    /// Function member of an interface
    Operation,
    /// Parameter of an operation
    Param,
    /// Typed member of a dictionary or exception
    Member,
    /// Canonical wrapper for a raw type-keyword terminal
    PrimitiveType,
    /// Reference to a named (non-primitive) type
    Typeref,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ast => "AST",
            Self::File => "File",
            Self::Copyright => "Copyright",
            Self::Comment => "Comment",
            Self::Inline => "Inline",
            Self::Label => "Label",
            Self::LabelItem => "LabelItem",
            Self::Enum => "Enum",
            Self::EnumItem => "EnumItem",
            Self::Typedef => "Typedef",
            Self::Interface => "Interface",
            Self::Partial => "Partial",
            Self::Dictionary => "Dictionary",
            Self::Exception => "Exception",
            Self::ImplementsStatement => "ImplementsStatement",
            Self::ExtAttribute => "ExtAttribute",
            Self::Operation => "Operation",
            Self::Param => "Param",
            Self::Member => "Member",
            Self::PrimitiveType => "PrimitiveType",
            Self::Typeref => "Typeref",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute keys. A closed set: reducers never invent keys at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrKey {
    Name,
    Value,
    Type,
    Reference,
    /// Comment form marker: `cc` for `//` comments, `c` for `/* */`
    Form,
}

impl AttrKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::Value => "VALUE",
            Self::Type => "TYPE",
            Self::Reference => "REFERENCE",
            Self::Form => "FORM",
        }
    }
}

impl std::fmt::Display for AttrKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Literal payload of an attribute: string, number text, or boolean.
///
/// Numbers keep their source spelling; formatting decisions belong to the
/// reducers, not to this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Text(SmolStr),
    Number(SmolStr),
    Bool(bool),
}

impl AttrValue {
    /// The rendered text of the value, as the tree printer shows it.
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(s) | Self::Number(s) => s.as_str(),
            Self::Bool(true) => "true",
            Self::Bool(false) => "false",
        }
    }
}

impl std::fmt::Display for AttrValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_text())
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Text(SmolStr::new(s))
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Text(SmolStr::new(s))
    }
}

impl From<SmolStr> for AttrValue {
    fn from(s: SmolStr) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// A named scalar fact attached under a node. Never holds children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: AttrKey,
    pub value: AttrValue,
}

impl Attribute {
    pub fn new(key: AttrKey, value: impl Into<AttrValue>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

/// A child of a node: either a nested node or a leaf attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Node(Node),
    Attribute(Attribute),
}

impl Element {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(n) => Some(n),
            Self::Attribute(_) => None,
        }
    }

    pub fn as_attribute(&self) -> Option<&Attribute> {
        match self {
            Self::Attribute(a) => Some(a),
            Self::Node(_) => None,
        }
    }
}

impl From<Node> for Element {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<Attribute> for Element {
    fn from(attr: Attribute) -> Self {
        Self::Attribute(attr)
    }
}

/// The unit of the AST.
///
/// Children are ordered (first-declared-first) and append-only; order is
/// preserved through every composition step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    name: Option<SmolStr>,
    children: Vec<Element>,
}

impl Node {
    pub fn new(kind: NodeKind, name: Option<SmolStr>, span: Span, children: Vec<Element>) -> Self {
        Self {
            kind,
            span,
            name,
            children,
        }
    }

    /// Identifying name, absent for pure attribute/list nodes.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Child nodes only, in source order.
    pub fn child_nodes(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter_map(Element::as_node)
    }

    /// Leaf attributes only, in source order.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.children.iter().filter_map(Element::as_attribute)
    }

    /// First attribute value under the given key, if any.
    pub fn attr(&self, key: AttrKey) -> Option<&AttrValue> {
        self.attributes().find(|a| a.key == key).map(|a| &a.value)
    }

    /// Hoist extra children onto an already-built node.
    ///
    /// This is the single sanctioned post-hoc mutation point: the
    /// Definitions-list reducer attaches a preceding extended-attribute list
    /// to the Definition node it modifies. Everywhere else a node's child
    /// sequence is fixed at construction.
    pub fn attach(&mut self, extra: Vec<Element>) {
        self.children.extend(extra);
    }
}
