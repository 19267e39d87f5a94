//! Production-matching engine.
//!
//! Drives the grammar top-down over the token stream and calls one pure
//! reducer per matched production. All stream state (cursor, recovery,
//! error list) lives here; reducers in [`super::grammar`] never see tokens.
//!
//! Recovery is table-driven: each list construct names the token set that
//! ends a malformed entry (next separator or closer). A bad entry costs one
//! recorded error and is skipped; siblings already built are kept.

use tracing::{debug, trace};

use crate::ast::{Element, Node, NodeKind, build_comment, build_named, list_from_concat};
use crate::base::Span;

use super::errors::{ErrorCode, SyntaxError};
use super::grammar::{
    ConstExpr, TypeTerm, reduce_boolean_literal, reduce_const_value, reduce_definition,
    reduce_definitions, reduce_dictionary, reduce_enum, reduce_enum_value, reduce_enum_values,
    reduce_exception, reduce_ext_attribute, reduce_float_literal, reduce_implements,
    reduce_inline, reduce_interface, reduce_label, reduce_label_list, reduce_member,
    reduce_operation, reduce_param, reduce_partial, reduce_primitive_type, reduce_top,
    reduce_typedef,
};
use super::lexer::{Token, tokenize};
use super::token_kind::TokenKind;

// =============================================================================
// Recovery points
// =============================================================================

/// Where to resynchronize after a malformed entry, per list construct.
/// Recovery stops *before* the named token so the enclosing loop can decide
/// whether it separates or closes.
const LABEL_ITEM_RECOVERY: &[TokenKind] = &[TokenKind::Comma, TokenKind::RBrace];
const ENUM_ITEM_RECOVERY: &[TokenKind] = &[TokenKind::Comma, TokenKind::RBrace];
const MEMBER_RECOVERY: &[TokenKind] = &[TokenKind::Semicolon, TokenKind::RBrace];
const PARAM_RECOVERY: &[TokenKind] = &[TokenKind::Comma, TokenKind::RParen];
const ATTR_RECOVERY: &[TokenKind] = &[TokenKind::Comma, TokenKind::RBracket];
const DEFINITION_RECOVERY: &[TokenKind] = &[TokenKind::Semicolon];

/// Result of parsing one source file: the file root's child sequence plus
/// every error recovered past along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    pub contributions: Vec<Element>,
    pub errors: Vec<SyntaxError>,
}

/// Parse one source file into its flat file-level element sequence.
pub fn parse(source: &str) -> ParseOutput {
    let mut engine = Engine::new(source);
    let contributions = engine.parse_top();
    debug!(
        elements = contributions.len(),
        errors = engine.errors.len(),
        "parse finished"
    );
    ParseOutput {
        contributions,
        errors: engine.errors,
    }
}

struct Engine<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    eof_span: Span,
    errors: Vec<SyntaxError>,
}

impl<'a> Engine<'a> {
    fn new(source: &'a str) -> Self {
        let tokens: Vec<Token<'a>> = tokenize(source)
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .collect();
        let eof_span = tokens
            .last()
            .map(|t| Span::at(t.span.end))
            .unwrap_or_default();
        Self {
            tokens,
            pos: 0,
            eof_span,
            errors: Vec::new(),
        }
    }

    // =========================================================================
    // Cursor primitives
    // =========================================================================

    fn nth(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn current(&self) -> TokenKind {
        self.nth(0)
    }

    /// Lookahead that ignores interior comment tokens.
    fn nth_significant(&self, n: usize) -> TokenKind {
        self.tokens[self.pos..]
            .iter()
            .map(|t| t.kind)
            .filter(|kind| *kind != TokenKind::Comment)
            .nth(n)
            .unwrap_or(TokenKind::Eof)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current() == kind
    }

    fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.current())
    }

    fn span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map(|t| t.span)
            .unwrap_or(self.eof_span)
    }

    fn bump(&mut self) -> Token<'a> {
        match self.tokens.get(self.pos) {
            Some(token) => {
                self.pos += 1;
                token.clone()
            }
            None => Token {
                kind: TokenKind::Eof,
                text: "",
                span: self.eof_span,
            },
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        self.skip_insignificant();
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, code: ErrorCode) -> Option<Token<'a>> {
        self.skip_insignificant();
        if self.at(kind) {
            Some(self.bump())
        } else {
            let message = format!(
                "expected {}, found {}",
                kind.display_name(),
                self.current().display_name()
            );
            self.error(code, message);
            None
        }
    }

    /// Skip tokens the grammar ignores between definitions: documentation
    /// comments past the two leading ones, and lexer error tokens (each
    /// recorded once).
    fn skip_insignificant(&mut self) {
        loop {
            match self.current() {
                TokenKind::Comment => {
                    self.bump();
                }
                TokenKind::Error => {
                    let token = self.bump();
                    let code = if token.text.starts_with("#inline") {
                        ErrorCode::E0102
                    } else {
                        ErrorCode::E0101
                    };
                    self.errors.push(SyntaxError::from_code(code, token.span));
                }
                _ => break,
            }
        }
    }

    fn error(&mut self, code: ErrorCode, message: impl Into<String>) {
        self.errors.push(SyntaxError::new(message, self.span(), code));
    }

    /// Skip forward to the construct's recovery point without consuming it.
    fn recover_to(&mut self, stops: &[TokenKind]) {
        while !self.at(TokenKind::Eof) && !self.at_any(stops) {
            self.bump();
        }
    }

    // =========================================================================
    // File shape
    // =========================================================================

    /// `Top : COMMENT COMMENT Definitions`
    fn parse_top(&mut self) -> Vec<Element> {
        let copyright = self.parse_leading_comment(NodeKind::Copyright);
        let filedoc = if copyright.is_some() {
            self.parse_leading_comment(NodeKind::Comment)
        } else {
            None
        };
        let definitions = self.parse_definitions();
        match (copyright, filedoc) {
            (Some(c), Some(f)) => reduce_top(c, f, definitions),
            (c, f) => list_from_concat([c.into(), f.into(), definitions.into()]),
        }
    }

    /// One of the two mandatory leading comments. A missing one is recorded
    /// as E0202 and the parse carries on with whatever is there.
    fn parse_leading_comment(&mut self, kind: NodeKind) -> Option<Node> {
        if self.at(TokenKind::Comment) {
            let token = self.bump();
            Some(build_comment(kind, token.text, token.span))
        } else {
            self.errors
                .push(SyntaxError::from_code(ErrorCode::E0202, self.span()));
            None
        }
    }

    /// `Definitions : ExtendedAttributeList Definition Definitions | ε`
    ///
    /// Matched iteratively, then folded right-to-left so each reduction sees
    /// the already-flattened tail, exactly as the right-recursive production
    /// reads.
    fn parse_definitions(&mut self) -> Vec<Element> {
        let mut parsed: Vec<(Vec<Element>, Node)> = Vec::new();
        loop {
            self.skip_insignificant();
            if self.at(TokenKind::Eof) {
                break;
            }
            let ext_attrs = if self.at(TokenKind::LBracket) {
                self.parse_ext_attr_list()
            } else {
                Vec::new()
            };
            if let Some(definition) = self.parse_definition() {
                trace!(kind = %definition.kind, name = definition.name(), "reduced definition");
                parsed.push((ext_attrs, definition));
            }
        }
        let mut out = Vec::new();
        for (ext_attrs, definition) in parsed.into_iter().rev() {
            out = reduce_definitions(ext_attrs, definition, out);
        }
        out
    }

    fn parse_definition(&mut self) -> Option<Node> {
        self.skip_insignificant();
        let node = match self.current() {
            TokenKind::LabelKw => self.parse_label(),
            TokenKind::EnumKw => self.parse_enum(),
            TokenKind::TypedefKw => self.parse_typedef(),
            TokenKind::CallbackKw | TokenKind::InterfaceKw => self.parse_interface(),
            TokenKind::PartialKw => self.parse_partial(),
            TokenKind::DictionaryKw => self.parse_dictionary(),
            TokenKind::ExceptionKw => self.parse_exception(),
            TokenKind::Inline => {
                let token = self.bump();
                Some(reduce_inline(token.text, token.span))
            }
            TokenKind::Ident if self.nth_significant(1) == TokenKind::ImplementsKw => {
                self.parse_implements()
            }
            other => {
                self.error(
                    ErrorCode::E0302,
                    format!("expected a definition, found {}", other.display_name()),
                );
                self.bump();
                self.recover_to(DEFINITION_RECOVERY);
                self.eat(TokenKind::Semicolon);
                None
            }
        };
        node.map(reduce_definition)
    }

    // =========================================================================
    // Label blocks
    // =========================================================================

    /// `Label : LABEL identifier '{' LabelList '}' ';'`
    fn parse_label(&mut self) -> Option<Node> {
        self.bump();
        let name = self.expect(TokenKind::Ident, ErrorCode::E0301)?;
        self.expect(TokenKind::LBrace, ErrorCode::E0201)?;

        let mut collected: Vec<(&'a str, Span, &'a str)> = Vec::new();
        loop {
            self.skip_insignificant();
            if self.at(TokenKind::RBrace) || self.at(TokenKind::Eof) {
                break;
            }
            if let Some(item) = self.parse_label_item() {
                collected.push(item);
            }
            if self.eat(TokenKind::Comma) {
                continue;
            }
            if self.at(TokenKind::RBrace) || self.at(TokenKind::Eof) {
                break;
            }
            // Trailing garbage between an entry and its separator: one error,
            // resynchronize, and keep the entries that follow.
            self.error(
                ErrorCode::E0402,
                format!("expected ',' or '}}', found {}", self.current().display_name()),
            );
            self.recover_to(LABEL_ITEM_RECOVERY);
            self.eat(TokenKind::Comma);
        }
        self.expect(TokenKind::RBrace, ErrorCode::E0201);
        self.expect(TokenKind::Semicolon, ErrorCode::E0201);

        let mut items = Vec::new();
        for (item_name, span, version) in collected.into_iter().rev() {
            items = reduce_label_list(item_name, span, version, items);
        }
        Some(reduce_label(name.text, name.span, items))
    }

    /// `LabelList : identifier '=' float LabelCont`. A malformed entry is
    /// dropped and the cursor resynchronizes at the next comma or closer.
    fn parse_label_item(&mut self) -> Option<(&'a str, Span, &'a str)> {
        if self.at(TokenKind::Ident) {
            let name = self.bump();
            if self.eat(TokenKind::Eq) {
                self.skip_insignificant();
                if self.at(TokenKind::Float) {
                    let version = self.bump();
                    return Some((name.text, name.span, version.text));
                }
            }
        }
        self.errors
            .push(SyntaxError::from_code(ErrorCode::E0402, self.span()));
        self.recover_to(LABEL_ITEM_RECOVERY);
        None
    }

    // =========================================================================
    // Enums
    // =========================================================================

    /// `Enum : ENUM identifier '{' EnumValueList '}' ';'`
    fn parse_enum(&mut self) -> Option<Node> {
        self.bump();
        let name = self.expect(TokenKind::Ident, ErrorCode::E0301)?;
        self.expect(TokenKind::LBrace, ErrorCode::E0201)?;

        let mut collected: Vec<Node> = Vec::new();
        loop {
            self.skip_insignificant();
            if self.at(TokenKind::RBrace) || self.at(TokenKind::Eof) {
                break;
            }
            if let Some(value) = self.parse_enum_value() {
                collected.push(value);
            }
            if self.eat(TokenKind::Comma) {
                continue;
            }
            if self.at(TokenKind::RBrace) || self.at(TokenKind::Eof) {
                break;
            }
            self.error(
                ErrorCode::E0403,
                format!("expected ',' or '}}', found {}", self.current().display_name()),
            );
            self.recover_to(ENUM_ITEM_RECOVERY);
            self.eat(TokenKind::Comma);
        }
        self.expect(TokenKind::RBrace, ErrorCode::E0201);
        self.expect(TokenKind::Semicolon, ErrorCode::E0201);

        let mut values = Vec::new();
        for value in collected.into_iter().rev() {
            values = reduce_enum_values(value, values);
        }
        Some(reduce_enum(name.text, name.span, values))
    }

    /// `EnumValue : ExtendedAttributeList identifier ('=' ConstValue)?`
    fn parse_enum_value(&mut self) -> Option<Node> {
        let ext_attrs = if self.at(TokenKind::LBracket) {
            self.parse_ext_attr_list()
        } else {
            Vec::new()
        };
        self.skip_insignificant();
        if !self.at(TokenKind::Ident) {
            self.errors
                .push(SyntaxError::from_code(ErrorCode::E0403, self.span()));
            self.recover_to(ENUM_ITEM_RECOVERY);
            return None;
        }
        let name = self.bump();
        let value = if self.eat(TokenKind::Eq) {
            self.parse_const_value()
        } else {
            None
        };
        Some(reduce_enum_value(ext_attrs, name.text, name.span, value))
    }

    // =========================================================================
    // Constants
    // =========================================================================

    /// `ConstValue : integer | integer LSHIFT integer | integer RSHIFT integer
    ///             | string | FloatLiteral | BooleanLiteral`
    fn parse_const_value(&mut self) -> Option<Vec<Element>> {
        self.skip_insignificant();
        match self.current() {
            TokenKind::Integer => {
                let left = self.bump();
                if self.at(TokenKind::Lshift) || self.at(TokenKind::Rshift) {
                    let op = self.bump();
                    let right = self.expect(TokenKind::Integer, ErrorCode::E0401)?;
                    return Some(reduce_const_value(ConstExpr::Shift {
                        left: left.text,
                        op: op.text,
                        right: right.text,
                    }));
                }
                Some(reduce_const_value(ConstExpr::Integer(left.text)))
            }
            TokenKind::String => {
                let token = self.bump();
                let unquoted = token.text.trim_matches('"');
                Some(reduce_const_value(ConstExpr::Str(unquoted)))
            }
            TokenKind::Float => {
                let token = self.bump();
                Some(reduce_float_literal(token.text))
            }
            TokenKind::TrueKw => {
                self.bump();
                Some(reduce_boolean_literal(true))
            }
            TokenKind::FalseKw => {
                self.bump();
                Some(reduce_boolean_literal(false))
            }
            other => {
                self.error(
                    ErrorCode::E0401,
                    format!("invalid constant value: {}", other.display_name()),
                );
                None
            }
        }
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// `Type : PrimitiveType | identifier`
    ///
    /// Every match routes through the Type Terminal Mapper: a raw keyword
    /// gets wrapped, a named reference is built as a Typeref and passes
    /// through.
    fn parse_type(&mut self) -> Option<Node> {
        self.skip_insignificant();
        if self.current().is_type_keyword() {
            let token = self.bump();
            return Some(reduce_primitive_type(TypeTerm::keyword(
                token.text, token.span,
            )));
        }
        if self.at(TokenKind::Ident) {
            let token = self.bump();
            let typeref = build_named(NodeKind::Typeref, token.text, token.span, vec![]);
            return Some(reduce_primitive_type(TypeTerm::Composite(typeref)));
        }
        self.error(
            ErrorCode::E0304,
            format!("expected a type, found {}", self.current().display_name()),
        );
        None
    }

    // =========================================================================
    // Typedef / implements
    // =========================================================================

    /// `Typedef : TYPEDEF ExtendedAttributeList Type identifier ';'`
    fn parse_typedef(&mut self) -> Option<Node> {
        self.bump();
        self.skip_insignificant();
        let ext_attrs = if self.at(TokenKind::LBracket) {
            self.parse_ext_attr_list()
        } else {
            Vec::new()
        };
        let Some(ty) = self.parse_type() else {
            self.recover_to(DEFINITION_RECOVERY);
            self.eat(TokenKind::Semicolon);
            return None;
        };
        let name = self.expect(TokenKind::Ident, ErrorCode::E0301)?;
        self.expect(TokenKind::Semicolon, ErrorCode::E0201);
        Some(reduce_typedef(ext_attrs, ty, name.text, name.span))
    }

    /// `ImplementsStatement : identifier IMPLEMENTS identifier ';'`
    fn parse_implements(&mut self) -> Option<Node> {
        let name = self.bump();
        self.expect(TokenKind::ImplementsKw, ErrorCode::E0201)?;
        let reference = self.expect(TokenKind::Ident, ErrorCode::E0301)?;
        self.expect(TokenKind::Semicolon, ErrorCode::E0201);
        Some(reduce_implements(name.text, name.span, reference.text))
    }

    // =========================================================================
    // Interfaces
    // =========================================================================

    /// `CallbackOrInterface : callback? INTERFACE identifier '{' Members '}' ';'`
    fn parse_interface(&mut self) -> Option<Node> {
        if self.at(TokenKind::CallbackKw) {
            self.bump();
        }
        self.expect(TokenKind::InterfaceKw, ErrorCode::E0201)?;
        let name = self.expect(TokenKind::Ident, ErrorCode::E0301)?;
        let members = self.parse_interface_body()?;
        Some(reduce_interface(name.text, name.span, members))
    }

    /// `Partial : PARTIAL INTERFACE identifier '{' Members '}' ';'`
    fn parse_partial(&mut self) -> Option<Node> {
        self.bump();
        self.expect(TokenKind::InterfaceKw, ErrorCode::E0201)?;
        let name = self.expect(TokenKind::Ident, ErrorCode::E0301)?;
        let members = self.parse_interface_body()?;
        Some(reduce_partial(name.text, name.span, members))
    }

    fn parse_interface_body(&mut self) -> Option<Vec<Element>> {
        self.expect(TokenKind::LBrace, ErrorCode::E0201)?;
        let mut members = Vec::new();
        loop {
            self.skip_insignificant();
            if self.at(TokenKind::RBrace) || self.at(TokenKind::Eof) {
                break;
            }
            match self.parse_operation() {
                Some(member) => members.push(member.into()),
                None => {
                    self.recover_to(MEMBER_RECOVERY);
                    self.eat(TokenKind::Semicolon);
                }
            }
        }
        self.expect(TokenKind::RBrace, ErrorCode::E0201);
        self.expect(TokenKind::Semicolon, ErrorCode::E0201);
        Some(members)
    }

    /// `Member : ReturnType identifier '(' Params ')' ';'`
    fn parse_operation(&mut self) -> Option<Node> {
        let return_type = self.parse_type()?;
        let name = self.expect(TokenKind::Ident, ErrorCode::E0301)?;
        self.expect(TokenKind::LParen, ErrorCode::E0201)?;

        let mut params: Vec<Element> = Vec::new();
        loop {
            self.skip_insignificant();
            if self.at(TokenKind::RParen) || self.at(TokenKind::Eof) {
                break;
            }
            match self.parse_param() {
                Some(param) => params.push(param.into()),
                None => self.recover_to(PARAM_RECOVERY),
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, ErrorCode::E0201);
        self.expect(TokenKind::Semicolon, ErrorCode::E0201);
        Some(reduce_operation(return_type, name.text, name.span, params))
    }

    /// `Param : ExtendedAttributeList Type identifier`
    fn parse_param(&mut self) -> Option<Node> {
        self.skip_insignificant();
        let ext_attrs = if self.at(TokenKind::LBracket) {
            self.parse_ext_attr_list()
        } else {
            Vec::new()
        };
        let ty = self.parse_type()?;
        let name = self.expect(TokenKind::Ident, ErrorCode::E0301)?;
        Some(reduce_param(ext_attrs, ty, name.text, name.span))
    }

    // =========================================================================
    // Dictionaries and exceptions
    // =========================================================================

    /// `Dictionary : DICTIONARY identifier '{' DictionaryMembers '}' ';'`
    fn parse_dictionary(&mut self) -> Option<Node> {
        self.bump();
        let name = self.expect(TokenKind::Ident, ErrorCode::E0301)?;
        let members = self.parse_member_body()?;
        Some(reduce_dictionary(name.text, name.span, members))
    }

    /// `Exception : EXCEPTION identifier '{' ExceptionMembers '}' ';'`
    fn parse_exception(&mut self) -> Option<Node> {
        self.bump();
        let name = self.expect(TokenKind::Ident, ErrorCode::E0301)?;
        let members = self.parse_member_body()?;
        Some(reduce_exception(name.text, name.span, members))
    }

    fn parse_member_body(&mut self) -> Option<Vec<Element>> {
        self.expect(TokenKind::LBrace, ErrorCode::E0201)?;
        let mut members = Vec::new();
        loop {
            self.skip_insignificant();
            if self.at(TokenKind::RBrace) || self.at(TokenKind::Eof) {
                break;
            }
            match self.parse_member() {
                Some(member) => members.push(member.into()),
                None => {
                    self.recover_to(MEMBER_RECOVERY);
                    self.eat(TokenKind::Semicolon);
                }
            }
        }
        self.expect(TokenKind::RBrace, ErrorCode::E0201);
        self.expect(TokenKind::Semicolon, ErrorCode::E0201);
        Some(members)
    }

    /// `Member : Type identifier ';'`
    fn parse_member(&mut self) -> Option<Node> {
        let ty = self.parse_type()?;
        let name = self.expect(TokenKind::Ident, ErrorCode::E0303)?;
        self.expect(TokenKind::Semicolon, ErrorCode::E0201)?;
        Some(reduce_member(ty, name.text, name.span))
    }

    // =========================================================================
    // Extended attributes
    // =========================================================================

    /// `ExtendedAttributeList : '[' ExtendedAttribute (',' ExtendedAttribute)* ']'`
    fn parse_ext_attr_list(&mut self) -> Vec<Element> {
        self.bump();
        let mut attrs: Vec<Element> = Vec::new();
        loop {
            self.skip_insignificant();
            if self.at(TokenKind::RBracket) || self.at(TokenKind::Eof) {
                break;
            }
            match self.parse_ext_attribute() {
                Some(attr) => attrs.push(attr.into()),
                None => self.recover_to(ATTR_RECOVERY),
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBracket, ErrorCode::E0201);
        attrs
    }

    /// `ExtendedAttribute : identifier ('=' ConstValue)?`
    fn parse_ext_attribute(&mut self) -> Option<Node> {
        let name = self.expect(TokenKind::Ident, ErrorCode::E0301)?;
        let value = if self.eat(TokenKind::Eq) {
            self.parse_const_value()
        } else {
            None
        };
        Some(reduce_ext_attribute(name.text, name.span, value))
    }
}
