//! Logos-based lexer for Pepper-style IDL
//!
//! Fast tokenization using the logos crate, with line/column tracking so
//! every token carries source provenance for diagnostics.

use logos::Logos;

use crate::base::{Position, Span};

use super::token_kind::TokenKind;

/// A token with its kind, text, and source span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, RawToken>,
    position: Position,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: RawToken::lexer(input),
            position: Position::new(1, 1),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.inner.next()?;
        let text = self.inner.slice();

        let start = self.position;
        for ch in text.chars() {
            if ch == '\n' {
                self.position.line += 1;
                self.position.column = 1;
            } else {
                self.position.column += 1;
            }
        }
        let span = Span::new(start, self.position);

        let kind = match raw {
            Ok(t) => t.into(),
            Err(()) => TokenKind::Error,
        };

        Some(Token { kind, text, span })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Extend a `//` comment over consecutive `//` lines, one complete line at
/// a time. The match grows only by whole lines, so a run followed by code
/// keeps every accepted line.
fn lex_comment_run(lex: &mut logos::Lexer<RawToken>) {
    loop {
        let rest = lex.remainder();
        let Some(next_line) = rest.strip_prefix('\n') else {
            break;
        };
        let indent = next_line.len() - next_line.trim_start_matches([' ', '\t']).len();
        if !next_line[indent..].starts_with("//") {
            break;
        }
        let line_end = next_line.find('\n').unwrap_or(next_line.len());
        lex.bump(1 + line_end);
    }
}

/// Consume an `#inline` block: everything through the line that holds the
/// `#endinl` end marker becomes a single token.
fn lex_inline(lex: &mut logos::Lexer<RawToken>) -> bool {
    let remainder = lex.remainder();
    let Some(marker) = remainder.find("#endinl") else {
        return false;
    };
    let after = marker + "#endinl".len();
    let end = remainder[after..]
        .find('\n')
        .map(|offset| after + offset)
        .unwrap_or(remainder.len());
    lex.bump(end);
    true
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum RawToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    // A run of `//` lines is one comment token, matching how file headers
    // are written; a blank line breaks the run.
    #[regex(r"//[^\n]*", lex_comment_run)]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"-?([0-9]+|0[xX][0-9a-fA-F]+)")]
    Integer,

    #[regex(r"-?(([0-9]+\.[0-9]*)|([0-9]*\.[0-9]+))([eE][+-]?[0-9]+)?")]
    Float,

    #[regex(r#""[^"]*""#)]
    String,

    #[token("#inline", lex_inline)]
    Inline,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("<<")]
    Lshift,

    #[token(">>")]
    Rshift,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("=")]
    Eq,

    // =========================================================================
    // KEYWORDS (longest match wins in logos)
    // =========================================================================
    #[token("callback")]
    CallbackKw,
    #[token("interface")]
    InterfaceKw,
    #[token("partial")]
    PartialKw,
    #[token("dictionary")]
    DictionaryKw,
    #[token("exception")]
    ExceptionKw,
    #[token("enum")]
    EnumKw,
    #[token("typedef")]
    TypedefKw,
    #[token("implements")]
    ImplementsKw,
    #[token("label")]
    LabelKw,

    #[token("char")]
    CharKw,
    #[token("int8_t")]
    Int8Kw,
    #[token("int16_t")]
    Int16Kw,
    #[token("int32_t")]
    Int32Kw,
    #[token("int64_t")]
    Int64Kw,
    #[token("uint8_t")]
    Uint8Kw,
    #[token("uint16_t")]
    Uint16Kw,
    #[token("uint32_t")]
    Uint32Kw,
    #[token("uint64_t")]
    Uint64Kw,
    #[token("float_t")]
    FloatTKw,
    #[token("double_t")]
    DoubleTKw,
    #[token("handle_t")]
    HandleTKw,
    #[token("PP_FileHandle")]
    FileHandleKw,
    #[token("str_t")]
    StrTKw,
    #[token("mem_t")]
    MemTKw,
    #[token("cstr_t")]
    CstrTKw,
    #[token("interface_t")]
    InterfaceTKw,
    #[token("null")]
    NullKw,
    #[token("void")]
    VoidKw,

    #[token("true")]
    TrueKw,
    #[token("false")]
    FalseKw,
}

impl From<RawToken> for TokenKind {
    fn from(token: RawToken) -> Self {
        use RawToken::*;
        match token {
            Whitespace => TokenKind::Whitespace,
            LineComment | BlockComment => TokenKind::Comment,

            Ident => TokenKind::Ident,
            Integer => TokenKind::Integer,
            Float => TokenKind::Float,
            String => TokenKind::String,
            Inline => TokenKind::Inline,

            Lshift => TokenKind::Lshift,
            Rshift => TokenKind::Rshift,

            LBrace => TokenKind::LBrace,
            RBrace => TokenKind::RBrace,
            LBracket => TokenKind::LBracket,
            RBracket => TokenKind::RBracket,
            LParen => TokenKind::LParen,
            RParen => TokenKind::RParen,
            Comma => TokenKind::Comma,
            Semicolon => TokenKind::Semicolon,
            Eq => TokenKind::Eq,

            CallbackKw => TokenKind::CallbackKw,
            InterfaceKw => TokenKind::InterfaceKw,
            PartialKw => TokenKind::PartialKw,
            DictionaryKw => TokenKind::DictionaryKw,
            ExceptionKw => TokenKind::ExceptionKw,
            EnumKw => TokenKind::EnumKw,
            TypedefKw => TokenKind::TypedefKw,
            ImplementsKw => TokenKind::ImplementsKw,
            LabelKw => TokenKind::LabelKw,

            CharKw => TokenKind::CharKw,
            Int8Kw => TokenKind::Int8Kw,
            Int16Kw => TokenKind::Int16Kw,
            Int32Kw => TokenKind::Int32Kw,
            Int64Kw => TokenKind::Int64Kw,
            Uint8Kw => TokenKind::Uint8Kw,
            Uint16Kw => TokenKind::Uint16Kw,
            Uint32Kw => TokenKind::Uint32Kw,
            Uint64Kw => TokenKind::Uint64Kw,
            FloatTKw => TokenKind::FloatTKw,
            DoubleTKw => TokenKind::DoubleTKw,
            HandleTKw => TokenKind::HandleTKw,
            FileHandleKw => TokenKind::FileHandleKw,
            StrTKw => TokenKind::StrTKw,
            MemTKw => TokenKind::MemTKw,
            CstrTKw => TokenKind::CstrTKw,
            InterfaceTKw => TokenKind::InterfaceTKw,
            NullKw => TokenKind::NullKw,
            VoidKw => TokenKind::VoidKw,

            TrueKw => TokenKind::TrueKw,
            FalseKw => TokenKind::FalseKw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_enum_header() {
        let tokens = tokenize("enum Color {");
        assert_eq!(tokens.len(), 5); // enum, ws, Color, ws, {
        assert_eq!(tokens[0].kind, TokenKind::EnumKw);
        assert_eq!(tokens[2].kind, TokenKind::Ident);
        assert_eq!(tokens[2].text, "Color");
        assert_eq!(tokens[4].kind, TokenKind::LBrace);
    }

    #[test]
    fn test_lex_type_keywords() {
        let tokens = tokenize("int32_t uint64_t double_t handle_t str_t PP_FileHandle");
        let kinds: Vec<_> = tokens
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Int32Kw,
                TokenKind::Uint64Kw,
                TokenKind::DoubleTKw,
                TokenKind::HandleTKw,
                TokenKind::StrTKw,
                TokenKind::FileHandleKw,
            ]
        );
        assert!(kinds.iter().all(TokenKind::is_type_keyword));
    }

    #[test]
    fn test_lex_shift_operators() {
        let tokens = tokenize("1 << 4");
        let kinds: Vec<_> = tokens
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Integer, TokenKind::Lshift, TokenKind::Integer]
        );
        assert_eq!(tokenize(">>")[0].kind, TokenKind::Rshift);
    }

    #[test]
    fn test_lex_comment_run_is_one_token() {
        let tokens = tokenize("// Copyright line one.\n// Line two.\nenum");
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].text, "// Copyright line one.\n// Line two.");
        assert_eq!(tokens[1].kind, TokenKind::Whitespace);
        assert_eq!(tokens[2].kind, TokenKind::EnumKw);
    }

    #[test]
    fn test_lex_comment_run_followed_by_code() {
        let tokens = tokenize("// one\n// two\nenum");
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].text, "// one\n// two");
        assert_eq!(tokens[2].kind, TokenKind::EnumKw);
    }

    #[test]
    fn test_lex_single_comment_line_before_code() {
        let tokens = tokenize("// only line\nenum");
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].text, "// only line");
        assert_eq!(tokens[2].kind, TokenKind::EnumKw);

        // A comment at end of input, without a trailing newline.
        assert_eq!(tokenize("// tail")[0].kind, TokenKind::Comment);
    }

    #[test]
    fn test_lex_blank_line_breaks_comment_run() {
        let tokens = tokenize("// first\n\n// second");
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].text, "// first");
        assert_eq!(tokens[2].kind, TokenKind::Comment);
        assert_eq!(tokens[2].text, "// second");
    }

    #[test]
    fn test_lex_block_comment() {
        let tokens = tokenize("/* File comment.\n * More. */ label");
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[2].kind, TokenKind::LabelKw);
    }

    #[test]
    fn test_lex_inline_block() {
        let source = "#inline Foo\nint x = 1;\n#endinl\nenum E";
        let tokens = tokenize(source);
        assert_eq!(tokens[0].kind, TokenKind::Inline);
        assert_eq!(tokens[0].text, "#inline Foo\nint x = 1;\n#endinl");
        assert_eq!(tokens[2].kind, TokenKind::EnumKw);
    }

    #[test]
    fn test_lex_unterminated_inline_is_error() {
        let tokens = tokenize("#inline Foo\nno end marker");
        assert_eq!(tokens[0].kind, TokenKind::Error);
    }

    #[test]
    fn test_spans_track_lines_and_columns() {
        let tokens = tokenize("enum\n  Color");
        // "enum" on line 1
        assert_eq!(tokens[0].span.start, Position::new(1, 1));
        assert_eq!(tokens[0].span.end, Position::new(1, 5));
        // "Color" on line 2, after two spaces
        assert_eq!(tokens[2].span.start, Position::new(2, 3));
    }

    #[test]
    fn test_lex_string_and_numbers() {
        let tokens = tokenize(r#""abc" 42 0x1F 1.5"#);
        let kinds: Vec<_> = tokens
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::String,
                TokenKind::Integer,
                TokenKind::Integer,
                TokenKind::Float,
            ]
        );
    }
}
