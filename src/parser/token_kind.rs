//! Token vocabulary for the Pepper-style IDL scanner.

/// Kind of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    Whitespace,
    /// Block comment or a run of consecutive `//` lines
    Comment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    Ident,
    Integer,
    Float,
    String,
    /// `#inline <name>` line, raw body, `#endinl` line — one token
    Inline,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Semicolon,
    Eq,
    Lshift,
    Rshift,

    // =========================================================================
    // DECLARATION KEYWORDS
    // =========================================================================
    CallbackKw,
    InterfaceKw,
    PartialKw,
    DictionaryKw,
    ExceptionKw,
    EnumKw,
    TypedefKw,
    ImplementsKw,
    LabelKw,

    // =========================================================================
    // TYPE KEYWORDS
    // =========================================================================
    // Integer widths
    CharKw,
    Int8Kw,
    Int16Kw,
    Int32Kw,
    Int64Kw,
    // Unsigned widths
    Uint8Kw,
    Uint16Kw,
    Uint32Kw,
    Uint64Kw,
    // Floating point
    FloatTKw,
    DoubleTKw,
    // Handles
    HandleTKw,
    FileHandleKw,
    // Pointer-category
    StrTKw,
    MemTKw,
    CstrTKw,
    InterfaceTKw,
    NullKw,
    VoidKw,

    // =========================================================================
    // LITERAL KEYWORDS
    // =========================================================================
    TrueKw,
    FalseKw,

    /// Unrecognized input
    Error,
    /// End of input (synthesized by the engine, never lexed)
    Eof,
}

impl TokenKind {
    /// Whitespace is the only trivia; comments are grammar terminals at the
    /// top of a file and documentation elsewhere.
    pub fn is_trivia(&self) -> bool {
        matches!(self, Self::Whitespace)
    }

    /// Raw type-keyword terminals the Type Terminal Mapper wraps into a
    /// PrimitiveType node.
    pub fn is_type_keyword(&self) -> bool {
        matches!(
            self,
            Self::CharKw
                | Self::Int8Kw
                | Self::Int16Kw
                | Self::Int32Kw
                | Self::Int64Kw
                | Self::Uint8Kw
                | Self::Uint16Kw
                | Self::Uint32Kw
                | Self::Uint64Kw
                | Self::FloatTKw
                | Self::DoubleTKw
                | Self::HandleTKw
                | Self::FileHandleKw
                | Self::StrTKw
                | Self::MemTKw
                | Self::CstrTKw
                | Self::InterfaceTKw
                | Self::NullKw
                | Self::VoidKw
        )
    }

    /// Human-readable name for error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Whitespace => "whitespace",
            Self::Comment => "comment",
            Self::Ident => "identifier",
            Self::Integer => "integer literal",
            Self::Float => "float literal",
            Self::String => "string literal",
            Self::Inline => "inline block",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Eq => "'='",
            Self::Lshift => "'<<'",
            Self::Rshift => "'>>'",
            Self::CallbackKw => "'callback'",
            Self::InterfaceKw => "'interface'",
            Self::PartialKw => "'partial'",
            Self::DictionaryKw => "'dictionary'",
            Self::ExceptionKw => "'exception'",
            Self::EnumKw => "'enum'",
            Self::TypedefKw => "'typedef'",
            Self::ImplementsKw => "'implements'",
            Self::LabelKw => "'label'",
            Self::CharKw => "'char'",
            Self::Int8Kw => "'int8_t'",
            Self::Int16Kw => "'int16_t'",
            Self::Int32Kw => "'int32_t'",
            Self::Int64Kw => "'int64_t'",
            Self::Uint8Kw => "'uint8_t'",
            Self::Uint16Kw => "'uint16_t'",
            Self::Uint32Kw => "'uint32_t'",
            Self::Uint64Kw => "'uint64_t'",
            Self::FloatTKw => "'float_t'",
            Self::DoubleTKw => "'double_t'",
            Self::HandleTKw => "'handle_t'",
            Self::FileHandleKw => "'PP_FileHandle'",
            Self::StrTKw => "'str_t'",
            Self::MemTKw => "'mem_t'",
            Self::CstrTKw => "'cstr_t'",
            Self::InterfaceTKw => "'interface_t'",
            Self::NullKw => "'null'",
            Self::VoidKw => "'void'",
            Self::TrueKw => "'true'",
            Self::FalseKw => "'false'",
            Self::Error => "invalid token",
            Self::Eof => "end of file",
        }
    }
}
